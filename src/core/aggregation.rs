use faer::MatRef;
use rayon::prelude::*;

use crate::core::histograms::{histogram, Histogram};
use crate::core::order::{box_plot, BoxPlot};
use crate::core::reductions::{self, Descriptives};
use crate::core::utils::{column_values, non_missing, resolve_columns, resolve_rows, validate_indices};
use crate::error::{Result, StatsError};

// Columns are independent, so each reduction dispatches on its own
// rayon task; results land at the column's (filtered) position. The
// first failing column fails the whole call.
fn per_column<T, F>(
    mat: MatRef<f64>,
    rows: Option<&[usize]>,
    columns: Option<&[usize]>,
    reducer: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&[f64]) -> Result<T> + Sync,
{
    let rows = resolve_rows(mat, rows)?;
    let columns = resolve_columns(mat, columns)?;

    columns
        .par_iter()
        .map(|&column| reducer(&column_values(mat, column, &rows)))
        .collect()
}

//////////////////////
// Column reducers  //
//////////////////////

/// Minimum per selected column, respecting the row subset.
///
/// ### Params
///
/// * `mat` - The matrix to reduce (rows are samples, columns are
///   variables).
/// * `rows` - Optional row subset; `None` uses every row.
/// * `columns` - Optional column subset; `None` uses every column.
///
/// ### Returns
///
/// One minimum per selected column, index-aligned with the selection.
pub fn columns_minimums(
    mat: MatRef<f64>,
    rows: Option<&[usize]>,
    columns: Option<&[usize]>,
) -> Result<Vec<f64>> {
    per_column(mat, rows, columns, |column| reductions::minimum(column))
}

/// Maximum per selected column, respecting the row subset.
pub fn columns_maximums(
    mat: MatRef<f64>,
    rows: Option<&[usize]>,
    columns: Option<&[usize]>,
) -> Result<Vec<f64>> {
    per_column(mat, rows, columns, |column| reductions::maximum(column))
}

/// Mean per selected column, respecting the row subset.
pub fn columns_means(
    mat: MatRef<f64>,
    rows: Option<&[usize]>,
    columns: Option<&[usize]>,
) -> Result<Vec<f64>> {
    per_column(mat, rows, columns, |column| reductions::mean(column))
}

/// Median per selected column, respecting the row subset.
pub fn columns_medians(
    mat: MatRef<f64>,
    rows: Option<&[usize]>,
    columns: Option<&[usize]>,
) -> Result<Vec<f64>> {
    per_column(mat, rows, columns, |column| reductions::median(column))
}

/// Four-number summary per selected column, respecting the row subset.
pub fn columns_descriptives(
    mat: MatRef<f64>,
    rows: Option<&[usize]>,
    columns: Option<&[usize]>,
) -> Result<Vec<Descriptives>> {
    per_column(mat, rows, columns, |column| reductions::descriptives(column))
}

/// Histogram per selected column.
pub fn histograms(
    mat: MatRef<f64>,
    bins: usize,
    columns: Option<&[usize]>,
) -> Result<Vec<Histogram>> {
    per_column(mat, None, columns, |column| histogram(column, bins))
}

///////////////////////////
// Missing-value column  //
///////////////////////////

fn check_subset_width(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(StatsError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Mean per selected column, excluding a per-column missing row set.
///
/// ### Params
///
/// * `mat` - The matrix to reduce.
/// * `missing` - One missing row index set per selected column.
/// * `columns` - Optional column subset; `None` uses every column.
///
/// ### Returns
///
/// One mean per selected column over its non-missing rows.
pub fn columns_means_missing_values(
    mat: MatRef<f64>,
    missing: &[Vec<usize>],
    columns: Option<&[usize]>,
) -> Result<Vec<f64>> {
    let columns = resolve_columns(mat, columns)?;
    check_subset_width(columns.len(), missing.len())?;

    let all_rows: Vec<usize> = (0..mat.nrows()).collect();

    columns
        .par_iter()
        .zip(missing.par_iter())
        .map(|(&column, excluded)| {
            reductions::mean(&non_missing(&column_values(mat, column, &all_rows), excluded)?)
        })
        .collect()
}

/// Four-number summary per selected column, excluding a per-column
/// missing row set.
pub fn columns_descriptives_missing_values(
    mat: MatRef<f64>,
    missing: &[Vec<usize>],
    columns: Option<&[usize]>,
) -> Result<Vec<Descriptives>> {
    let columns = resolve_columns(mat, columns)?;
    check_subset_width(columns.len(), missing.len())?;

    let all_rows: Vec<usize> = (0..mat.nrows()).collect();

    columns
        .par_iter()
        .zip(missing.par_iter())
        .map(|(&column, excluded)| {
            reductions::descriptives(&non_missing(
                &column_values(mat, column, &all_rows),
                excluded,
            )?)
        })
        .collect()
}

//////////////////
// Row reducers //
//////////////////

/// Mean per selected row across every column.
pub fn rows_means(mat: MatRef<f64>, rows: Option<&[usize]>) -> Result<Vec<f64>> {
    let rows = resolve_rows(mat, rows)?;

    rows.par_iter()
        .map(|&row| {
            let row_values: Vec<f64> = (0..mat.ncols()).map(|col| mat[(row, col)]).collect();
            reductions::mean(&row_values)
        })
        .collect()
}

/////////////////////
// Global extremes //
/////////////////////

fn check_non_empty(mat: MatRef<f64>) -> Result<()> {
    if mat.nrows() == 0 || mat.ncols() == 0 {
        return Err(StatsError::EmptyInput);
    }
    Ok(())
}

/// Minimum over all matrix elements.
pub fn matrix_minimum(mat: MatRef<f64>) -> Result<f64> {
    check_non_empty(mat)?;

    Ok((0..mat.ncols())
        .into_par_iter()
        .fold(
            || f64::MAX,
            |acc, col| {
                let mut local = acc;
                for row in 0..mat.nrows() {
                    local = local.min(mat[(row, col)]);
                }
                local
            },
        )
        .reduce(|| f64::MAX, f64::min))
}

/// Maximum over all matrix elements.
pub fn matrix_maximum(mat: MatRef<f64>) -> Result<f64> {
    check_non_empty(mat)?;

    Ok((0..mat.ncols())
        .into_par_iter()
        .fold(
            || f64::MIN,
            |acc, col| {
                let mut local = acc;
                for row in 0..mat.nrows() {
                    local = local.max(mat[(row, col)]);
                }
                local
            },
        )
        .reduce(|| f64::MIN, f64::max))
}

/// (row, column) of the global minimum, first occurrence in row-major
/// scan order.
pub fn minimal_position(mat: MatRef<f64>) -> Result<(usize, usize)> {
    check_non_empty(mat)?;

    let mut best = (0, 0);
    for row in 0..mat.nrows() {
        for col in 0..mat.ncols() {
            if mat[(row, col)] < mat[best] {
                best = (row, col);
            }
        }
    }

    Ok(best)
}

/// (row, column) of the global maximum, first occurrence in row-major
/// scan order.
pub fn maximal_position(mat: MatRef<f64>) -> Result<(usize, usize)> {
    check_non_empty(mat)?;

    let mut best = (0, 0);
    for row in 0..mat.nrows() {
        for col in 0..mat.ncols() {
            if mat[(row, col)] > mat[best] {
                best = (row, col);
            }
        }
    }

    Ok(best)
}

////////////////////////////
// Per-column index query //
////////////////////////////

/// Row index of the minimum per column, first occurrence on ties.
pub fn columns_minimal_indices(mat: MatRef<f64>) -> Result<Vec<usize>> {
    per_column(mat, None, None, |column| reductions::minimal_index(column))
}

/// Row index of the maximum per column, first occurrence on ties.
pub fn columns_maximal_indices(mat: MatRef<f64>) -> Result<Vec<usize>> {
    per_column(mat, None, None, |column| reductions::maximal_index(column))
}

fn extreme_index_omitting(
    column: &[f64],
    sentinel: f64,
    prefer_smaller: bool,
) -> Result<usize> {
    let mut best: Option<usize> = None;

    for (row, &value) in column.iter().enumerate() {
        if value == sentinel {
            continue;
        }
        match best {
            None => best = Some(row),
            Some(current) => {
                let better = if prefer_smaller {
                    value < column[current]
                } else {
                    value > column[current]
                };
                if better {
                    best = Some(row);
                }
            }
        }
    }

    best.ok_or(StatsError::EmptyInput)
}

/// Row index of the minimum per column, ignoring elements equal to the
/// sentinel. A fully-omitted column fails the call.
///
/// ### Params
///
/// * `mat` - The matrix to query.
/// * `sentinel` - Value to skip during the scan.
///
/// ### Returns
///
/// One row index per column.
pub fn columns_minimal_indices_omit(mat: MatRef<f64>, sentinel: f64) -> Result<Vec<usize>> {
    per_column(mat, None, None, |column| {
        extreme_index_omitting(column, sentinel, true)
    })
}

/// Row index of the maximum per column, ignoring elements equal to the
/// sentinel. A fully-omitted column fails the call.
pub fn columns_maximal_indices_omit(mat: MatRef<f64>, sentinel: f64) -> Result<Vec<usize>> {
    per_column(mat, None, None, |column| {
        extreme_index_omitting(column, sentinel, false)
    })
}

///////////////
// Box plots //
///////////////

/// Five-number summary per selected column, each optionally restricted
/// to its own row subset (categorical slicing).
///
/// ### Params
///
/// * `mat` - The matrix to summarise.
/// * `rows_per_column` - Optional per-selected-column row subsets; must
///   be as wide as the column selection.
/// * `columns` - Optional column subset; `None` uses every column.
///
/// ### Returns
///
/// One `BoxPlot` per selected column.
pub fn box_plots(
    mat: MatRef<f64>,
    rows_per_column: Option<&[Vec<usize>]>,
    columns: Option<&[usize]>,
) -> Result<Vec<BoxPlot>> {
    let columns = resolve_columns(mat, columns)?;

    match rows_per_column {
        None => {
            let all_rows: Vec<usize> = (0..mat.nrows()).collect();
            columns
                .par_iter()
                .map(|&column| box_plot(&column_values(mat, column, &all_rows)))
                .collect()
        }
        Some(subsets) => {
            check_subset_width(columns.len(), subsets.len())?;
            columns
                .par_iter()
                .zip(subsets.par_iter())
                .map(|(&column, rows)| {
                    validate_indices(rows, mat.nrows())?;
                    box_plot(&column_values(mat, column, rows))
                })
                .collect()
        }
    }
}

/////////////////////////
// Categorical means   //
/////////////////////////

/// Mean of the target column within every category group.
///
/// Every column but the last is a one-hot category indicator; the last
/// column is the target. A category with no member rows fails the
/// call.
///
/// ### Params
///
/// * `mat` - Matrix of one-hot indicator columns plus a trailing
///   target column.
///
/// ### Returns
///
/// One mean per category column, index-aligned.
pub fn means_by_categories(mat: MatRef<f64>) -> Result<Vec<f64>> {
    means_by_categories_missing_values(mat, &[])
}

/// Per-category means of the target column, excluding a missing row
/// set first.
pub fn means_by_categories_missing_values(mat: MatRef<f64>, missing: &[usize]) -> Result<Vec<f64>> {
    if mat.ncols() < 2 {
        return Err(StatsError::InsufficientSample {
            required: 2,
            actual: mat.ncols(),
        });
    }
    validate_indices(missing, mat.nrows())?;

    let excluded: rustc_hash::FxHashSet<usize> = missing.iter().copied().collect();
    let target = mat.ncols() - 1;

    (0..target)
        .into_par_iter()
        .map(|category| {
            let members: Vec<f64> = (0..mat.nrows())
                .filter(|row| !excluded.contains(row) && mat[(*row, category)] == 1.0)
                .map(|row| mat[(row, target)])
                .collect();

            reductions::mean(&members)
        })
        .collect()
}
