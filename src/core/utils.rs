use faer::{Mat, MatRef};
use rustc_hash::FxHashSet;

use crate::error::{Result, StatsError};

////////////////////
// Sorting & rank //
////////////////////

/// Return an ascending sorted copy of the slice.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Order statistic at a zero-based fractional rank, linearly
/// interpolated between the two adjacent sorted values.
///
/// ### Params
///
/// * `sorted` - Ascending sorted, non-empty sample.
/// * `rank` - Fractional rank in `[0, len - 1]`.
///
/// ### Returns
///
/// The interpolated order statistic.
pub fn interpolated_order_statistic(sorted: &[f64], rank: f64) -> f64 {
    let lower = rank.floor() as usize;
    let fraction = rank - lower as f64;

    if fraction == 0.0 || lower + 1 >= sorted.len() {
        sorted[lower]
    } else {
        sorted[lower] + fraction * (sorted[lower + 1] - sorted[lower])
    }
}

////////////////////////
// Subset validation  //
////////////////////////

/// Check that every index lies within `[0, extent)`.
pub fn validate_indices(indices: &[usize], extent: usize) -> Result<()> {
    for &index in indices {
        if index >= extent {
            return Err(StatsError::IndexOutOfRange { index, extent });
        }
    }
    Ok(())
}

/// Copy the elements whose positions are NOT in the missing set.
///
/// Every missing index is validated against the slice length first;
/// duplicates in the missing set are tolerated.
///
/// ### Params
///
/// * `values` - The full sample.
/// * `missing` - Positions to exclude.
///
/// ### Returns
///
/// The complement sample, in original order.
pub fn non_missing<T: Copy>(values: &[T], missing: &[usize]) -> Result<Vec<T>> {
    validate_indices(missing, values.len())?;

    let excluded: FxHashSet<usize> = missing.iter().copied().collect();

    Ok(values
        .iter()
        .enumerate()
        .filter(|(i, _)| !excluded.contains(i))
        .map(|(_, &v)| v)
        .collect())
}

/// Resolve an optional column selection into concrete indices.
pub fn resolve_columns(mat: MatRef<f64>, columns: Option<&[usize]>) -> Result<Vec<usize>> {
    match columns {
        Some(indices) => {
            validate_indices(indices, mat.ncols())?;
            Ok(indices.to_vec())
        }
        None => Ok((0..mat.ncols()).collect()),
    }
}

/// Resolve an optional row selection into concrete indices.
pub fn resolve_rows(mat: MatRef<f64>, rows: Option<&[usize]>) -> Result<Vec<usize>> {
    match rows {
        Some(indices) => {
            validate_indices(indices, mat.nrows())?;
            Ok(indices.to_vec())
        }
        None => Ok((0..mat.nrows()).collect()),
    }
}

/// Copy one column restricted to the given (pre-validated) rows.
pub fn column_values(mat: MatRef<f64>, column: usize, rows: &[usize]) -> Vec<f64> {
    rows.iter().map(|&row| mat[(row, column)]).collect()
}

//////////////////
// Matrix stuff //
//////////////////

/// Transform a nested vector of columns into a faer matrix.
///
/// ### Params
///
/// * `columns` - One inner vector per column; all must share a length.
///
/// ### Returns
///
/// The assembled matrix, or a `DimensionMismatch` for ragged input.
pub fn matrix_from_columns(columns: Vec<Vec<f64>>) -> Result<Mat<f64>> {
    let nrows = columns.first().map(|c| c.len()).unwrap_or(0);

    for column in &columns {
        if column.len() != nrows {
            return Err(StatsError::DimensionMismatch {
                expected: nrows,
                actual: column.len(),
            });
        }
    }

    Ok(Mat::from_fn(nrows, columns.len(), |i, j| columns[j][i]))
}
