use crate::core::reductions::{maximum, minimum};
use crate::core::utils::{interpolated_order_statistic, sorted_copy};
use crate::error::{Result, StatsError};

////////////////
// Structures //
////////////////

/// Five-number robust summary of a sample.
///
/// Invariant: `minimum <= first_quartile <= median <= third_quartile
/// <= maximum`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPlot {
    pub minimum: f64,
    pub first_quartile: f64,
    pub median: f64,
    pub third_quartile: f64,
    pub maximum: f64,
}

///////////////
// Functions //
///////////////

// Quartiles and percentiles share one interpolation convention: the
// order statistic at the zero-based fractional rank q * (n - 1).
fn quantile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    interpolated_order_statistic(sorted, q * (sorted.len() - 1) as f64)
}

fn require_at_least_four(values: &[f64]) -> Result<()> {
    if values.len() < 4 {
        return Err(StatsError::InsufficientSample {
            required: 4,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Calculate the three quartiles of a sample.
///
/// Linear interpolation between order statistics at the zero-based
/// fractional ranks `0.25 * (n - 1)`, `0.5 * (n - 1)` and
/// `0.75 * (n - 1)`; the same convention backs `percentiles` and
/// `box_plot`.
///
/// ### Params
///
/// * `values` - The sample to reduce.
///
/// ### Returns
///
/// `[Q1, Q2, Q3]`, or `InsufficientSample` when n < 4.
pub fn quartiles(values: &[f64]) -> Result<[f64; 3]> {
    require_at_least_four(values)?;

    let sorted = sorted_copy(values);

    Ok([
        quantile_of_sorted(&sorted, 0.25),
        quantile_of_sorted(&sorted, 0.5),
        quantile_of_sorted(&sorted, 0.75),
    ])
}

/// Calculate the nine interior deciles (10% .. 90%) of a sample.
///
/// Same interpolation convention as `quartiles`.
///
/// ### Params
///
/// * `values` - The sample to reduce.
///
/// ### Returns
///
/// The deciles in ascending fraction order, or `InsufficientSample`
/// when n < 4.
pub fn percentiles(values: &[f64]) -> Result<Vec<f64>> {
    require_at_least_four(values)?;

    let sorted = sorted_copy(values);

    Ok((1..=9)
        .map(|decile| quantile_of_sorted(&sorted, decile as f64 / 10.0))
        .collect())
}

/// Build the five-number summary of a sample.
///
/// Equals `{minimum, Q1, Q2, Q3, maximum}` exactly.
///
/// ### Params
///
/// * `values` - The sample to summarise.
///
/// ### Returns
///
/// The `BoxPlot`, or `InsufficientSample` when n < 4.
pub fn box_plot(values: &[f64]) -> Result<BoxPlot> {
    let [first_quartile, median, third_quartile] = quartiles(values)?;

    Ok(BoxPlot {
        minimum: minimum(values)?,
        first_quartile,
        median,
        third_quartile,
        maximum: maximum(values)?,
    })
}
