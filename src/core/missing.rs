//! Missing-value counterparts of the scalar reducers.
//!
//! Missing values are an explicit index set, never a sentinel value:
//! a genuine extreme can then never be mistaken for an absence marker.
//! Every counterpart validates the index set against the sample
//! extent, reduces the complement, and so uses the non-missing count
//! in every denominator. A fully-missing sample degrades to the
//! empty-input behaviour of the wrapped reducer.

use crate::core::histograms::{histogram, Histogram};
use crate::core::order::{box_plot, percentiles, quartiles, BoxPlot};
use crate::core::reductions;
use crate::core::reductions::Descriptives;
use crate::core::utils::non_missing;
use crate::error::Result;

/// Minimum of the non-missing values.
pub fn minimum_missing_values<T: PartialOrd + Copy>(values: &[T], missing: &[usize]) -> Result<T> {
    reductions::minimum(&non_missing(values, missing)?)
}

/// Maximum of the non-missing values.
pub fn maximum_missing_values<T: PartialOrd + Copy>(values: &[T], missing: &[usize]) -> Result<T> {
    reductions::maximum(&non_missing(values, missing)?)
}

/// Mean of the non-missing values.
pub fn mean_missing_values(values: &[f64], missing: &[usize]) -> Result<f64> {
    reductions::mean(&non_missing(values, missing)?)
}

/// Median of the non-missing values.
pub fn median_missing_values(values: &[f64], missing: &[usize]) -> Result<f64> {
    reductions::median(&non_missing(values, missing)?)
}

/// Sample variance of the non-missing values; the n - 1 denominator
/// counts only those.
pub fn variance_missing_values(values: &[f64], missing: &[usize]) -> Result<f64> {
    reductions::variance(&non_missing(values, missing)?)
}

/// Sample standard deviation of the non-missing values.
pub fn standard_deviation_missing_values(values: &[f64], missing: &[usize]) -> Result<f64> {
    reductions::standard_deviation(&non_missing(values, missing)?)
}

/// Asymmetry of the non-missing values.
pub fn asymmetry_missing_values(values: &[f64], missing: &[usize]) -> Result<f64> {
    reductions::asymmetry(&non_missing(values, missing)?)
}

/// Excess kurtosis of the non-missing values.
pub fn kurtosis_missing_values(values: &[f64], missing: &[usize]) -> Result<f64> {
    reductions::kurtosis(&non_missing(values, missing)?)
}

/// Quartiles of the non-missing values.
pub fn quartiles_missing_values(values: &[f64], missing: &[usize]) -> Result<[f64; 3]> {
    quartiles(&non_missing(values, missing)?)
}

/// Deciles of the non-missing values.
pub fn percentiles_missing_values(values: &[f64], missing: &[usize]) -> Result<Vec<f64>> {
    percentiles(&non_missing(values, missing)?)
}

/// Five-number summary of the non-missing values.
pub fn box_plot_missing_values(values: &[f64], missing: &[usize]) -> Result<BoxPlot> {
    box_plot(&non_missing(values, missing)?)
}

/// Histogram of the non-missing values; the frequency sum equals the
/// non-missing count.
pub fn histogram_missing_values(
    values: &[f64],
    missing: &[usize],
    bins: usize,
) -> Result<Histogram> {
    histogram(&non_missing(values, missing)?, bins)
}

/// Four-number summary of the non-missing values.
pub fn descriptives_missing_values(values: &[f64], missing: &[usize]) -> Result<Descriptives> {
    reductions::descriptives(&non_missing(values, missing)?)
}
