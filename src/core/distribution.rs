use statrs::distribution::{ContinuousCDF, Normal};
use statrs::function::erf::erf;

use crate::core::reductions::{asymmetry, kurtosis, mean, standard_deviation};
use crate::core::utils::{non_missing, sorted_copy};
use crate::error::{Result, StatsError};

/// Reference families ranked by `perform_distribution_distance_analysis`,
/// in tie-break order.
pub const NORMAL_FAMILY: usize = 0;
pub const HALF_NORMAL_FAMILY: usize = 1;
pub const UNIFORM_FAMILY: usize = 2;

///////////////
// Distances //
///////////////

// The fixed distance statistic: mean absolute deviation between the
// empirical CDF (i + 1) / n at each sorted sample point and the fitted
// reference CDF evaluated there. Scale-free in n, so distances stay
// comparable after missing-value filtering.
fn ecdf_distance<F>(sorted: &[f64], reference_cdf: F) -> f64
where
    F: Fn(f64) -> f64,
{
    let n = sorted.len() as f64;

    sorted
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let empirical = (i + 1) as f64 / n;
            (empirical - reference_cdf(value)).abs()
        })
        .sum::<f64>()
        / n
}

fn is_degenerate(sorted: &[f64]) -> bool {
    sorted[0] == sorted[sorted.len() - 1]
}

// All three fits need at least two values, matching the normal fit's
// standard-deviation requirement so the family comparison is uniform.
fn check_sample_size(values: &[f64]) -> Result<()> {
    if values.len() < 2 {
        return Err(StatsError::InsufficientSample {
            required: 2,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Distance between the sample's empirical distribution and a normal
/// distribution fitted with the sample's own mean and standard
/// deviation.
///
/// An all-equal sample reports zero distance (defined fallback).
///
/// ### Params
///
/// * `values` - The sample to analyse.
///
/// ### Returns
///
/// The mean absolute ECDF deviation, or `InsufficientSample` when
/// n < 2 (the fit needs a standard deviation).
pub fn normal_distribution_distance(values: &[f64]) -> Result<f64> {
    let sd = standard_deviation(values)?;
    let sorted = sorted_copy(values);

    if is_degenerate(&sorted) {
        return Ok(0.0);
    }

    let normal = Normal::new(mean(values)?, sd).unwrap();

    Ok(ecdf_distance(&sorted, |value| normal.cdf(value)))
}

/// Distance between the sample's empirical distribution and a
/// half-normal distribution anchored at the sample minimum with the
/// half-range as scale.
///
/// An all-equal sample reports zero distance (defined fallback).
///
/// ### Params
///
/// * `values` - The sample to analyse.
///
/// ### Returns
///
/// The mean absolute ECDF deviation.
pub fn half_normal_distribution_distance(values: &[f64]) -> Result<f64> {
    check_sample_size(values)?;
    let sorted = sorted_copy(values);

    if is_degenerate(&sorted) {
        return Ok(0.0);
    }

    let min_val = sorted[0];
    let scale = (sorted[sorted.len() - 1] - min_val) / 2.0;

    Ok(ecdf_distance(&sorted, |value| {
        erf((value - min_val) / (scale * 2.0_f64.sqrt()))
    }))
}

/// Distance between the sample's empirical distribution and a uniform
/// distribution spanning the sample's own minimum and maximum.
///
/// An all-equal sample reports zero distance (defined fallback).
///
/// ### Params
///
/// * `values` - The sample to analyse.
///
/// ### Returns
///
/// The mean absolute ECDF deviation.
pub fn uniform_distribution_distance(values: &[f64]) -> Result<f64> {
    check_sample_size(values)?;
    let sorted = sorted_copy(values);

    if is_degenerate(&sorted) {
        return Ok(0.0);
    }

    let min_val = sorted[0];
    let span = sorted[sorted.len() - 1] - min_val;

    Ok(ecdf_distance(&sorted, |value| (value - min_val) / span))
}

//////////////
// Analysis //
//////////////

/// Find the reference family best matching the sample.
///
/// Compares the three distances and returns the family of the minimal
/// one: 0 = normal, 1 = half-normal, 2 = uniform. Ties resolve to the
/// lowest index, so a fully degenerate sample (all distances zero)
/// reports normal.
///
/// ### Params
///
/// * `values` - The sample to analyse.
///
/// ### Returns
///
/// The best-fitting family index.
pub fn perform_distribution_distance_analysis(values: &[f64]) -> Result<usize> {
    let distances = [
        normal_distribution_distance(values)?,
        half_normal_distribution_distance(values)?,
        uniform_distribution_distance(values)?,
    ];

    let mut best = NORMAL_FAMILY;
    for (family, distance) in distances.iter().enumerate().skip(1) {
        if *distance < distances[best] {
            best = family;
        }
    }

    Ok(best)
}

/// Best-fitting family of the non-missing values.
pub fn perform_distribution_distance_analysis_missing_values(
    values: &[f64],
    missing: &[usize],
) -> Result<usize> {
    perform_distribution_distance_analysis(&non_missing(values, missing)?)
}

///////////////
// Normality //
///////////////

/// Scalar deviation of the sample's shape from the Gaussian reference.
///
/// Absolute asymmetry plus absolute excess kurtosis: a normal sample
/// has skewness 0 and kurtosis 3, so both terms vanish on it.
///
/// ### Params
///
/// * `values` - The sample to analyse.
///
/// ### Returns
///
/// The deviation, or `InsufficientSample` when n < 2.
pub fn normality_parameter(values: &[f64]) -> Result<f64> {
    Ok(asymmetry(values)?.abs() + kurtosis(values)?.abs())
}

/// Threshold the normality parameter into shape verdicts.
///
/// ### Params
///
/// * `values` - The sample to analyse.
///
/// ### Returns
///
/// `[normal, symmetric, mesokurtic]`: the combined deviation is at
/// most 0.5, the absolute asymmetry is at most 0.5, the absolute
/// excess kurtosis is at most 0.5.
pub fn perform_normality_analysis(values: &[f64]) -> Result<[bool; 3]> {
    let skew = asymmetry(values)?;
    let excess = kurtosis(values)?;

    Ok([
        skew.abs() + excess.abs() <= 0.5,
        skew.abs() <= 0.5,
        excess.abs() <= 0.5,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_distr::{Distribution, Normal as NormalSampler};

    fn normal_draws(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let sampler = NormalSampler::new(0.0, 1.0).unwrap();
        (0..n).map(|_| sampler.sample(&mut rng)).collect()
    }

    fn uniform_draws(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.random_range(0.0..1.0)).collect()
    }

    #[test]
    fn test_degenerate_sample_reports_zero_everywhere() {
        let values = vec![5.0, 5.0, 5.0, 5.0];

        assert_eq!(normal_distribution_distance(&values).unwrap(), 0.0);
        assert_eq!(half_normal_distribution_distance(&values).unwrap(), 0.0);
        assert_eq!(uniform_distribution_distance(&values).unwrap(), 0.0);

        // undefined winner resolves to the first family: normal
        assert_eq!(
            perform_distribution_distance_analysis(&values).unwrap(),
            NORMAL_FAMILY
        );
    }

    #[test]
    fn test_normal_draws_fit_normal_best() {
        let values = normal_draws(500, 42);

        assert_eq!(
            perform_distribution_distance_analysis(&values).unwrap(),
            NORMAL_FAMILY
        );
    }

    #[test]
    fn test_uniform_draws_fit_uniform_best() {
        let values = uniform_draws(500, 42);

        assert_eq!(
            perform_distribution_distance_analysis(&values).unwrap(),
            UNIFORM_FAMILY
        );
    }

    #[test]
    fn test_distances_are_bounded() {
        let values = normal_draws(100, 7);

        for distance in [
            normal_distribution_distance(&values).unwrap(),
            half_normal_distribution_distance(&values).unwrap(),
            uniform_distribution_distance(&values).unwrap(),
        ] {
            assert!((0.0..=1.0).contains(&distance));
        }
    }

    #[test]
    fn test_missing_values_variant_filters_first() {
        let mut values = uniform_draws(400, 11);
        // poison a few positions with an extreme sentinel-like value
        values[0] = 1e9;
        values[100] = -1e9;

        assert_eq!(
            perform_distribution_distance_analysis_missing_values(&values, &[0, 100]).unwrap(),
            UNIFORM_FAMILY
        );
    }

    #[test]
    fn test_normality_parameter_on_known_shape() {
        // [1..5] is symmetric but platykurtic: parameter 0 + 1.912
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let parameter = normality_parameter(&values).unwrap();
        assert!((parameter - 1.912).abs() < 1e-3);

        let verdicts = perform_normality_analysis(&values).unwrap();
        assert_eq!(verdicts, [false, true, false]);
    }

    #[test]
    fn test_normality_analysis_on_gaussian_draws() {
        let values = normal_draws(1000, 3);
        let verdicts = perform_normality_analysis(&values).unwrap();

        assert_eq!(verdicts, [true, true, true]);
    }
}
