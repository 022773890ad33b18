use crate::error::{Result, StatsError};

////////////////
// Structures //
////////////////

/// Four-number summary of a sample.
///
/// ### Fields
///
/// * `name` - Optional label of the summarised variable
/// * `minimum` - Smallest value of the sample
/// * `maximum` - Biggest value of the sample
/// * `mean` - Arithmetic mean of the sample
/// * `standard_deviation` - Sample (n - 1) standard deviation
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptives {
    pub name: Option<String>,
    pub minimum: f64,
    pub maximum: f64,
    pub mean: f64,
    pub standard_deviation: f64,
}

impl Descriptives {
    /// Attach a variable name to the summary.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the sample spans exactly `[-1, 1]`.
    pub fn has_minimum_minus_one_maximum_one(&self) -> bool {
        (self.minimum + 1.0).abs() < f64::EPSILON && (self.maximum - 1.0).abs() < f64::EPSILON
    }

    /// Whether the sample is already standardised.
    pub fn has_mean_zero_standard_deviation_one(&self) -> bool {
        self.mean.abs() < f64::EPSILON && (self.standard_deviation - 1.0).abs() < f64::EPSILON
    }
}

//////////////
// Extremes //
//////////////

/// Get the minimum value of a sequence.
///
/// Works for any ordered element type, so integer- and time-valued
/// sequences share the implementation.
///
/// ### Params
///
/// * `values` - The sequence to reduce.
///
/// ### Returns
///
/// The smallest value, or `EmptyInput` for an empty sequence.
pub fn minimum<T: PartialOrd + Copy>(values: &[T]) -> Result<T> {
    let mut iter = values.iter();
    let mut min_val = *iter.next().ok_or(StatsError::EmptyInput)?;

    for &value in iter {
        if value < min_val {
            min_val = value;
        }
    }

    Ok(min_val)
}

/// Get the maximum value of a sequence.
///
/// ### Params
///
/// * `values` - The sequence to reduce.
///
/// ### Returns
///
/// The biggest value, or `EmptyInput` for an empty sequence.
pub fn maximum<T: PartialOrd + Copy>(values: &[T]) -> Result<T> {
    let mut iter = values.iter();
    let mut max_val = *iter.next().ok_or(StatsError::EmptyInput)?;

    for &value in iter {
        if value > max_val {
            max_val = value;
        }
    }

    Ok(max_val)
}

/// Get the value of maximal absolute magnitude, keeping its sign.
pub fn strongest(values: &[f64]) -> Result<f64> {
    let mut iter = values.iter();
    let mut strongest_val = *iter.next().ok_or(StatsError::EmptyInput)?;

    for &value in iter {
        if value.abs() > strongest_val.abs() {
            strongest_val = value;
        }
    }

    Ok(strongest_val)
}

/// Get the range (maximum - minimum) of a sample.
pub fn range(values: &[f64]) -> Result<f64> {
    Ok(maximum(values)? - minimum(values)?)
}

///////////
// Means //
///////////

/// Calculate the arithmetic mean of a sample.
///
/// ### Params
///
/// * `values` - The sample to reduce.
///
/// ### Returns
///
/// The mean, or `EmptyInput` for an empty sample.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Calculate the mean over the half-open index interval `[lo, hi)`.
///
/// ### Params
///
/// * `values` - The sample to reduce.
/// * `lo` - First index of the interval.
/// * `hi` - One past the last index of the interval.
///
/// ### Returns
///
/// The mean of the interval. `IndexOutOfRange` when the interval does
/// not fit the sample, `EmptyInput` when it is empty.
pub fn mean_between(values: &[f64], lo: usize, hi: usize) -> Result<f64> {
    if hi > values.len() {
        return Err(StatsError::IndexOutOfRange {
            index: hi,
            extent: values.len(),
        });
    }
    if lo > hi {
        return Err(StatsError::IndexOutOfRange {
            index: lo,
            extent: hi,
        });
    }

    mean(&values[lo..hi])
}

/// Calculate the weighted mean sum(v * w) / sum(w).
///
/// ### Params
///
/// * `values` - The sample to reduce.
/// * `weights` - One weight per value.
///
/// ### Returns
///
/// The weighted mean. `DimensionMismatch` when the sequences disagree
/// in length, `DegenerateDistribution` when the weights sum to zero.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if weights.len() != values.len() {
        return Err(StatsError::DimensionMismatch {
            expected: values.len(),
            actual: weights.len(),
        });
    }

    let weight_sum: f64 = weights.iter().sum();
    if weight_sum == 0.0 {
        return Err(StatsError::DegenerateDistribution {
            reason: "weights sum to zero",
        });
    }

    let weighted_sum: f64 = values.iter().zip(weights.iter()).map(|(v, w)| v * w).sum();

    Ok(weighted_sum / weight_sum)
}

////////////
// Median //
////////////

/// Calculate the median via a full sort.
///
/// For an even sample size the two central order statistics are
/// averaged.
///
/// ### Params
///
/// * `values` - The sample to reduce.
///
/// ### Returns
///
/// The median, or `EmptyInput` for an empty sample.
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let sorted = super::utils::sorted_copy(values);
    let n = sorted.len();

    if n % 2 == 0 {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Ok(sorted[n / 2])
    }
}

/////////////
// Moments //
/////////////

// Welford accumulation of the centred second moment. Returns
// (mean, m2, n).
fn centred_moments(values: &[f64]) -> (f64, f64, f64) {
    let mut mean = 0.0;
    let mut m2 = 0.0;
    let mut count = 0.0;

    for &value in values {
        count += 1.0;
        let delta = value - mean;
        mean += delta / count;
        let delta2 = value - mean;
        m2 += delta * delta2;
    }

    (mean, m2, count)
}

/// Calculate the sample variance with the unbiased (n - 1) estimator.
///
/// The n - 1 convention is fixed crate-wide: the standard deviation,
/// asymmetry and kurtosis all standardise with it.
///
/// ### Params
///
/// * `values` - The sample to reduce.
///
/// ### Returns
///
/// The sample variance, or `InsufficientSample` when n < 2.
pub fn variance(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(StatsError::InsufficientSample {
            required: 2,
            actual: values.len(),
        });
    }

    let (_, m2, count) = centred_moments(values);

    Ok(m2 / (count - 1.0))
}

/// Calculate the sample standard deviation.
pub fn standard_deviation(values: &[f64]) -> Result<f64> {
    Ok(variance(values)?.sqrt())
}

/// Calculate the standard deviation over a trailing window at every
/// position.
///
/// Positions whose trailing window holds fewer than two values report
/// a local deviation of zero.
///
/// ### Params
///
/// * `values` - The sample to reduce.
/// * `window` - Width of the trailing window, at least 2.
///
/// ### Returns
///
/// One local standard deviation per input position.
pub fn rolling_standard_deviation(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if window < 2 {
        return Err(StatsError::InsufficientSample {
            required: 2,
            actual: window,
        });
    }

    let result = values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let lo = (i + 1).saturating_sub(window);
            if i + 1 - lo < 2 {
                0.0
            } else {
                let (_, m2, count) = centred_moments(&values[lo..=i]);
                (m2 / (count - 1.0)).sqrt()
            }
        })
        .collect();

    Ok(result)
}

/// Calculate the asymmetry (Fisher-Pearson skewness) of a sample.
///
/// Third standardised moment: the mean cubed deviation over the cube
/// of the sample standard deviation. An all-equal sample reports zero
/// asymmetry rather than the undefined 0/0 ratio.
///
/// ### Params
///
/// * `values` - The sample to reduce.
///
/// ### Returns
///
/// The skewness, or `InsufficientSample` when n < 2.
pub fn asymmetry(values: &[f64]) -> Result<f64> {
    let sd = standard_deviation(values)?;
    if sd == 0.0 {
        return Ok(0.0);
    }

    let mean_val = mean(values)?;
    let n = values.len() as f64;
    let third_moment: f64 = values.iter().map(|v| (v - mean_val).powi(3)).sum::<f64>() / n;

    Ok(third_moment / sd.powi(3))
}

/// Calculate the excess kurtosis of a sample.
///
/// Fourth standardised moment minus 3. An all-equal sample reports
/// zero rather than the undefined 0/0 ratio.
///
/// ### Params
///
/// * `values` - The sample to reduce.
///
/// ### Returns
///
/// The excess kurtosis, or `InsufficientSample` when n < 2.
pub fn kurtosis(values: &[f64]) -> Result<f64> {
    let sd = standard_deviation(values)?;
    if sd == 0.0 {
        return Ok(0.0);
    }

    let mean_val = mean(values)?;
    let n = values.len() as f64;
    let fourth_moment: f64 = values.iter().map(|v| (v - mean_val).powi(4)).sum::<f64>() / n;

    Ok(fourth_moment / sd.powi(4) - 3.0)
}

//////////////////////
// Variance shares  //
//////////////////////

/// Fraction of the total variance carried by each component.
///
/// ### Params
///
/// * `variances` - Per-component variances.
///
/// ### Returns
///
/// Per-component fractions summing to one. `DegenerateDistribution`
/// when the total variance is zero.
pub fn explained_variance(variances: &[f64]) -> Result<Vec<f64>> {
    if variances.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let total: f64 = variances.iter().sum();
    if total == 0.0 {
        return Err(StatsError::DegenerateDistribution {
            reason: "total variance is zero",
        });
    }

    Ok(variances.iter().map(|v| v / total).collect())
}

/// Percent change of each element against its predecessor.
///
/// The first element reports zero; a zero predecessor contributes zero
/// rather than an infinite ratio.
pub fn variation_percentage(values: &[f64]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let mut result = vec![0.0; values.len()];
    for i in 1..values.len() {
        if values[i - 1] != 0.0 {
            result[i] = (values[i] - values[i - 1]) * 100.0 / values[i - 1];
        }
    }

    Ok(result)
}

///////////////////
// Index queries //
///////////////////

/// Position of the minimum, first occurrence on ties.
pub fn minimal_index<T: PartialOrd + Copy>(values: &[T]) -> Result<usize> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let mut min_index = 0;
    for (i, value) in values.iter().enumerate().skip(1) {
        if *value < values[min_index] {
            min_index = i;
        }
    }

    Ok(min_index)
}

/// Position of the maximum, first occurrence on ties.
pub fn maximal_index<T: PartialOrd + Copy>(values: &[T]) -> Result<usize> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let mut max_index = 0;
    for (i, value) in values.iter().enumerate().skip(1) {
        if *value > values[max_index] {
            max_index = i;
        }
    }

    Ok(max_index)
}

/// Positions of the k smallest values, ordered by value with
/// first-occurrence tie-break.
///
/// ### Params
///
/// * `values` - The sample to query.
/// * `k` - Number of positions to return.
///
/// ### Returns
///
/// The k positions, or `InsufficientSample` when k exceeds the sample
/// size.
pub fn minimal_indices(values: &[f64], k: usize) -> Result<Vec<usize>> {
    if k > values.len() {
        return Err(StatsError::InsufficientSample {
            required: k,
            actual: values.len(),
        });
    }

    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    // Stable sort keeps the original order for equal values.
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    Ok(indexed.into_iter().take(k).map(|(i, _)| i).collect())
}

/// Positions of the k biggest values, ordered by value with
/// first-occurrence tie-break.
pub fn maximal_indices(values: &[f64], k: usize) -> Result<Vec<usize>> {
    if k > values.len() {
        return Err(StatsError::InsufficientSample {
            required: k,
            actual: values.len(),
        });
    }

    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    Ok(indexed.into_iter().take(k).map(|(i, _)| i).collect())
}

//////////////////
// Descriptives //
//////////////////

/// Calculate the four-number summary of a sample in one pass.
///
/// ### Params
///
/// * `values` - The sample to summarise.
///
/// ### Returns
///
/// The `Descriptives` of the sample, or `InsufficientSample` when
/// n < 2 (the standard deviation needs two values).
pub fn descriptives(values: &[f64]) -> Result<Descriptives> {
    if values.len() < 2 {
        return Err(StatsError::InsufficientSample {
            required: 2,
            actual: values.len(),
        });
    }

    let mut min_val = values[0];
    let mut max_val = values[0];
    for &value in &values[1..] {
        if value < min_val {
            min_val = value;
        }
        if value > max_val {
            max_val = value;
        }
    }

    let (mean_val, m2, count) = centred_moments(values);

    Ok(Descriptives {
        name: None,
        minimum: min_val,
        maximum: max_val,
        mean: mean_val,
        standard_deviation: (m2 / (count - 1.0)).sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes() {
        let values = vec![3.0, 1.0, 4.0, 1.0, 5.0];

        assert_eq!(minimum(&values).unwrap(), 1.0);
        assert_eq!(maximum(&values).unwrap(), 5.0);
        assert_eq!(range(&values).unwrap(), 4.0);
        assert_eq!(minimum::<f64>(&[]), Err(StatsError::EmptyInput));

        // integer and time-valued sequences share the generic path
        assert_eq!(minimum(&[3_i64, 1, 2]).unwrap(), 1);
        assert_eq!(maximum(&[3_i64, 1, 2]).unwrap(), 3);
    }

    #[test]
    fn test_strongest_keeps_sign() {
        assert_eq!(strongest(&[1.0, -7.0, 3.0]).unwrap(), -7.0);
        assert_eq!(strongest(&[2.0, -1.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_summary_of_one_to_five() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        assert_eq!(minimum(&values).unwrap(), 1.0);
        assert_eq!(maximum(&values).unwrap(), 5.0);
        assert!((mean(&values).unwrap() - 3.0).abs() < 1e-12);
        assert!((variance(&values).unwrap() - 2.5).abs() < 1e-12);
        assert!((standard_deviation(&values).unwrap() - 2.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_mean_between() {
        let values = vec![1.0, 2.0, 3.0, 4.0];

        assert!((mean_between(&values, 1, 3).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(mean_between(&values, 1, 1), Err(StatsError::EmptyInput));
        assert!(matches!(
            mean_between(&values, 0, 5),
            Err(StatsError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[5.0, 1.0, 3.0]).unwrap(), 3.0);
        assert!((median(&[4.0, 1.0, 3.0, 2.0]).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(median(&[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_variance_conventions() {
        // reference value under the n - 1 estimator
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((variance(&values).unwrap() - 4.571428571428571).abs() < 1e-10);

        assert!(matches!(
            variance(&[1.0]),
            Err(StatsError::InsufficientSample {
                required: 2,
                actual: 1
            })
        ));

        // zero iff all elements are equal
        assert_eq!(variance(&[3.0, 3.0, 3.0]).unwrap(), 0.0);
        assert!(variance(&[3.0, 3.1, 3.0]).unwrap() > 0.0);
    }

    #[test]
    fn test_rolling_standard_deviation() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        let local = rolling_standard_deviation(&values, 2).unwrap();

        assert_eq!(local.len(), 4);
        assert_eq!(local[0], 0.0);
        for sd in &local[1..] {
            // any two consecutive integers have sd 1/sqrt(2)
            assert!((sd - 0.5_f64.sqrt()).abs() < 1e-12);
        }

        assert!(matches!(
            rolling_standard_deviation(&values, 1),
            Err(StatsError::InsufficientSample { .. })
        ));
    }

    #[test]
    fn test_moments() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        // symmetric sample
        assert!(asymmetry(&values).unwrap().abs() < 1e-12);
        // fourth moment 6.8 over sd^4 6.25, minus 3
        assert!((kurtosis(&values).unwrap() - (6.8 / 6.25 - 3.0)).abs() < 1e-12);

        // right-skewed sample
        assert!(asymmetry(&[1.0, 1.0, 1.0, 10.0]).unwrap() > 0.0);

        // degenerate samples report zero, not NaN
        assert_eq!(asymmetry(&[2.0, 2.0, 2.0]).unwrap(), 0.0);
        assert_eq!(kurtosis(&[2.0, 2.0, 2.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_weighted_mean() {
        let values = vec![1.0, 3.0];
        assert!((weighted_mean(&values, &[1.0, 3.0]).unwrap() - 2.5).abs() < 1e-12);

        assert!(matches!(
            weighted_mean(&values, &[1.0]),
            Err(StatsError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            weighted_mean(&values, &[1.0, -1.0]),
            Err(StatsError::DegenerateDistribution { .. })
        ));
    }

    #[test]
    fn test_explained_variance() {
        let shares = explained_variance(&[3.0, 1.0]).unwrap();
        assert!((shares[0] - 0.75).abs() < 1e-12);
        assert!((shares.iter().sum::<f64>() - 1.0).abs() < 1e-12);

        assert!(matches!(
            explained_variance(&[0.0, 0.0]),
            Err(StatsError::DegenerateDistribution { .. })
        ));
    }

    #[test]
    fn test_variation_percentage() {
        let changes = variation_percentage(&[2.0, 3.0, 0.0, 4.0]).unwrap();

        assert_eq!(changes[0], 0.0);
        assert!((changes[1] - 50.0).abs() < 1e-12);
        assert!((changes[2] + 100.0).abs() < 1e-12);
        // zero predecessor contributes zero
        assert_eq!(changes[3], 0.0);
    }

    #[test]
    fn test_index_queries() {
        // first occurrence of the tied minimum
        assert_eq!(minimal_index(&[3.0, 1.0, 4.0, 1.0, 5.0]).unwrap(), 1);
        assert_eq!(maximal_index(&[3.0, 5.0, 4.0, 5.0]).unwrap(), 1);

        assert_eq!(
            minimal_indices(&[3.0, 1.0, 4.0, 1.0, 5.0], 3).unwrap(),
            vec![1, 3, 0]
        );
        assert_eq!(
            maximal_indices(&[3.0, 1.0, 4.0, 1.0, 5.0], 2).unwrap(),
            vec![4, 2]
        );
        assert!(matches!(
            minimal_indices(&[1.0], 2),
            Err(StatsError::InsufficientSample { .. })
        ));
    }

    #[test]
    fn test_descriptives() {
        let summary = descriptives(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert_eq!(summary.minimum, 1.0);
        assert_eq!(summary.maximum, 5.0);
        assert!((summary.mean - 3.0).abs() < 1e-12);
        assert!((summary.standard_deviation - 2.5_f64.sqrt()).abs() < 1e-12);
        assert!(summary.minimum <= summary.mean && summary.mean <= summary.maximum);

        let named = summary.with_name("feature_0");
        assert_eq!(named.name.as_deref(), Some("feature_0"));

        // [-1, 0, 1] has mean 0 and sample variance (1 + 0 + 1) / 2 = 1
        let scaled = descriptives(&[-1.0, 0.0, 1.0]).unwrap();
        assert!(scaled.has_minimum_minus_one_maximum_one());
        assert!(scaled.has_mean_zero_standard_deviation_one());
    }

    #[test]
    fn test_summary_identity_on_random_samples() {
        use rand::prelude::*;

        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..25 {
            let n = rng.random_range(2..200);
            let values: Vec<f64> = (0..n).map(|_| rng.random_range(-50.0..50.0)).collect();
            let summary = descriptives(&values).unwrap();

            assert!(summary.minimum <= summary.mean);
            assert!(summary.mean <= summary.maximum);
            assert!(summary.standard_deviation >= 0.0);
        }
    }

    #[test]
    fn test_purity() {
        let values = vec![0.3, 1.7, -2.2, 9.1];

        assert_eq!(mean(&values).unwrap(), mean(&values).unwrap());
        assert_eq!(variance(&values).unwrap(), variance(&values).unwrap());
        assert_eq!(kurtosis(&values).unwrap(), kurtosis(&values).unwrap());
    }
}
