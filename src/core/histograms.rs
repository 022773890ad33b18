use crate::core::reductions::{maximum, minimum};
use crate::error::{Result, StatsError};

/// Bin count used across the crate when callers have no preference.
pub const DEFAULT_BINS: usize = 10;

////////////////
// Structures //
////////////////

/// Binned frequency distribution of a sample.
///
/// Bins are ascending and non-overlapping; every part has one entry
/// per bin and the frequencies sum to the number of binned samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Midpoint of every bin.
    pub centers: Vec<f64>,
    /// Lower bound of every bin.
    pub minimums: Vec<f64>,
    /// Upper bound of every bin.
    pub maximums: Vec<f64>,
    /// Population of every bin.
    pub frequencies: Vec<usize>,
}

impl Histogram {
    /// Assemble a histogram from its parts, validating that all four
    /// sequences describe the same number of bins.
    pub fn new(
        centers: Vec<f64>,
        minimums: Vec<f64>,
        maximums: Vec<f64>,
        frequencies: Vec<usize>,
    ) -> Result<Self> {
        if centers.is_empty() {
            return Err(StatsError::EmptyInput);
        }
        for len in [minimums.len(), maximums.len(), frequencies.len()] {
            if len != centers.len() {
                return Err(StatsError::DimensionMismatch {
                    expected: centers.len(),
                    actual: len,
                });
            }
        }

        Ok(Histogram {
            centers,
            minimums,
            maximums,
            frequencies,
        })
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.centers.len()
    }

    /// Number of bins holding no sample.
    pub fn count_empty_bins(&self) -> usize {
        self.frequencies.iter().filter(|&&f| f == 0).count()
    }

    /// Smallest bin population.
    pub fn minimum_frequency(&self) -> usize {
        self.frequencies.iter().copied().min().unwrap_or(0)
    }

    /// Biggest bin population.
    pub fn maximum_frequency(&self) -> usize {
        self.frequencies.iter().copied().max().unwrap_or(0)
    }

    /// Index of the most populated bin, first occurrence on ties.
    pub fn most_populated_bin(&self) -> usize {
        let max_frequency = self.maximum_frequency();
        self.frequencies
            .iter()
            .position(|&f| f == max_frequency)
            .unwrap_or(0)
    }

    /// Centers of every bin achieving the minimal frequency.
    pub fn minimal_centers(&self) -> Vec<f64> {
        let min_frequency = self.minimum_frequency();
        self.centers
            .iter()
            .zip(self.frequencies.iter())
            .filter(|(_, &f)| f == min_frequency)
            .map(|(&c, _)| c)
            .collect()
    }

    /// Centers of every bin achieving the maximal frequency.
    pub fn maximal_centers(&self) -> Vec<f64> {
        let max_frequency = self.maximum_frequency();
        self.centers
            .iter()
            .zip(self.frequencies.iter())
            .filter(|(_, &f)| f == max_frequency)
            .map(|(&c, _)| c)
            .collect()
    }

    /// Bin a value falls into: the bin with the nearest center,
    /// boundary ties resolving to the lower bin.
    pub fn bin_of(&self, value: f64) -> usize {
        let mut best = 0;
        let mut best_distance = (value - self.centers[0]).abs();

        for (i, center) in self.centers.iter().enumerate().skip(1) {
            let distance = (value - center).abs();
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }

        best
    }

    /// Population of the bin a value falls into.
    pub fn frequency_of(&self, value: f64) -> usize {
        self.frequencies[self.bin_of(value)]
    }
}

///////////////
// Functions //
///////////////

fn check_bins(bins: usize) -> Result<()> {
    if bins < 1 {
        return Err(StatsError::InsufficientSample {
            required: 1,
            actual: bins,
        });
    }
    Ok(())
}

// Single-bin fallback for all-equal samples: one bin spanning [v, v]
// holding every sample.
fn degenerate_histogram(value: f64, count: usize) -> Histogram {
    Histogram {
        centers: vec![value],
        minimums: vec![value],
        maximums: vec![value],
        frequencies: vec![count],
    }
}

/// Build an equal-width frequency histogram of a sample.
///
/// Bin width is `(max - min) / bins`; a sample lands in bin
/// `floor((value - min) / width)`, clamped into the last bin so the
/// maximum is counted. An all-equal sample degenerates to a single
/// `[v, v]` bin holding every sample.
///
/// ### Params
///
/// * `values` - The sample to bin.
/// * `bins` - Number of bins, at least 1 (`DEFAULT_BINS` = 10 is the
///   conventional choice).
///
/// ### Returns
///
/// The histogram, or `EmptyInput` / `InsufficientSample` for an empty
/// sample or a zero bin count.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram> {
    check_bins(bins)?;

    let min_val = minimum(values)?;
    let max_val = maximum(values)?;

    if min_val == max_val {
        return Ok(degenerate_histogram(min_val, values.len()));
    }

    let width = (max_val - min_val) / bins as f64;

    let mut frequencies = vec![0_usize; bins];
    for &value in values {
        let bin = (((value - min_val) / width) as usize).min(bins - 1);
        frequencies[bin] += 1;
    }

    let minimums: Vec<f64> = (0..bins).map(|i| min_val + i as f64 * width).collect();
    let maximums: Vec<f64> = (0..bins).map(|i| min_val + (i + 1) as f64 * width).collect();
    let centers: Vec<f64> = (0..bins)
        .map(|i| min_val + (i as f64 + 0.5) * width)
        .collect();

    Histogram::new(centers, minimums, maximums, frequencies)
}

/// Build a histogram whose edge grid is anchored on a reference value.
///
/// Bin count and width match `histogram`; the edges are shifted so one
/// bin boundary coincides exactly with `center`. Samples falling past
/// the shifted grid clamp into the end bins, preserving the frequency
/// sum.
///
/// ### Params
///
/// * `values` - The sample to bin.
/// * `center` - Value one bin boundary must land on.
/// * `bins` - Number of bins, at least 1.
///
/// ### Returns
///
/// The anchored histogram.
pub fn histogram_centered(values: &[f64], center: f64, bins: usize) -> Result<Histogram> {
    check_bins(bins)?;

    let min_val = minimum(values)?;
    let max_val = maximum(values)?;

    if min_val == max_val {
        return Ok(degenerate_histogram(min_val, values.len()));
    }

    let width = (max_val - min_val) / bins as f64;
    // lowest grid edge: the largest point of center's edge grid that
    // does not exceed the sample minimum
    let start = center + width * ((min_val - center) / width).floor();

    let mut frequencies = vec![0_usize; bins];
    for &value in values {
        let bin = (((value - start) / width) as usize).min(bins - 1);
        frequencies[bin] += 1;
    }

    let minimums: Vec<f64> = (0..bins).map(|i| start + i as f64 * width).collect();
    let maximums: Vec<f64> = (0..bins).map(|i| start + (i + 1) as f64 * width).collect();
    let centers: Vec<f64> = (0..bins)
        .map(|i| start + (i as f64 + 0.5) * width)
        .collect();

    Histogram::new(centers, minimums, maximums, frequencies)
}

/// Build a histogram of an integer-valued sample.
///
/// When the distinct values fit within the requested bin count, every
/// distinct value gets its own exact bin; otherwise the values are
/// binned with the continuous equal-width rule.
///
/// ### Params
///
/// * `values` - The integer sample to bin.
/// * `bins` - Upper bound on the number of exact bins.
///
/// ### Returns
///
/// The histogram.
pub fn histogram_integers(values: &[i64], bins: usize) -> Result<Histogram> {
    check_bins(bins)?;
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let mut distinct: Vec<i64> = values.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    if distinct.len() > bins {
        let as_reals: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        return histogram(&as_reals, bins);
    }

    let frequencies: Vec<usize> = distinct
        .iter()
        .map(|&d| values.iter().filter(|&&v| v == d).count())
        .collect();
    let centers: Vec<f64> = distinct.iter().map(|&d| d as f64).collect();

    Histogram::new(centers.clone(), centers.clone(), centers, frequencies)
}

/// Build the two-bin histogram of a boolean sample.
///
/// The bins are the exact values {false, true} with centers {0, 1}.
pub fn histogram_booleans(values: &[bool]) -> Result<Histogram> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let true_count = values.iter().filter(|&&v| v).count();
    let frequencies = vec![values.len() - true_count, true_count];
    let centers = vec![0.0, 1.0];

    Histogram::new(centers.clone(), centers.clone(), centers, frequencies)
}

/// Total binned sample count per histogram, index-aligned with the
/// input.
pub fn total_frequencies(histograms: &[Histogram]) -> Vec<usize> {
    histograms
        .iter()
        .map(|h| h.frequencies.iter().sum())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_three_bins() {
        let hist = histogram(&[1.0, 1.0, 1.0, 2.0, 2.0, 3.0], 3).unwrap();

        assert_eq!(hist.frequencies, vec![3, 2, 1]);
        assert!((hist.centers[0] - (1.0 + 1.0 / 3.0)).abs() < 1e-12);
        assert!((hist.centers[1] - 2.0).abs() < 1e-12);
        assert!((hist.centers[2] - (3.0 - 1.0 / 3.0)).abs() < 1e-12);
        assert_eq!(hist.bins(), 3);
    }

    #[test]
    fn test_histogram_frequency_sum() {
        let values = vec![0.3, -1.2, 4.5, 2.2, 2.3, 9.9, -0.4, 3.3];

        for bins in 1..=6 {
            let hist = histogram(&values, bins).unwrap();
            let total: usize = hist.frequencies.iter().sum();
            assert_eq!(total, values.len());
        }
    }

    #[test]
    fn test_histogram_degenerate_sample() {
        let hist = histogram(&[5.0, 5.0, 5.0, 5.0], 10).unwrap();

        assert_eq!(hist.bins(), 1);
        assert_eq!(hist.minimums, vec![5.0]);
        assert_eq!(hist.maximums, vec![5.0]);
        assert_eq!(hist.frequencies, vec![4]);
    }

    #[test]
    fn test_histogram_rejects_bad_shapes() {
        assert_eq!(histogram(&[], 10), Err(StatsError::EmptyInput));
        assert!(matches!(
            histogram(&[1.0, 2.0], 0),
            Err(StatsError::InsufficientSample { .. })
        ));
        assert!(matches!(
            Histogram::new(vec![0.0, 1.0], vec![0.0], vec![0.5, 1.5], vec![1, 2]),
            Err(StatsError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_histogram_centered_anchors_an_edge() {
        let values: Vec<f64> = (0..10).map(|v| v as f64).collect();
        let hist = histogram_centered(&values, 0.5, 3).unwrap();

        assert_eq!(hist.bins(), 3);
        // some boundary lands exactly on the anchor
        let on_edge = hist
            .minimums
            .iter()
            .chain(hist.maximums.iter())
            .any(|&edge| (edge - 0.5).abs() < 1e-12);
        assert!(on_edge);
        // clamping preserves the frequency sum
        assert_eq!(hist.frequencies.iter().sum::<usize>(), values.len());
    }

    #[test]
    fn test_histogram_integers_exact_bins() {
        let hist = histogram_integers(&[2, 2, 5, 7, 5, 2], 10).unwrap();

        assert_eq!(hist.centers, vec![2.0, 5.0, 7.0]);
        assert_eq!(hist.frequencies, vec![3, 2, 1]);
        assert_eq!(hist.minimums, hist.maximums);

        // too many distinct values falls back to continuous binning
        let wide: Vec<i64> = (0..100).collect();
        let hist = histogram_integers(&wide, 4).unwrap();
        assert_eq!(hist.bins(), 4);
        assert_eq!(hist.frequencies.iter().sum::<usize>(), 100);
    }

    #[test]
    fn test_histogram_booleans() {
        let hist = histogram_booleans(&[true, false, true, true]).unwrap();

        assert_eq!(hist.centers, vec![0.0, 1.0]);
        assert_eq!(hist.frequencies, vec![1, 3]);
    }

    #[test]
    fn test_derived_queries() {
        let hist = Histogram::new(
            vec![1.0, 2.0, 3.0, 4.0],
            vec![0.5, 1.5, 2.5, 3.5],
            vec![1.5, 2.5, 3.5, 4.5],
            vec![2, 0, 5, 0],
        )
        .unwrap();

        assert_eq!(hist.count_empty_bins(), 2);
        assert_eq!(hist.minimum_frequency(), 0);
        assert_eq!(hist.maximum_frequency(), 5);
        assert_eq!(hist.most_populated_bin(), 2);
        assert_eq!(hist.minimal_centers(), vec![2.0, 4.0]);
        assert_eq!(hist.maximal_centers(), vec![3.0]);

        assert_eq!(hist.bin_of(3.1), 2);
        assert_eq!(hist.frequency_of(3.1), 5);
        // far outside the grid clamps to the closest end bin
        assert_eq!(hist.bin_of(-10.0), 0);
        assert_eq!(hist.bin_of(99.0), 3);
    }

    #[test]
    fn test_total_frequencies() {
        let first = histogram(&[1.0, 2.0, 3.0], 2).unwrap();
        let second = histogram_booleans(&[true, false]).unwrap();

        assert_eq!(total_frequencies(&[first, second]), vec![3, 2]);
    }
}
