//! Error taxonomy shared by every reducer and aggregation in the crate.

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Failures reported by the statistical reducers.
///
/// All variants are local computation failures reported to the
/// immediate caller. None is fatal; callers recover with their own
/// fallback. Aggregations over matrix columns fail the whole call on
/// the first failing column and never return partial results.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A zero-length sample was passed to a reducer requiring at least
    /// one value.
    #[error("empty input: at least one value is required")]
    EmptyInput,

    /// The sample holds fewer values than the statistic needs.
    #[error("insufficient sample: requires at least {required} values, got {actual}")]
    InsufficientSample { required: usize, actual: usize },

    /// Paired sequences (values/weights, per-column subsets) disagree
    /// in length.
    #[error("dimension mismatch: expected length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A supplied row/column/missing index references a nonexistent
    /// position.
    #[error("index {index} out of range for extent {extent}")]
    IndexOutOfRange { index: usize, extent: usize },

    /// A normalisation term collapsed to zero, leaving the statistic
    /// undefined with no defined fallback.
    #[error("degenerate distribution: {reason}")]
    DegenerateDistribution { reason: &'static str },
}
