//! Descriptive-statistics and distribution-analysis engine for dense
//! one- and two-dimensional numeric data.
//!
//! Vectors are plain slices; matrices are `faer` matrices with rows as
//! samples and columns as variables. Every operation is a pure,
//! synchronous function: summary statistics, rank-based statistics,
//! frequency histograms, goodness-of-fit distances against reference
//! distributions, and missing-value-aware variants throughout. Column
//! aggregations dispatch the independent per-column reductions through
//! rayon.

pub mod core;
pub mod error;

pub use crate::core::histograms::{Histogram, DEFAULT_BINS};
pub use crate::core::order::BoxPlot;
pub use crate::core::reductions::Descriptives;
pub use crate::error::{Result, StatsError};
