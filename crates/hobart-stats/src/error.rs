//! Error types for statistics.

use thiserror::Error;

/// Result type for statistics operations.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors that can occur while computing statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Too few observations for the requested estimator
    #[error("`{label}`: {needed} observations needed, got {got}")]
    InsufficientData {
        /// Series the estimator was asked about.
        label: String,
        /// Minimum observations the estimator needs.
        needed: usize,
        /// Observations actually provided.
        got: usize,
    },

    /// Paired series have different lengths
    #[error("series lengths differ: {left} vs {right}")]
    LengthMismatch {
        /// Length of the left series.
        left: usize,
        /// Length of the right series.
        right: usize,
    },

    /// A series is degenerate (zero variance) where spread is required
    #[error("`{0}` has zero variance")]
    ZeroVariance(String),

    /// Polars error while extracting a column
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
