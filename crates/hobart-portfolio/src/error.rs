//! Error types for portfolio formation.

use thiserror::Error;

/// Result type for portfolio operations.
pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Errors that can occur during portfolio formation.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Stage error raised by a formation transform
    #[error("Transform error: {0}")]
    Transform(#[from] hobart_traits::TransformError),

    /// Requested percentile set is unusable
    #[error("Invalid percentiles: {reason}")]
    InvalidPercentiles {
        /// Why the percentile set was rejected.
        reason: String,
    },

    /// Levered risk parity failed to match the benchmark volatility
    #[error(
        "integrity violation: levered risk parity volatility {portfolio} does not match \
         benchmark volatility {benchmark}"
    )]
    VolatilityMismatch {
        /// Ex-post volatility of the value-weighted benchmark.
        benchmark: f64,
        /// Ex-post volatility of the levered portfolio.
        portfolio: f64,
    },

    /// A series needed for eager computation came back empty
    #[error("Empty series: {0}")]
    EmptySeries(String),
}
