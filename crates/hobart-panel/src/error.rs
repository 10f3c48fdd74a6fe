//! Error types for panel construction.

use thiserror::Error;

/// Result type for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors that can occur during panel construction.
///
/// The integrity variants are fatal by design: a sentinel code or a
/// hole surviving to a finished panel means an upstream filter is
/// broken, and the run stops rather than aggregating bad data.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Stage error raised by a panel transform
    #[error("Transform error: {0}")]
    Transform(#[from] hobart_traits::TransformError),

    /// A provider sentinel code survived return adjustment
    #[error(
        "integrity violation: sentinel return {value} found in {rows} row(s) of column `{column}`"
    )]
    SentinelReturn {
        /// The sentinel code that was found.
        value: f64,
        /// Number of rows carrying it.
        rows: usize,
        /// Column that was scanned.
        column: String,
    },

    /// A column that must be complete has missing values
    #[error("integrity violation: column `{column}` has {rows} missing value(s)")]
    MissingValues {
        /// The incomplete column.
        column: String,
        /// Number of missing entries.
        rows: usize,
    },
}
