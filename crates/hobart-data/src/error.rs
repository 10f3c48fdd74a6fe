//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot not found in the store
    #[error("Snapshot `{name}` not found under {dir}")]
    SnapshotNotFound {
        /// Logical table name that was requested
        name: String,
        /// Store directory that was searched
        dir: String,
    },

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Invalid date range
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start of the range
        start: String,
        /// End of the range
        end: String,
    },

    /// A raw table is missing a column the coercion step requires
    #[error("Table `{table}` is missing required column `{column}`")]
    MissingColumn {
        /// Logical table name
        table: String,
        /// The absent column
        column: String,
    },

    /// Stage error raised by a cleaning transform
    #[error("Transform error: {0}")]
    Transform(#[from] hobart_traits::TransformError),
}
