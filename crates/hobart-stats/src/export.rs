//! Export of summary tables to CSV and JSON.

use crate::summary::{PerformanceSummary, SummaryTable};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Writes summary rows to disk in a chosen format.
#[derive(Debug, Clone, Copy)]
pub struct Exporter {
    format: ExportFormat,
}

impl Exporter {
    /// Create an exporter for `format`.
    pub const fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    /// The configured format.
    pub const fn format(&self) -> ExportFormat {
        self.format
    }

    /// Write `rows` to `path`.
    pub fn write_summaries<P: AsRef<Path>>(
        &self,
        path: P,
        rows: &[PerformanceSummary],
    ) -> Result<(), ExportError> {
        match self.format {
            ExportFormat::Csv => {
                let mut writer = csv::Writer::from_path(path)?;
                for row in rows {
                    writer.serialize(row)?;
                }
                writer.flush()?;
                Ok(())
            }
            ExportFormat::Json => {
                let mut file = File::create(path)?;
                let json = serde_json::to_string(rows)?;
                file.write_all(json.as_bytes())?;
                Ok(())
            }
            ExportFormat::PrettyJson => {
                let mut file = File::create(path)?;
                let json = serde_json::to_string_pretty(rows)?;
                file.write_all(json.as_bytes())?;
                Ok(())
            }
        }
    }

    /// Write a whole table, using its rows.
    pub fn write_table<P: AsRef<Path>>(
        &self,
        path: P,
        table: &SummaryTable,
    ) -> Result<(), ExportError> {
        self.write_summaries(path, &table.rows)
    }
}
