#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-research/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod export;
pub mod summary;

pub use compare::SeriesComparison;
pub use error::{Result, StatsError};
pub use export::{ExportFormat, Exporter};
pub use summary::{PerformanceSummary, SummaryTable, column_values};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
