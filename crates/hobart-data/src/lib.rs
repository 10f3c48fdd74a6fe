#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-research/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod clean;
pub mod error;
pub mod period;
pub mod schema;
pub mod store;
pub mod tables;

pub use clean::{UniverseFilter, UniverseFilterConfig};
pub use error::{DataError, Result};
pub use period::Period;
pub use store::{SnapshotFormat, SnapshotStore};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
