#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-research/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod pipeline;

// Re-export main types from sub-crates
pub use hobart_data as data;
pub use hobart_panel as panel;
pub use hobart_portfolio as portfolio;
pub use hobart_stats as stats;

// Re-export the stage contract
pub use hobart_traits::{ConfiguredTransform, Transform, TransformError};

pub use config::StudyConfig;
pub use pipeline::{
    Pipeline, PipelineError, market_panel_pipeline, momentum_pipeline, run_market_panel,
    run_momentum_panel,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
