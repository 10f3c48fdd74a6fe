#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-research/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod adjust;
pub mod bonds;
pub mod error;
pub mod fundamentals;
pub mod integrity;
pub mod market_value;
pub mod momentum;
pub mod weights;

pub use adjust::{ReturnAdjuster, ReturnAdjusterConfig, merge_delistings};
pub use bonds::{bond_panel, bond_panel_with_lag};
pub use error::{PanelError, Result};
pub use fundamentals::{book_equity, formation_frame};
pub use integrity::{verify_complete, verify_no_sentinels, verify_panel};
pub use market_value::{LaggedValue, LaggedValueConfig, MarketValue, MarketValueConfig};
pub use momentum::{RankingReturn, RankingReturnConfig};
pub use weights::{holding_period_weights, holding_year};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
