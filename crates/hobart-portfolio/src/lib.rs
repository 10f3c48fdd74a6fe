#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-research/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod allocation;
pub mod breakpoints;
pub mod error;
pub mod factors;
pub mod returns;
pub mod sort;

pub use allocation::{AllocationConfig, allocate};
pub use breakpoints::{ReferenceUniverse, assign_by_quantiles, classify, period_breakpoints};
pub use error::{PortfolioError, Result};
pub use factors::{long_short, smb_hml};
pub use returns::{excess_returns, market_aggregate, portfolio_returns, two_way_returns};
pub use sort::{decile_sort, median_split, quantile_decile_sort, thirds_split};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
