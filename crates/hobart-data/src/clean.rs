//! Universe cleaning stage.
//!
//! Applies the listing-venue / security-type membership filters and the
//! sample date window to a merged security-month panel. Delisting rows
//! carry null venue and type codes, so they are exempt from the
//! membership filters and identified by a non-null delisting code
//! instead; dropping them here would throw away the delisting return
//! before the adjustment stage can compound it.

use crate::period::Period;
use crate::schema;
use hobart_traits::{ConfiguredTransform, Transform, TransformError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for [`UniverseFilter`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseFilterConfig {
    /// Listing-venue codes kept in the sample.
    pub venues: Vec<i32>,
    /// Security-type codes kept in the sample.
    pub sec_types: Vec<i32>,
    /// First period of the sample window, inclusive.
    pub start: Period,
    /// Last period of the sample window, inclusive.
    pub end: Period,
}

impl Default for UniverseFilterConfig {
    fn default() -> Self {
        Self {
            venues: vec![
                schema::venue::NYSE,
                schema::venue::AMEX,
                schema::venue::NASDAQ,
                schema::venue::NYSE_WHEN_ISSUED,
                schema::venue::AMEX_WHEN_ISSUED,
                schema::venue::NASDAQ_WHEN_ISSUED,
            ],
            sec_types: vec![schema::sec_type::COMMON, schema::sec_type::COMMON_PLAIN],
            start: Period { year: 1926, month: 1 },
            end: Period { year: 2023, month: 12 },
        }
    }
}

/// Restricts a merged security-month panel to the configured universe.
#[derive(Debug)]
pub struct UniverseFilter {
    config: UniverseFilterConfig,
}

/// Scalar period index expression: months since year zero.
fn period_index() -> Expr {
    col(schema::YEAR) * lit(12) + col(schema::MONTH) - lit(1)
}

impl Transform for UniverseFilter {
    fn name(&self) -> &str {
        "universe_filter"
    }

    fn required_columns(&self) -> &[&str] {
        &[
            schema::VENUE,
            schema::SEC_TYPE,
            schema::DELIST_CODE,
            schema::YEAR,
            schema::MONTH,
        ]
    }

    fn apply(&self, data: LazyFrame) -> Result<LazyFrame, TransformError> {
        if self.config.start > self.config.end {
            return Err(TransformError::InvalidConfig {
                stage: self.name().to_string(),
                reason: format!(
                    "sample window starts at {} but ends at {}",
                    self.config.start, self.config.end
                ),
            });
        }

        let venues = Series::new("venues".into(), self.config.venues.clone());
        let sec_types = Series::new("sec_types".into(), self.config.sec_types.clone());

        let is_delisting = col(schema::DELIST_CODE).is_not_null();
        let in_universe = col(schema::VENUE)
            .is_in(lit(venues))
            .and(col(schema::SEC_TYPE).is_in(lit(sec_types)));

        let result = data
            .filter(is_delisting.or(in_universe))
            .filter(period_index().gt_eq(lit(self.config.start.index())))
            .filter(period_index().lt_eq(lit(self.config.end.index())));

        Ok(result)
    }
}

impl ConfiguredTransform for UniverseFilter {
    type Config = UniverseFilterConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

impl Default for UniverseFilter {
    fn default() -> Self {
        Self::with_config(UniverseFilterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> LazyFrame {
        df!(
            schema::ISSUE_ID => [1i64, 2, 3, 4, 5],
            schema::YEAR => [2000i32, 2000, 2000, 1920, 2000],
            schema::MONTH => [6i32, 6, 6, 6, 6],
            schema::VENUE => [Some(1i32), Some(4), None, Some(1), Some(1)],
            schema::SEC_TYPE => [Some(10i32), Some(10), None, Some(10), Some(73)],
            schema::DELIST_CODE => [None, None, Some(500i32), None, None],
        )
        .unwrap()
        .lazy()
    }

    #[test]
    fn test_keeps_universe_and_delisting_rows() {
        let filter = UniverseFilter::default();
        let out = filter.apply(panel()).unwrap().collect().unwrap();

        let ids: Vec<_> = out
            .column(schema::ISSUE_ID)
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();

        // Issue 2: off-universe venue. Issue 4: before the window.
        // Issue 5: off-universe security type. Issue 3 survives on the
        // delisting exemption despite null codes.
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_rejects_inverted_window() {
        let config = UniverseFilterConfig {
            start: Period { year: 2020, month: 1 },
            end: Period { year: 2019, month: 1 },
            ..Default::default()
        };
        let filter = UniverseFilter::with_config(config);
        assert!(filter.apply(panel()).is_err());
    }

    #[test]
    fn test_required_columns_validate() {
        let filter = UniverseFilter::default();
        let df = df!(schema::VENUE => [1i32]).unwrap();
        assert!(filter.validate(&df.schema()).is_err());
    }
}
