//! Delisting merge and return adjustment.
//!
//! An issue that leaves the sample mid-month has its final proceeds
//! reported as a separate delisting return. The panel carries one row
//! per issue-month, so the ordinary and delisting tables are merged on
//! the month key and folded into a single adjusted return:
//!
//! - both present: `(1 + ret) * (1 + delist_ret) - 1`
//! - only the delisting return: use it as-is
//! - only the ordinary return: use it as-is
//! - neither: the row is dropped

use hobart_data::schema;
use hobart_traits::{ConfiguredTransform, Transform, TransformError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Outer-merge the security-month and delisting tables on the month key.
///
/// Both inputs must already be canonicalized to month-end (see
/// `hobart_data::tables`), so a delisting lands on the same key as the
/// issue's final price row whenever one exists. Delisting months with
/// no price row come through as rows of their own, with null venue and
/// type codes.
pub fn merge_delistings(securities: LazyFrame, delistings: LazyFrame) -> LazyFrame {
    let keys = [
        col(schema::ISSUE_ID),
        col(schema::DATE),
        col(schema::YEAR),
        col(schema::MONTH),
    ];

    securities
        .join(
            delistings.select([
                col(schema::ISSUE_ID),
                col(schema::DATE),
                col(schema::YEAR),
                col(schema::MONTH),
                col(schema::DELIST_RET),
                col(schema::DELIST_CODE),
            ]),
            keys.clone(),
            keys,
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
        .sort([schema::ISSUE_ID, schema::DATE], Default::default())
}

/// Configuration for [`ReturnAdjuster`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnAdjusterConfig {
    /// Drop rows where neither return is available (default: true).
    pub drop_missing: bool,
}

impl Default for ReturnAdjusterConfig {
    fn default() -> Self {
        Self { drop_missing: true }
    }
}

/// Folds ordinary and delisting returns into one adjusted return.
///
/// The adjusted value replaces the `ret` column in place; the delisting
/// columns are left on the frame for downstream filters that key off
/// the delisting code.
#[derive(Debug)]
pub struct ReturnAdjuster {
    config: ReturnAdjusterConfig,
}

impl Transform for ReturnAdjuster {
    fn name(&self) -> &str {
        "return_adjuster"
    }

    fn required_columns(&self) -> &[&str] {
        &[schema::RET, schema::DELIST_RET]
    }

    fn apply(&self, data: LazyFrame) -> Result<LazyFrame, TransformError> {
        let both = col(schema::RET)
            .is_not_null()
            .and(col(schema::DELIST_RET).is_not_null());
        let delist_only = col(schema::RET)
            .is_null()
            .and(col(schema::DELIST_RET).is_not_null());

        let compounded = (lit(1.0) + col(schema::RET)) * (lit(1.0) + col(schema::DELIST_RET))
            - lit(1.0);

        let mut result = data.with_columns([when(both)
            .then(compounded)
            .when(delist_only)
            .then(col(schema::DELIST_RET))
            .otherwise(col(schema::RET))
            .alias(schema::RET)]);

        if self.config.drop_missing {
            result = result.filter(col(schema::RET).is_not_null());
        }

        Ok(result)
    }
}

impl ConfiguredTransform for ReturnAdjuster {
    type Config = ReturnAdjusterConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

impl Default for ReturnAdjuster {
    fn default() -> Self {
        Self::with_config(ReturnAdjusterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> LazyFrame {
        df!(
            schema::ISSUE_ID => [1i64, 2, 3, 4],
            schema::RET => [Some(0.10), None, Some(0.03), None],
            schema::DELIST_RET => [Some(-1.0), Some(-0.35), None, None],
        )
        .unwrap()
        .lazy()
    }

    fn adjusted() -> Vec<(i64, f64)> {
        let out = ReturnAdjuster::default()
            .apply(panel())
            .unwrap()
            .collect()
            .unwrap();
        let ids = out.column(schema::ISSUE_ID).unwrap().i64().unwrap();
        let rets = out.column(schema::RET).unwrap().f64().unwrap();
        ids.into_no_null_iter()
            .zip(rets.into_no_null_iter())
            .collect()
    }

    #[test]
    fn test_total_loss_delisting_compounds_to_minus_one() {
        let rows = adjusted();
        // (1.10)(0.0) - 1 = -1.0
        assert_eq!(rows[0], (1, -1.0));
    }

    #[test]
    fn test_delisting_only_and_ordinary_only() {
        let rows = adjusted();
        assert_eq!(rows[1], (2, -0.35));
        assert_eq!(rows[2], (3, 0.03));
    }

    #[test]
    fn test_both_missing_row_dropped() {
        let rows = adjusted();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|(id, _)| *id != 4));
    }

    #[test]
    fn test_compounding_is_exact() {
        let out = ReturnAdjuster::default()
            .apply(
                df!(
                    schema::ISSUE_ID => [1i64],
                    schema::RET => [0.123456],
                    schema::DELIST_RET => [-0.654321],
                )
                .unwrap()
                .lazy(),
            )
            .unwrap()
            .collect()
            .unwrap();

        let got = out
            .column(schema::RET)
            .unwrap()
            .f64()
            .unwrap()
            .get(0)
            .unwrap();
        let want = (1.0 + 0.123456) * (1.0 - 0.654321) - 1.0;
        assert!((got - want).abs() < 1e-10);
    }

    #[test]
    fn test_keep_missing_when_configured() {
        let adjuster = ReturnAdjuster::with_config(ReturnAdjusterConfig {
            drop_missing: false,
        });
        let out = adjuster.apply(panel()).unwrap().collect().unwrap();
        assert_eq!(out.height(), 4);
    }
}
