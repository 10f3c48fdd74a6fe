//! Momentum ranking returns.
//!
//! Stocks are ranked on their cumulative return from twelve months
//! before to two months before the formation month — the most recent
//! month is skipped to stay clear of short-term reversal. The ranking
//! value is the rolling sum of log gross returns over that window,
//! computed per issue and requiring a complete window.

use hobart_data::schema;
use hobart_traits::{ConfiguredTransform, Transform, TransformError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for [`RankingReturn`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReturnConfig {
    /// Months skipped immediately before formation (default: 2, so the
    /// window ends at t-2).
    pub skip: i64,
    /// Window length in months (default: 11, covering t-12..t-2).
    pub window: usize,
}

impl Default for RankingReturnConfig {
    fn default() -> Self {
        Self { skip: 2, window: 11 }
    }
}

/// Adds the cumulative log-return ranking column per issue.
#[derive(Debug)]
pub struct RankingReturn {
    config: RankingReturnConfig,
}

impl Transform for RankingReturn {
    fn name(&self) -> &str {
        "ranking_return"
    }

    fn required_columns(&self) -> &[&str] {
        &[schema::ISSUE_ID, schema::DATE, schema::RET]
    }

    fn apply(&self, data: LazyFrame) -> Result<LazyFrame, TransformError> {
        if self.config.window == 0 {
            return Err(TransformError::InvalidConfig {
                stage: self.name().to_string(),
                reason: "window must be at least one month".to_string(),
            });
        }

        let rank_ret = (lit(1.0) + col(schema::RET))
            .log(std::f64::consts::E)
            .shift(lit(self.config.skip))
            .rolling_sum(RollingOptionsFixedWindow {
                window_size: self.config.window,
                min_periods: self.config.window,
                ..Default::default()
            })
            .over([col(schema::ISSUE_ID)])
            .alias(schema::RANK_RET);

        let result = data
            .sort([schema::ISSUE_ID, schema::DATE], Default::default())
            .with_columns([rank_ret]);

        Ok(result)
    }
}

impl ConfiguredTransform for RankingReturn {
    type Config = RankingReturnConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

impl Default for RankingReturn {
    fn default() -> Self {
        Self::with_config(RankingReturnConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn month_end(year: i32, month: u32) -> NaiveDate {
        let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        NaiveDate::from_ymd_opt(ny, nm, 1).unwrap().pred_opt().unwrap()
    }

    fn issue_history(n: usize, ret: f64) -> LazyFrame {
        let dates: Vec<NaiveDate> = (0..n)
            .map(|i| month_end(2000 + (i / 12) as i32, (i % 12) as u32 + 1))
            .collect();
        df!(
            schema::ISSUE_ID => vec![1i64; n],
            schema::DATE => dates,
            schema::RET => vec![ret; n],
        )
        .unwrap()
        .lazy()
    }

    #[test]
    fn test_window_requires_thirteen_observations() {
        // skip 2 + window 11: the first defined ranking return sits on
        // the 13th row.
        let out = RankingReturn::default()
            .apply(issue_history(14, 0.01))
            .unwrap()
            .collect()
            .unwrap();

        let rank = out.column(schema::RANK_RET).unwrap().f64().unwrap();
        assert_eq!(rank.null_count(), 12);
        assert!(rank.get(12).is_some());
    }

    #[test]
    fn test_ranking_value_is_cumulative_log_return() {
        let out = RankingReturn::default()
            .apply(issue_history(13, 0.01))
            .unwrap()
            .collect()
            .unwrap();

        let got = out
            .column(schema::RANK_RET)
            .unwrap()
            .f64()
            .unwrap()
            .get(12)
            .unwrap();
        let want = 11.0 * (1.01f64).ln();
        assert!((got - want).abs() < 1e-12);
    }

    #[test]
    fn test_zero_window_rejected() {
        let stage = RankingReturn::with_config(RankingReturnConfig { skip: 2, window: 0 });
        let lf = issue_history(3, 0.0);
        assert!(stage.apply(lf).is_err());
    }
}
