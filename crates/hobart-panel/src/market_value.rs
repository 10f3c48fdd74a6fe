//! Issuer market-value aggregation and the one-period value lag.
//!
//! Market value is computed per issue as |price| × shares outstanding
//! (absolute price because the provider marks bid/ask-midpoint
//! estimates with a negative sign), rolled up to the issuer, and lagged
//! one period per issue to form the value-weight basis.
//!
//! The rollup keeps a single representative row per issuer-period: the
//! issue with the largest market value, carrying the issuer total. Ties
//! go to the lowest issue id so the selection never depends on row
//! order.

use hobart_data::schema;
use hobart_traits::{ConfiguredTransform, Transform, TransformError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for [`MarketValue`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketValueConfig {
    /// Multiplier applied to |price| × shares. The default turns a
    /// price in dollars and shares in thousands into millions.
    pub scale: f64,
}

impl Default for MarketValueConfig {
    fn default() -> Self {
        Self { scale: 1e-3 }
    }
}

/// Computes issue market values and rolls them up per issuer-period.
///
/// Output keeps one row per issuer-period — the representative issue —
/// with `mkt_val` holding the issuer total. Rows without a computable
/// issue value (delisting-only months with no price) drop out here.
#[derive(Debug)]
pub struct MarketValue {
    config: MarketValueConfig,
}

impl Transform for MarketValue {
    fn name(&self) -> &str {
        "market_value"
    }

    fn required_columns(&self) -> &[&str] {
        &[
            schema::ISSUE_ID,
            schema::ISSUER_ID,
            schema::YEAR,
            schema::MONTH,
            schema::PRICE,
            schema::SHARES_OUT,
        ]
    }

    fn apply(&self, data: LazyFrame) -> Result<LazyFrame, TransformError> {
        if !self.config.scale.is_finite() || self.config.scale <= 0.0 {
            return Err(TransformError::InvalidConfig {
                stage: self.name().to_string(),
                reason: format!("scale must be positive and finite, got {}", self.config.scale),
            });
        }

        let group = [col(schema::ISSUER_ID), col(schema::YEAR), col(schema::MONTH)];

        let issue_val = col(schema::PRICE).abs()
            * col(schema::SHARES_OUT).cast(DataType::Float64)
            * lit(self.config.scale);

        let result = data
            .with_columns([issue_val.alias("issue_val")])
            .with_columns([
                col("issue_val").sum().over(group.clone()).alias("issuer_total"),
                col("issue_val").max().over(group.clone()).alias("issuer_max"),
            ])
            // Lowest issue id among the rows tied at the maximum.
            .with_columns([when(col("issue_val").eq(col("issuer_max")))
                .then(col(schema::ISSUE_ID))
                .otherwise(lit(NULL))
                .min()
                .over(group)
                .alias("rep_issue")])
            .filter(
                col("issue_val")
                    .is_not_null()
                    .and(col(schema::ISSUE_ID).eq(col("rep_issue"))),
            )
            .with_columns([col("issuer_total").alias(schema::MKT_VAL)])
            .drop(["issue_val", "issuer_total", "issuer_max", "rep_issue"]);

        Ok(result)
    }
}

impl ConfiguredTransform for MarketValue {
    type Config = MarketValueConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

impl Default for MarketValue {
    fn default() -> Self {
        Self::with_config(MarketValueConfig::default())
    }
}

/// Configuration for [`LaggedValue`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaggedValueConfig {
    /// Backfill the first observed period of an issue with
    /// `mkt_val / (1 + ret_nodiv)` (default: true). Disable for panels
    /// like treasuries where no price-only return exists and the first
    /// observation simply has no weight.
    pub synthetic_first: bool,
}

impl Default for LaggedValueConfig {
    fn default() -> Self {
        Self {
            synthetic_first: true,
        }
    }
}

/// Adds the previous-period market value per issue.
///
/// The lag is positional within each issue's sorted history: after a
/// reporting gap the most recent observed value is used. Rows with no
/// computable lag are dropped.
#[derive(Debug)]
pub struct LaggedValue {
    config: LaggedValueConfig,
}

impl Transform for LaggedValue {
    fn name(&self) -> &str {
        "lagged_value"
    }

    fn required_columns(&self) -> &[&str] {
        if self.config.synthetic_first {
            &[
                schema::ISSUE_ID,
                schema::DATE,
                schema::MKT_VAL,
                schema::RET_NODIV,
            ]
        } else {
            &[schema::ISSUE_ID, schema::DATE, schema::MKT_VAL]
        }
    }

    fn apply(&self, data: LazyFrame) -> Result<LazyFrame, TransformError> {
        let sorted = data.sort([schema::ISSUE_ID, schema::DATE], Default::default());

        let lag = col(schema::MKT_VAL)
            .shift(lit(1))
            .over([col(schema::ISSUE_ID)]);

        let lag = if self.config.synthetic_first {
            let first_obs = col(schema::DATE)
                .cum_count(false)
                .over([col(schema::ISSUE_ID)])
                .eq(lit(1));
            let synthetic = col(schema::MKT_VAL) / (lit(1.0) + col(schema::RET_NODIV));
            when(first_obs).then(synthetic).otherwise(lag)
        } else {
            lag
        };

        let result = sorted
            .with_columns([lag.alias(schema::LAG_MKT_VAL)])
            .filter(col(schema::LAG_MKT_VAL).is_not_null());

        Ok(result)
    }
}

impl ConfiguredTransform for LaggedValue {
    type Config = LaggedValueConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

impl Default for LaggedValue {
    fn default() -> Self {
        Self::with_config(LaggedValueConfig::default())
    }
}
