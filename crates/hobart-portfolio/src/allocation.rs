//! Two-asset allocation weighting.
//!
//! Builds the classic stock/bond comparison set from per-period excess
//! returns and lagged market values: the value-weighted combination, a
//! fixed 60/40 mix, and risk-parity portfolios weighted by inverse
//! trailing volatility — unlevered (weights sum to one) and levered to
//! match the ex-post volatility of the value-weighted benchmark.

use crate::error::{PortfolioError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock excess return column expected on the input frame.
pub const STOCK_XS_RET: &str = "stock_xs_ret";
/// Bond excess return column expected on the input frame.
pub const BOND_XS_RET: &str = "bond_xs_ret";
/// Stock lagged-value column expected on the input frame.
pub const STOCK_LAG_MV: &str = "stock_lag_mv";
/// Bond lagged-value column expected on the input frame.
pub const BOND_LAG_MV: &str = "bond_lag_mv";

/// Value-weighted combination, added by [`allocate`].
pub const VW_XS_RET: &str = "vw_xs_ret";
/// Fixed-mix combination, added by [`allocate`].
pub const FIXED_MIX_XS_RET: &str = "fixed_mix_xs_ret";
/// Unlevered risk parity, added by [`allocate`].
pub const UNLEVERED_RP_XS_RET: &str = "unlevered_rp_xs_ret";
/// Levered risk parity, added by [`allocate`].
pub const LEVERED_RP_XS_RET: &str = "levered_rp_xs_ret";

/// Configuration for [`allocate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Trailing window for the volatility estimate, in months
    /// (default: 36). The estimate at month t uses t-window..t-1.
    pub vol_window: usize,
    /// Stock weight of the fixed mix (default: 0.6).
    pub fixed_stock_weight: f64,
    /// Relative tolerance for the levered vol match (default: 1e-6).
    pub vol_tolerance: f64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            vol_window: 36,
            fixed_stock_weight: 0.6,
            vol_tolerance: 1e-6,
        }
    }
}

fn std_of(frame: &DataFrame, column: &str) -> Result<f64> {
    frame
        .column(column)?
        .f64()?
        .std(1)
        .ok_or_else(|| PortfolioError::EmptySeries(column.to_string()))
}

/// Compute the allocation comparison set on a two-asset monthly frame.
///
/// Expects `stock_xs_ret`, `bond_xs_ret`, `stock_lag_mv`,
/// `bond_lag_mv`. Months without a full trailing volatility window for
/// both assets are dropped, so every output series covers the same
/// holding period. The levered series is verified to match the
/// value-weighted benchmark's ex-post volatility; a mismatch is a fatal
/// integrity error.
pub fn allocate(frame: DataFrame, config: &AllocationConfig) -> Result<DataFrame> {
    let rolling = RollingOptionsFixedWindow {
        window_size: config.vol_window,
        min_periods: config.vol_window,
        ..Default::default()
    };

    let inv_sigma = |column: &str, name: &str| -> Expr {
        (lit(1.0) / col(column).rolling_std(rolling.clone()).shift(lit(1))).alias(name)
    };

    let vw = (col(STOCK_XS_RET) * col(STOCK_LAG_MV) + col(BOND_XS_RET) * col(BOND_LAG_MV))
        / (col(STOCK_LAG_MV) + col(BOND_LAG_MV));

    let w = config.fixed_stock_weight;
    let fixed_mix = col(STOCK_XS_RET) * lit(w) + col(BOND_XS_RET) * lit(1.0 - w);

    let rp_raw = col("stock_inv_sigma") * col(STOCK_XS_RET)
        + col("bond_inv_sigma") * col(BOND_XS_RET);
    let unlevered_k = lit(1.0) / (col("stock_inv_sigma") + col("bond_inv_sigma"));

    let collected = frame
        .lazy()
        .with_columns([
            vw.alias(VW_XS_RET),
            fixed_mix.alias(FIXED_MIX_XS_RET),
            inv_sigma(STOCK_XS_RET, "stock_inv_sigma"),
            inv_sigma(BOND_XS_RET, "bond_inv_sigma"),
        ])
        .filter(
            col("stock_inv_sigma")
                .is_not_null()
                .and(col("bond_inv_sigma").is_not_null()),
        )
        .with_columns([
            rp_raw.clone().alias("rp_raw"),
            (unlevered_k * rp_raw).alias(UNLEVERED_RP_XS_RET),
        ])
        .collect()?;

    let benchmark_vol = std_of(&collected, VW_XS_RET)?;
    let raw_vol = std_of(&collected, "rp_raw")?;
    if raw_vol == 0.0 {
        return Err(PortfolioError::EmptySeries("rp_raw".to_string()));
    }
    let levered_k = benchmark_vol / raw_vol;

    let result = collected
        .lazy()
        .with_columns([(col("rp_raw") * lit(levered_k)).alias(LEVERED_RP_XS_RET)])
        .drop(["stock_inv_sigma", "bond_inv_sigma", "rp_raw"])
        .collect()?;

    let levered_vol = std_of(&result, LEVERED_RP_XS_RET)?;
    if (levered_vol - benchmark_vol).abs() > config.vol_tolerance * benchmark_vol.abs() {
        return Err(PortfolioError::VolatilityMismatch {
            benchmark: benchmark_vol,
            portfolio: levered_vol,
        });
    }

    Ok(result)
}
