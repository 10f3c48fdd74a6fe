//! Per-period percentile breakpoints and interval classification.
//!
//! A sort classifies a continuous metric into ordinal buckets using
//! percentile cut values computed from a *reference* universe — for the
//! classic sorts, NYSE-listed issues only — while every record in the
//! full universe gets classified. Breakpoints are recomputed
//! independently for each period.
//!
//! Intervals are right-closed and bounded by ±∞: with cut values
//! `b_1 <= ... <= b_k`, a metric `x` lands in bucket
//! `1 + #{i : x > b_i}`, so `k` cuts always produce `k + 1` buckets
//! covering the whole line and no finite metric goes unclassified.

use crate::error::{PortfolioError, Result};
use hobart_data::schema;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// The subset of the panel breakpoints are measured on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceUniverse {
    /// Restrict to one listing venue (default: NYSE).
    pub venue: Option<i32>,
    /// Require at least this many periods of history in the `history`
    /// column, when the frame carries one (default: none).
    pub min_history: Option<u32>,
}

impl Default for ReferenceUniverse {
    fn default() -> Self {
        Self {
            venue: Some(schema::venue::NYSE),
            min_history: None,
        }
    }
}

impl ReferenceUniverse {
    /// The whole panel: no venue or seasoning restriction.
    pub const fn full() -> Self {
        Self {
            venue: None,
            min_history: None,
        }
    }

    /// Filter expression selecting the reference subset, if any
    /// restriction is configured.
    pub fn filter_expr(&self) -> Option<Expr> {
        let mut expr: Option<Expr> = None;
        if let Some(venue) = self.venue {
            expr = Some(col(schema::VENUE).eq(lit(venue)));
        }
        if let Some(min_history) = self.min_history {
            let seasoned = col("history").gt_eq(lit(min_history));
            expr = Some(match expr {
                Some(e) => e.and(seasoned),
                None => seasoned,
            });
        }
        expr
    }
}

/// Name of the `i`-th breakpoint column (1-based).
fn bp_column(i: usize) -> String {
    format!("bp_{i}")
}

/// Reject empty, out-of-range, or unordered percentile sets.
fn validate_percentiles(percentiles: &[f64]) -> Result<()> {
    if percentiles.is_empty() {
        return Err(PortfolioError::InvalidPercentiles {
            reason: "at least one percentile is required".to_string(),
        });
    }
    for p in percentiles {
        if !(*p > 0.0 && *p < 1.0) {
            return Err(PortfolioError::InvalidPercentiles {
                reason: format!("percentile {p} is outside (0, 1)"),
            });
        }
    }
    if percentiles.windows(2).any(|w| w[0] > w[1]) {
        return Err(PortfolioError::InvalidPercentiles {
            reason: "percentiles must be non-decreasing".to_string(),
        });
    }
    Ok(())
}

/// Compute per-period percentile breakpoints of `metric` over the
/// reference universe.
///
/// Returns one row per period with columns `year`, `month`,
/// `bp_1..bp_k`, using linear-interpolation quantiles. Periods where
/// the reference subset is empty simply have no row, so records from
/// such periods classify to null downstream.
pub fn period_breakpoints(
    data: LazyFrame,
    metric: &str,
    percentiles: &[f64],
    reference: &ReferenceUniverse,
) -> Result<LazyFrame> {
    validate_percentiles(percentiles)?;

    let mut reference_lf = data;
    if let Some(filter) = reference.filter_expr() {
        reference_lf = reference_lf.filter(filter);
    }

    let cuts: Vec<Expr> = percentiles
        .iter()
        .enumerate()
        .map(|(i, p)| {
            col(metric)
                .quantile(lit(*p), QuantileMethod::Linear)
                .alias(bp_column(i + 1))
        })
        .collect();

    let breakpoints = reference_lf
        .group_by([col(schema::YEAR), col(schema::MONTH)])
        .agg(cuts)
        .sort([schema::YEAR, schema::MONTH], Default::default());

    Ok(breakpoints)
}

/// Classify every record of `data` against per-period `breakpoints`.
///
/// `cuts` is the number of breakpoint columns; the resulting ordinal
/// bucket (1-based, `cuts + 1` buckets) lands in `label`. Records with
/// a null metric, or from a period with no breakpoint row, get a null
/// label.
pub fn classify(data: LazyFrame, metric: &str, breakpoints: LazyFrame, cuts: usize, label: &str) -> LazyFrame {
    let keys = [col(schema::YEAR), col(schema::MONTH)];

    let mut bucket = lit(1i32);
    for i in 1..=cuts {
        bucket = bucket + col(metric).gt(col(bp_column(i))).cast(DataType::Int32);
    }

    let drop_cols: Vec<String> = (1..=cuts).map(bp_column).collect();

    data.join(breakpoints, keys.clone(), keys, JoinArgs::new(JoinType::Left))
        .with_columns([bucket.alias(label)])
        .drop(drop_cols)
}

/// Classify records into `bins` equal-probability buckets per period,
/// using quantiles of the record's own universe.
///
/// This is the quantile-binning path; [`period_breakpoints`] +
/// [`classify`] with a full reference universe must produce the same
/// assignment, a property pinned by the sorting integration tests.
pub fn assign_by_quantiles(data: LazyFrame, metric: &str, bins: usize, label: &str) -> Result<LazyFrame> {
    if bins < 2 {
        return Err(PortfolioError::InvalidPercentiles {
            reason: format!("quantile binning needs at least 2 bins, got {bins}"),
        });
    }

    let keys = [col(schema::YEAR), col(schema::MONTH)];

    let mut bucket = lit(1i32);
    for i in 1..bins {
        let p = i as f64 / bins as f64;
        let cut = col(metric)
            .quantile(lit(p), QuantileMethod::Linear)
            .over(keys.clone());
        bucket = bucket + col(metric).gt(cut).cast(DataType::Int32);
    }

    Ok(data.with_columns([bucket.alias(label)]))
}
