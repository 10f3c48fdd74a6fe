//! Value- and equal-weighted portfolio returns.

use hobart_data::schema;
use polars::prelude::*;

/// Weighted-average expression: Σ(w·x) / Σw over the current group.
pub fn weighted_mean(value: &str, weight: &str) -> Expr {
    (col(value) * col(weight)).sum() / col(weight).sum()
}

/// Per-period aggregate of a whole panel: total weight basis,
/// equal-weighted return, and value-weighted return.
///
/// Output columns: `year`, `month`, `lag_mkt_val` (summed),
/// `ew_ret`, `vw_ret`; one row per period, sorted.
pub fn market_aggregate(panel: LazyFrame) -> LazyFrame {
    panel
        .group_by([col(schema::YEAR), col(schema::MONTH)])
        .agg([
            col(schema::LAG_MKT_VAL).sum().alias(schema::LAG_MKT_VAL),
            col(schema::RET).mean().alias(schema::EW_RET),
            weighted_mean(schema::RET, schema::LAG_MKT_VAL).alias(schema::VW_RET),
        ])
        .sort([schema::YEAR, schema::MONTH], Default::default())
}

/// Per-period, per-label portfolio returns.
///
/// Records with a null label (unclassifiable in their period) are
/// excluded from every aggregate. Output
/// columns: `year`, `month`, the label, `lag_mkt_val`, `ew_ret`,
/// `vw_ret`.
pub fn portfolio_returns(panel: LazyFrame, label: &str, weight: &str) -> LazyFrame {
    panel
        .filter(col(label).is_not_null())
        .group_by([col(schema::YEAR), col(schema::MONTH), col(label)])
        .agg([
            col(weight).sum().alias(schema::LAG_MKT_VAL),
            col(schema::RET).mean().alias(schema::EW_RET),
            weighted_mean(schema::RET, weight).alias(schema::VW_RET),
        ])
        .sort([schema::YEAR, schema::MONTH, label], Default::default())
}

/// Per-period returns for a two-way sort (e.g. size × value).
pub fn two_way_returns(panel: LazyFrame, first: &str, second: &str, weight: &str) -> LazyFrame {
    panel
        .filter(col(first).is_not_null().and(col(second).is_not_null()))
        .group_by([
            col(schema::YEAR),
            col(schema::MONTH),
            col(first),
            col(second),
        ])
        .agg([
            col(weight).sum().alias(schema::LAG_MKT_VAL),
            col(schema::RET).mean().alias(schema::EW_RET),
            weighted_mean(schema::RET, weight).alias(schema::VW_RET),
        ])
        .sort([schema::YEAR, schema::MONTH, first, second], Default::default())
}

/// Subtract the 30-day riskless rate from each of `columns`, adding
/// `{column}_xs` alongside.
///
/// `riskless` must carry `year`, `month`, and `rf_30d`; the join is an
/// inner join so only periods with a published rate survive.
pub fn excess_returns(data: LazyFrame, columns: &[&str], riskless: LazyFrame) -> LazyFrame {
    let keys = [col(schema::YEAR), col(schema::MONTH)];

    let excess: Vec<Expr> = columns
        .iter()
        .map(|c| (col(*c) - col(schema::RF_30D)).alias(format!("{c}_xs")))
        .collect();

    data.join(
        riskless.select([
            col(schema::YEAR),
            col(schema::MONTH),
            col(schema::RF_30D),
        ]),
        keys.clone(),
        keys,
        JoinArgs::new(JoinType::Inner),
    )
    .with_columns(excess)
}
