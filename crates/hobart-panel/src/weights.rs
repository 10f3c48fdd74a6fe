//! Holding-period value weights for annually rebalanced sorts.
//!
//! Portfolios formed each June hold their constituents for the
//! following July–June year. Within that year the value weight of an
//! issue is its lagged market value at the formation month, evolved
//! forward by cumulative price-only returns, so weights drift with
//! prices instead of resetting on every dividend or share change.

use hobart_data::schema;
use polars::prelude::*;

/// The July–June holding year containing a month: `year` for July
/// onward, `year - 1` before July.
pub fn holding_year() -> Expr {
    when(col(schema::MONTH).gt_eq(lit(7)))
        .then(col(schema::YEAR))
        .otherwise(col(schema::YEAR) - lit(1))
        .alias(schema::PORT_YEAR)
}

/// Add `port_year` and the within-year value weight `port_weight`.
///
/// Expects a panel carrying `lag_mkt_val` and `ret_nodiv`. July rows
/// weight by their own lagged market value; later months weight by the
/// July base evolved with lagged cumulative price-only returns. Issues
/// with no July observation in a holding year get a null weight, which
/// the caller filters with whatever positivity rule the sort wants.
pub fn holding_period_weights(monthly: LazyFrame) -> LazyFrame {
    let issue_year = [col(schema::ISSUE_ID), col(schema::PORT_YEAR)];

    let port_month = when(col(schema::MONTH).gt_eq(lit(7)))
        .then(col(schema::MONTH) - lit(6))
        .otherwise(col(schema::MONTH) + lit(6));

    monthly
        .sort([schema::ISSUE_ID, schema::DATE], Default::default())
        .with_columns([holding_year()])
        .with_columns([port_month.alias("port_month")])
        .with_columns([(lit(1.0) + col(schema::RET_NODIV))
            .cum_prod(false)
            .over(issue_year.clone())
            .alias("cum_gross_nodiv")])
        .with_columns([col("cum_gross_nodiv")
            .shift(lit(1))
            .over([col(schema::ISSUE_ID)])
            .alias("lag_cum_gross")])
        .with_columns([when(col("port_month").eq(lit(1)))
            .then(col(schema::LAG_MKT_VAL))
            .otherwise(lit(NULL))
            .max()
            .over(issue_year)
            .alias("base_val")])
        .with_columns([when(col("port_month").eq(lit(1)))
            .then(col(schema::LAG_MKT_VAL))
            .otherwise(col("base_val") * col("lag_cum_gross"))
            .alias(schema::PORT_WEIGHT)])
        .drop(["port_month", "cum_gross_nodiv", "lag_cum_gross", "base_val"])
}
