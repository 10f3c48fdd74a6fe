//! Book equity and book-to-market formation.
//!
//! Annual fundamentals are folded into book equity with the standard
//! preferred-stock fallback chain, then matched against December market
//! value to produce a book-to-market ratio for the July–June holding
//! year that starts six months after the fiscal year closes.

use hobart_data::schema;
use polars::prelude::*;

/// Derive book equity on an annual fundamentals frame.
///
/// Preferred stock uses redemption value, falling back to liquidation
/// value, then par value, then zero. Deferred taxes and investment tax
/// credit default to zero when missing. Non-positive book equity is
/// nulled out rather than carried into a ratio.
///
/// Also adds a `history` column counting fiscal years observed so far
/// per issue, which breakpoint reference universes use as a seasoning
/// filter.
pub fn book_equity(fundamentals: LazyFrame) -> LazyFrame {
    let preferred = col(schema::PREF_REDEEM)
        .fill_null(col(schema::PREF_LIQ))
        .fill_null(col(schema::PREF_PAR))
        .fill_null(lit(0.0));

    let deferred = col(schema::DEFERRED_TAXES).fill_null(lit(0.0));

    let be = col(schema::SHE) - preferred + deferred;

    fundamentals
        .sort([schema::ISSUE_ID, schema::FISCAL_YEAR], Default::default())
        .with_columns([
            when(be.clone().gt(lit(0.0)))
                .then(be)
                .otherwise(lit(NULL))
                .alias(schema::BOOK_EQUITY),
            col(schema::FISCAL_YEAR)
                .cum_count(false)
                .over([col(schema::ISSUE_ID)])
                .alias("history"),
        ])
}

/// Build the June-formation frame joining fundamentals to market values.
///
/// For fiscal year `y`, book equity is divided by the issuer market
/// value at December of `y`, and the result is stamped with
/// `port_year = y + 1`: it governs the holding year running July of
/// `y+1` through June of `y+2`. June-of-`port_year` market value and
/// venue ride along for size sorts and reference-universe filters.
/// Rows with negative or missing book-to-market are dropped.
pub fn formation_frame(monthly: LazyFrame, fundamentals: LazyFrame) -> LazyFrame {
    let december = monthly
        .clone()
        .filter(col(schema::MONTH).eq(lit(12)))
        .select([
            col(schema::ISSUE_ID),
            (col(schema::YEAR) + lit(1)).alias(schema::PORT_YEAR),
            col(schema::MKT_VAL).alias("dec_mkt_val"),
        ]);

    let june = monthly.filter(col(schema::MONTH).eq(lit(6))).select([
        col(schema::ISSUE_ID),
        col(schema::YEAR).alias(schema::PORT_YEAR),
        col(schema::MKT_VAL).alias("june_mkt_val"),
        col(schema::VENUE),
    ]);

    let equity = book_equity(fundamentals).select([
        col(schema::ISSUE_ID),
        (col(schema::FISCAL_YEAR) + lit(1)).alias(schema::PORT_YEAR),
        col(schema::BOOK_EQUITY),
        col("history"),
    ]);

    let keys = [col(schema::ISSUE_ID), col(schema::PORT_YEAR)];

    june.join(
        december,
        keys.clone(),
        keys.clone(),
        JoinArgs::new(JoinType::Inner),
    )
    .join(equity, keys.clone(), keys, JoinArgs::new(JoinType::Inner))
    .with_columns([(col(schema::BOOK_EQUITY) / col("dec_mkt_val")).alias(schema::BTM)])
    .filter(col(schema::BTM).is_not_null().and(col(schema::BTM).gt_eq(lit(0.0))))
    .sort([schema::ISSUE_ID, schema::PORT_YEAR], Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fundamentals() -> LazyFrame {
        df!(
            schema::ISSUE_ID => [1i64, 1, 2, 3],
            schema::FISCAL_YEAR => [2019i32, 2020, 2020, 2020],
            schema::SHE => [Some(500.0), Some(520.0), Some(80.0), Some(10.0)],
            schema::PREF_REDEEM => [Some(20.0), None, None, None],
            schema::PREF_LIQ => [None, Some(15.0), None, None],
            schema::PREF_PAR => [None, None, None, Some(40.0)],
            schema::DEFERRED_TAXES => [Some(5.0), None, None, None],
        )
        .unwrap()
        .lazy()
    }

    #[test]
    fn test_preferred_fallback_chain() {
        let out = book_equity(fundamentals()).collect().unwrap();
        let be = out.column(schema::BOOK_EQUITY).unwrap().f64().unwrap();

        // Redemption value with deferred taxes: 500 - 20 + 5.
        assert!((be.get(0).unwrap() - 485.0).abs() < 1e-10);
        // Liquidation fallback, no deferred taxes: 520 - 15.
        assert!((be.get(1).unwrap() - 505.0).abs() < 1e-10);
        // No preferred at all: straight shareholders' equity.
        assert!((be.get(2).unwrap() - 80.0).abs() < 1e-10);
        // Par fallback pushes equity negative: nulled out.
        assert!(be.get(3).is_none());
    }

    #[test]
    fn test_history_counts_fiscal_years() {
        let out = book_equity(fundamentals()).collect().unwrap();
        let history: Vec<_> = out
            .column("history")
            .unwrap()
            .u32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(history, vec![1, 2, 1, 1]);
    }

    #[test]
    fn test_formation_joins_december_and_june() {
        let monthly = df!(
            schema::ISSUE_ID => [1i64, 1, 1],
            schema::YEAR => [2020i32, 2021, 2021],
            schema::MONTH => [12i32, 6, 12],
            schema::MKT_VAL => [1000.0, 1100.0, 900.0],
            schema::VENUE => [1i32, 1, 1],
        )
        .unwrap()
        .lazy();

        let out = formation_frame(monthly, fundamentals()).collect().unwrap();
        assert_eq!(out.height(), 1);

        let port_year = out
            .column(schema::PORT_YEAR)
            .unwrap()
            .i32()
            .unwrap()
            .get(0)
            .unwrap();
        assert_eq!(port_year, 2021);

        // Fiscal 2020 equity (505) over December-2020 value (1000).
        let btm = out.column(schema::BTM).unwrap().f64().unwrap().get(0).unwrap();
        assert!((btm - 0.505).abs() < 1e-10);

        let june = out
            .column("june_mkt_val")
            .unwrap()
            .f64()
            .unwrap()
            .get(0)
            .unwrap();
        assert!((june - 1100.0).abs() < 1e-10);
    }
}
