//! Coercion of raw table snapshots into the shared vocabulary.
//!
//! Raw snapshots come back from the warehouse with loose dtypes (ids as
//! floats, codes as floats with holes, dates at arbitrary days of the
//! month). Each function here checks the columns it needs, drops rows
//! whose mandatory fields are missing (documented policy, not an
//! error), casts everything to its canonical dtype, and moves dates to
//! month-end with `year`/`month` key columns alongside.

use crate::error::{DataError, Result};
use crate::schema;
use polars::prelude::*;

/// Verify that `df` carries every column in `columns`.
fn require_columns(df: &DataFrame, table: &str, columns: &[&str]) -> Result<()> {
    let schema = df.schema();
    for column in columns {
        if !schema.contains(column) {
            return Err(DataError::MissingColumn {
                table: table.to_string(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

/// Expressions shared by every monthly table: month-end date plus
/// integer `year`/`month` keys.
fn month_key_columns() -> [Expr; 3] {
    [
        col(schema::DATE).cast(DataType::Date).dt().month_end().alias(schema::DATE),
        col(schema::DATE)
            .cast(DataType::Date)
            .dt()
            .year()
            .cast(DataType::Int32)
            .alias(schema::YEAR),
        col(schema::DATE)
            .cast(DataType::Date)
            .dt()
            .month()
            .cast(DataType::Int32)
            .alias(schema::MONTH),
    ]
}

/// Coerce a raw security-month snapshot.
///
/// Rows missing the listing venue, security type, or shares outstanding
/// are dropped before the integer casts; those fields are mandatory for
/// every ordinary price row.
pub fn security_months(df: DataFrame) -> Result<LazyFrame> {
    require_columns(
        &df,
        "security_months",
        &[
            schema::ISSUE_ID,
            schema::ISSUER_ID,
            schema::DATE,
            schema::RET,
            schema::RET_NODIV,
            schema::PRICE,
            schema::SHARES_OUT,
            schema::VENUE,
            schema::SEC_TYPE,
        ],
    )?;

    let lf = df
        .lazy()
        .filter(
            col(schema::VENUE)
                .is_not_null()
                .and(col(schema::SEC_TYPE).is_not_null())
                .and(col(schema::SHARES_OUT).is_not_null()),
        )
        .with_columns([
            col(schema::ISSUE_ID).cast(DataType::Int64),
            col(schema::ISSUER_ID).cast(DataType::Int64),
            col(schema::VENUE).cast(DataType::Int32),
            col(schema::SEC_TYPE).cast(DataType::Int32),
            col(schema::SHARES_OUT).cast(DataType::Int64),
            col(schema::RET).cast(DataType::Float64),
            col(schema::RET_NODIV).cast(DataType::Float64),
            col(schema::PRICE).cast(DataType::Float64),
        ])
        .with_columns(month_key_columns())
        .sort([schema::ISSUE_ID, schema::DATE], Default::default());

    Ok(lf)
}

/// Coerce a raw delisting-event snapshot.
pub fn delistings(df: DataFrame) -> Result<LazyFrame> {
    require_columns(
        &df,
        "delistings",
        &[
            schema::ISSUE_ID,
            schema::DATE,
            schema::DELIST_RET,
            schema::DELIST_CODE,
        ],
    )?;

    let lf = df
        .lazy()
        .with_columns([
            col(schema::ISSUE_ID).cast(DataType::Int64),
            col(schema::DELIST_RET).cast(DataType::Float64),
            col(schema::DELIST_CODE).cast(DataType::Int32),
        ])
        .with_columns(month_key_columns())
        .sort([schema::ISSUE_ID, schema::DATE], Default::default());

    Ok(lf)
}

/// Coerce a raw bond-month snapshot.
///
/// Rows with a missing return are dropped; the `-99.0` sentinel the
/// provider writes when a price is missing on either side of the month
/// is *not* filtered here — the panel integrity check catches it so a
/// slipped sentinel fails loudly instead of polluting an aggregate.
pub fn bond_months(df: DataFrame) -> Result<LazyFrame> {
    require_columns(
        &df,
        "bond_months",
        &[schema::BOND_ID, schema::DATE, schema::RET, schema::FACE_OUT],
    )?;

    let lf = df
        .lazy()
        .with_columns([
            col(schema::BOND_ID).cast(DataType::String),
            col(schema::RET).cast(DataType::Float64),
            col(schema::FACE_OUT).cast(DataType::Float64),
        ])
        .with_columns(month_key_columns())
        .sort([schema::BOND_ID, schema::DATE], Default::default());

    Ok(lf)
}

/// Coerce a raw riskless-rate snapshot.
pub fn riskless(df: DataFrame) -> Result<LazyFrame> {
    require_columns(&df, "riskless", &[schema::DATE, schema::RF_30D])?;

    let has_90d = df.schema().contains(schema::RF_90D);
    let mut lf = df
        .lazy()
        .filter(col(schema::RF_30D).is_not_null())
        .with_columns([col(schema::RF_30D).cast(DataType::Float64)]);
    if has_90d {
        lf = lf.with_columns([col(schema::RF_90D).cast(DataType::Float64)]);
    }
    let lf = lf
        .with_columns(month_key_columns())
        .sort([schema::DATE], Default::default());

    Ok(lf)
}

/// Coerce a published benchmark-series snapshot.
///
/// `series` names the return columns expected alongside the date; they
/// are cast to `f64` and everything else is passed through untouched.
/// Benchmark tables are read-only inputs, merged on the period key and
/// never mutated.
pub fn benchmark(df: DataFrame, series: &[&str]) -> Result<LazyFrame> {
    require_columns(&df, "benchmark", &[schema::DATE])?;
    require_columns(&df, "benchmark", series)?;

    let casts: Vec<Expr> = series
        .iter()
        .map(|name| col(*name).cast(DataType::Float64))
        .collect();

    let lf = df
        .lazy()
        .with_columns(casts)
        .with_columns(month_key_columns())
        .sort([schema::DATE], Default::default());

    Ok(lf)
}

/// Coerce a raw annual-fundamentals snapshot.
///
/// Keyed by `issue_id` and `fiscal_year`; identifier linkage to the
/// equity panel is assumed resolved upstream by the warehouse.
pub fn fundamentals(df: DataFrame) -> Result<LazyFrame> {
    require_columns(
        &df,
        "fundamentals",
        &[
            schema::ISSUE_ID,
            schema::FISCAL_YEAR,
            schema::SHE,
            schema::PREF_REDEEM,
            schema::PREF_LIQ,
            schema::PREF_PAR,
            schema::DEFERRED_TAXES,
        ],
    )?;

    let lf = df
        .lazy()
        .with_columns([
            col(schema::ISSUE_ID).cast(DataType::Int64),
            col(schema::FISCAL_YEAR).cast(DataType::Int32),
            col(schema::SHE).cast(DataType::Float64),
            col(schema::PREF_REDEEM).cast(DataType::Float64),
            col(schema::PREF_LIQ).cast(DataType::Float64),
            col(schema::PREF_PAR).cast(DataType::Float64),
            col(schema::DEFERRED_TAXES).cast(DataType::Float64),
        ])
        .sort([schema::ISSUE_ID, schema::FISCAL_YEAR], Default::default());

    Ok(lf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn mid_month(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn raw_security_months() -> DataFrame {
        df!(
            schema::ISSUE_ID => [10001i64, 10001, 10002],
            schema::ISSUER_ID => [501i64, 501, 502],
            schema::DATE => [
                mid_month(2020, 1, 15),
                mid_month(2020, 2, 14),
                mid_month(2020, 1, 15),
            ],
            schema::RET => [Some(0.01), Some(0.02), None],
            schema::RET_NODIV => [Some(0.01), Some(0.015), None],
            schema::PRICE => [Some(10.0), Some(-10.2), Some(55.0)],
            schema::SHARES_OUT => [Some(1000i64), Some(1000), None],
            schema::VENUE => [Some(1i32), Some(1), Some(3)],
            schema::SEC_TYPE => [Some(10i32), Some(10), Some(11)],
        )
        .unwrap()
    }

    #[test]
    fn test_security_months_canonicalizes_dates() {
        let df = security_months(raw_security_months())
            .unwrap()
            .collect()
            .unwrap();

        // Third row dropped: shares outstanding missing.
        assert_eq!(df.height(), 2);

        let dates: Vec<_> = df
            .column(schema::DATE)
            .unwrap()
            .date()
            .unwrap()
            .as_date_iter()
            .flatten()
            .collect();
        assert_eq!(dates[0], mid_month(2020, 1, 31));
        assert_eq!(dates[1], mid_month(2020, 2, 29));

        let months: Vec<_> = df
            .column(schema::MONTH)
            .unwrap()
            .i32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(months, vec![1, 2]);
    }

    #[test]
    fn test_security_months_missing_column() {
        let df = df!(schema::ISSUE_ID => [1i64]).unwrap();
        let err = match security_months(df) {
            Ok(_) => panic!("expected missing-column error"),
            Err(e) => e,
        };
        match err {
            DataError::MissingColumn { table, .. } => assert_eq!(table, "security_months"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_riskless_drops_missing_rate() {
        let df = df!(
            schema::DATE => [mid_month(2020, 1, 31), mid_month(2020, 2, 28)],
            schema::RF_30D => [Some(0.001), None],
        )
        .unwrap();

        let out = riskless(df).unwrap().collect().unwrap();
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn test_benchmark_requires_named_series() {
        let df = df!(
            schema::DATE => [mid_month(2020, 1, 31)],
            "mkt_minus_rf" => [0.01],
        )
        .unwrap();

        assert!(benchmark(df.clone(), &["mkt_minus_rf"]).is_ok());
        assert!(benchmark(df, &["smb"]).is_err());
    }
}
