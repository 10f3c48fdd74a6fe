//! Treasury panel preparation.
//!
//! The bond panel reuses the equity vocabulary so the generic lag and
//! aggregation stages apply unchanged: the bond identifier becomes the
//! issue id and face value outstanding becomes the market value. There
//! is no issuer rollup and no price-only return, so the first observed
//! month of a bond simply has no weight.

use crate::market_value::{LaggedValue, LaggedValueConfig};
use crate::Result;
use hobart_data::schema;
use hobart_traits::{ConfiguredTransform, Transform};
use polars::prelude::*;

/// Rename a coerced bond-month table into the panel vocabulary and
/// drop rows with a missing return.
pub fn bond_panel(bonds: LazyFrame) -> LazyFrame {
    bonds
        .filter(col(schema::RET).is_not_null())
        .rename(
            [schema::BOND_ID, schema::FACE_OUT],
            [schema::ISSUE_ID, schema::MKT_VAL],
            true,
        )
        .sort([schema::ISSUE_ID, schema::DATE], Default::default())
}

/// Full bond-panel construction: vocabulary rename, missing-return
/// drop, and the one-period value lag without a synthetic first month.
pub fn bond_panel_with_lag(bonds: LazyFrame) -> Result<LazyFrame> {
    let lag = LaggedValue::with_config(LaggedValueConfig {
        synthetic_first: false,
    });
    Ok(lag.apply(bond_panel(bonds))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn month_end(year: i32, month: u32) -> NaiveDate {
        let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        NaiveDate::from_ymd_opt(ny, nm, 1).unwrap().pred_opt().unwrap()
    }

    #[test]
    fn test_bond_panel_lag_and_rename() {
        let lf = df!(
            schema::BOND_ID => ["B1", "B1", "B2"],
            schema::DATE => [month_end(2020, 1), month_end(2020, 2), month_end(2020, 1)],
            schema::RET => [Some(0.002), Some(0.001), None],
            schema::FACE_OUT => [500.0, 510.0, 900.0],
        )
        .unwrap()
        .lazy();

        let out = bond_panel_with_lag(lf).unwrap().collect().unwrap();

        // B2's only row has a missing return; B1's first month has no
        // lag. One row survives.
        assert_eq!(out.height(), 1);
        let lag = out
            .column(schema::LAG_MKT_VAL)
            .unwrap()
            .f64()
            .unwrap()
            .get(0)
            .unwrap();
        assert!((lag - 500.0).abs() < 1e-10);
    }
}
