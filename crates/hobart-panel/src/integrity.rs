//! Eager integrity checks run after a panel is collected.
//!
//! These are the points where a broken upstream filter must stop the
//! run. They scan materialized columns, so they sit outside the lazy
//! `Transform` contract and are called by the pipeline right after it
//! collects.

use crate::error::{PanelError, Result};
use hobart_data::schema;
use polars::prelude::*;

/// Provider sentinel codes that mark missing data in return columns.
pub const SENTINEL_RETURNS: [f64; 4] = [-66.0, -77.0, -88.0, -99.0];

/// Fail if any value of `column` equals one of the sentinel `codes`.
///
/// The comparison is exact: sentinels are written by the provider as
/// literal constants, and a legitimate return of exactly -66.0 does not
/// exist in monthly data.
pub fn verify_no_sentinels(frame: &DataFrame, column: &str, codes: &[f64]) -> Result<()> {
    let values = frame.column(column)?.f64()?;
    for &code in codes {
        let rows = values.into_iter().flatten().filter(|v| *v == code).count();
        if rows > 0 {
            return Err(PanelError::SentinelReturn {
                value: code,
                rows,
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Fail if `column` contains any missing values.
pub fn verify_complete(frame: &DataFrame, column: &str) -> Result<()> {
    let rows = frame.column(column)?.null_count();
    if rows > 0 {
        return Err(PanelError::MissingValues {
            column: column.to_string(),
            rows,
        });
    }
    Ok(())
}

/// The standard post-construction check for an equity panel: adjusted
/// returns carry no sentinels and both the return and the lagged value
/// are complete.
pub fn verify_panel(frame: &DataFrame, codes: &[f64]) -> Result<()> {
    verify_no_sentinels(frame, schema::RET, codes)?;
    verify_complete(frame, schema::RET)?;
    verify_complete(frame, schema::LAG_MKT_VAL)?;
    Ok(())
}
