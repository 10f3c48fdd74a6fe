//! Standard sorts built on the breakpoint machinery.
//!
//! Deciles on a ranking metric, the median size split, and the 30/70
//! value split — each computed per period against a configurable
//! reference universe, plus the own-universe quantile variant.

use crate::breakpoints::{ReferenceUniverse, assign_by_quantiles, classify, period_breakpoints};
use crate::error::Result;
use polars::prelude::*;

/// Interior decile percentiles: 10% through 90%.
const DECILE_PERCENTILES: [f64; 9] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

/// Assign decile labels 1-10 on `metric` using reference-universe
/// breakpoints.
pub fn decile_sort(
    data: LazyFrame,
    metric: &str,
    reference: &ReferenceUniverse,
    label: &str,
) -> Result<LazyFrame> {
    let breakpoints = period_breakpoints(data.clone(), metric, &DECILE_PERCENTILES, reference)?;
    Ok(classify(data, metric, breakpoints, DECILE_PERCENTILES.len(), label))
}

/// Assign decile labels 1-10 on `metric` using quantiles of the full
/// panel itself.
pub fn quantile_decile_sort(data: LazyFrame, metric: &str, label: &str) -> Result<LazyFrame> {
    assign_by_quantiles(data, metric, 10, label)
}

/// Split on the reference-universe median: `S` below or at it, `B`
/// above.
pub fn median_split(
    data: LazyFrame,
    metric: &str,
    reference: &ReferenceUniverse,
    label: &str,
) -> Result<LazyFrame> {
    let breakpoints = period_breakpoints(data.clone(), metric, &[0.5], reference)?;
    let classified = classify(data, metric, breakpoints, 1, label);

    Ok(classified.with_columns([when(col(label).eq(lit(1)))
        .then(lit("S"))
        .when(col(label).eq(lit(2)))
        .then(lit("B"))
        .otherwise(lit(NULL))
        .alias(label)]))
}

/// Split at the reference-universe 30th and 70th percentiles into `L`,
/// `M`, `H`.
pub fn thirds_split(
    data: LazyFrame,
    metric: &str,
    reference: &ReferenceUniverse,
    label: &str,
) -> Result<LazyFrame> {
    let breakpoints = period_breakpoints(data.clone(), metric, &[0.3, 0.7], reference)?;
    let classified = classify(data, metric, breakpoints, 2, label);

    Ok(classified.with_columns([when(col(label).eq(lit(1)))
        .then(lit("L"))
        .when(col(label).eq(lit(2)))
        .then(lit("M"))
        .when(col(label).eq(lit(3)))
        .then(lit("H"))
        .otherwise(lit(NULL))
        .alias(label)]))
}
