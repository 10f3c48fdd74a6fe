//! Comparison of replicated series against published benchmarks.

use crate::error::{Result, StatsError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation between two paired series.
pub fn correlation(left: &[f64], right: &[f64]) -> Result<f64> {
    if left.len() != right.len() {
        return Err(StatsError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    if left.len() < 2 {
        return Err(StatsError::InsufficientData {
            label: "correlation".to_string(),
            needed: 2,
            got: left.len(),
        });
    }

    let (ml, mr) = (mean(left), mean(right));
    let mut cov = 0.0;
    let mut var_l = 0.0;
    let mut var_r = 0.0;
    for (l, r) in left.iter().zip(right) {
        cov += (l - ml) * (r - mr);
        var_l += (l - ml) * (l - ml);
        var_r += (r - mr) * (r - mr);
    }
    if var_l == 0.0 {
        return Err(StatsError::ZeroVariance("left".to_string()));
    }
    if var_r == 0.0 {
        return Err(StatsError::ZeroVariance("right".to_string()));
    }
    Ok(cov / (var_l.sqrt() * var_r.sqrt()))
}

/// Largest absolute pointwise difference between two paired series.
pub fn max_abs_diff(left: &[f64], right: &[f64]) -> Result<f64> {
    if left.len() != right.len() {
        return Err(StatsError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(left
        .iter()
        .zip(right)
        .map(|(l, r)| (l - r).abs())
        .fold(0.0, f64::max))
}

/// How closely a replicated series tracks its published counterpart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesComparison {
    /// Number of paired observations.
    pub observations: usize,
    /// Pearson correlation.
    pub correlation: f64,
    /// Largest absolute pointwise difference.
    pub max_abs_diff: f64,
}

impl SeriesComparison {
    /// Compare two paired slices.
    pub fn between(left: &[f64], right: &[f64]) -> Result<Self> {
        Ok(Self {
            observations: left.len(),
            correlation: correlation(left, right)?,
            max_abs_diff: max_abs_diff(left, right)?,
        })
    }

    /// Compare two columns of an already-aligned frame, skipping rows
    /// where either side is missing.
    pub fn from_frame(frame: &DataFrame, left: &str, right: &str) -> Result<Self> {
        let l = frame.column(left)?.f64()?;
        let r = frame.column(right)?.f64()?;

        let mut lv = Vec::with_capacity(frame.height());
        let mut rv = Vec::with_capacity(frame.height());
        for (a, b) in l.into_iter().zip(r) {
            if let (Some(a), Some(b)) = (a, b) {
                lv.push(a);
                rv.push(b);
            }
        }
        Self::between(&lv, &rv)
    }
}

impl fmt::Display for SeriesComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "corr {:.6}, max |diff| {:.6} over {} obs",
            self.correlation, self.max_abs_diff, self.observations
        )
    }
}
