//! Performance summaries for monthly excess-return series.
//!
//! Conventions match the published replication tables: means and
//! volatilities are annualized from monthly data and reported in
//! percent, the Sharpe ratio is the unitless quotient of the two, and
//! higher moments use the bias-corrected sample estimators.

use crate::error::{Result, StatsError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::fmt;

/// Months per year, the annualization base.
const MONTHS_PER_YEAR: f64 = 12.0;

/// Default trailing window for the short-sample t-statistic: five
/// years of monthly data.
pub const TRAILING_WINDOW: usize = 60;

/// Extract a column as a `Vec<f64>`, skipping nulls.
pub fn column_values(frame: &DataFrame, column: &str) -> Result<Vec<f64>> {
    Ok(frame
        .column(column)?
        .f64()?
        .into_iter()
        .flatten()
        .collect())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n - 1.0)).sqrt()
}

/// Bias-corrected sample skewness (the adjusted Fisher-Pearson
/// estimator the reference tables report).
fn skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let m = mean(values);
    let m2: f64 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n;
    let m3: f64 = values.iter().map(|v| (v - m).powi(3)).sum::<f64>() / n;
    if m2 == 0.0 {
        return 0.0;
    }
    let g1 = m3 / m2.powf(1.5);
    g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)
}

/// Bias-corrected excess kurtosis.
fn excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let m = mean(values);
    let m2: f64 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n;
    let m4: f64 = values.iter().map(|v| (v - m).powi(4)).sum::<f64>() / n;
    if m2 == 0.0 {
        return 0.0;
    }
    let g2 = m4 / (m2 * m2) - 3.0;
    ((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0))
}

/// One-sample t-statistic for the mean-zero null.
fn t_statistic(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    mean(values) / (std_dev(values) / n.sqrt())
}

/// Two-sided p-value for a t-statistic with `n - 1` degrees of freedom.
fn p_value(t: f64, n: usize) -> f64 {
    let freedom = (n - 1) as f64;
    match StudentsT::new(0.0, 1.0, freedom) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => f64::NAN,
    }
}

/// Summary statistics for one monthly excess-return series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSummary {
    /// Series label (portfolio, decile, factor).
    pub label: String,

    /// Number of monthly observations.
    pub observations: usize,

    /// Annualized mean, in percent: 100 × 12 × monthly mean.
    pub annualized_mean: f64,

    /// Annualized volatility, in percent: 100 × √12 × monthly std.
    pub annualized_vol: f64,

    /// Annualized Sharpe ratio: mean over volatility.
    pub sharpe: f64,

    /// Bias-corrected sample skewness.
    pub skewness: f64,

    /// Bias-corrected excess kurtosis.
    pub excess_kurtosis: f64,

    /// Full-sample t-statistic against a zero mean.
    pub t_stat: f64,

    /// Two-sided p-value of [`Self::t_stat`].
    pub p_value: f64,

    /// t-statistic over the trailing window, when the sample is long
    /// enough to have one.
    pub t_stat_trailing: Option<f64>,
}

impl PerformanceSummary {
    /// Minimum observations for the moment estimators to be defined.
    pub const MIN_OBSERVATIONS: usize = 4;

    /// Summarize a monthly excess-return series with the default
    /// five-year trailing window.
    pub fn from_series(label: &str, values: &[f64]) -> Result<Self> {
        Self::with_trailing(label, values, TRAILING_WINDOW)
    }

    /// Summarize with an explicit trailing window length.
    pub fn with_trailing(label: &str, values: &[f64], trailing: usize) -> Result<Self> {
        if values.len() < Self::MIN_OBSERVATIONS {
            return Err(StatsError::InsufficientData {
                label: label.to_string(),
                needed: Self::MIN_OBSERVATIONS,
                got: values.len(),
            });
        }

        let sd = std_dev(values);
        if sd == 0.0 {
            return Err(StatsError::ZeroVariance(label.to_string()));
        }

        let annualized_mean = 100.0 * MONTHS_PER_YEAR * mean(values);
        let annualized_vol = 100.0 * MONTHS_PER_YEAR.sqrt() * sd;
        let t_stat = t_statistic(values);

        let t_stat_trailing = if values.len() >= trailing && trailing >= Self::MIN_OBSERVATIONS {
            let tail = &values[values.len() - trailing..];
            Some(t_statistic(tail))
        } else {
            None
        };

        Ok(Self {
            label: label.to_string(),
            observations: values.len(),
            annualized_mean,
            annualized_vol,
            sharpe: annualized_mean / annualized_vol,
            skewness: skewness(values),
            excess_kurtosis: excess_kurtosis(values),
            t_stat,
            p_value: p_value(t_stat, values.len()),
            t_stat_trailing,
        })
    }
}

impl fmt::Display for PerformanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: mean {:.2}%, vol {:.2}%, Sharpe {:.2} (t = {:.2}, n = {})",
            self.label,
            self.annualized_mean,
            self.annualized_vol,
            self.sharpe,
            self.t_stat,
            self.observations
        )
    }
}

/// A titled collection of performance summaries, one row per series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryTable {
    /// Table caption.
    pub title: String,
    /// Rows, in display order.
    pub rows: Vec<PerformanceSummary>,
}

impl SummaryTable {
    /// Create a table from rows.
    pub fn new<S: Into<String>>(title: S, rows: Vec<PerformanceSummary>) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}\n", self.title));
        output.push_str(&"=".repeat(96));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>6} {:>10} {:>10} {:>8} {:>8} {:>9} {:>8} {:>9}\n",
            "Series", "N", "Mean %", "Vol %", "Sharpe", "Skew", "Ex.Kurt", "t", "t(5yr)"
        ));
        output.push_str(&"-".repeat(96));
        output.push('\n');

        for row in &self.rows {
            let trailing = row
                .t_stat_trailing
                .map_or_else(|| "-".to_string(), |t| format!("{t:.2}"));
            output.push_str(&format!(
                "{:<16} {:>6} {:>10.2} {:>10.2} {:>8.2} {:>8.2} {:>9.2} {:>8.2} {:>9}\n",
                row.label,
                row.observations,
                row.annualized_mean,
                row.annualized_vol,
                row.sharpe,
                row.skewness,
                row.excess_kurtosis,
                row.t_stat,
                trailing
            ));
        }

        output.push_str(&"=".repeat(96));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", self.title));
        output.push_str(
            "| Series | N | Mean % | Vol % | Sharpe | Skew | Ex. Kurt | t | t (5yr) |\n",
        );
        output.push_str("|--------|---|--------|-------|--------|------|----------|---|---------|\n");

        for row in &self.rows {
            let trailing = row
                .t_stat_trailing
                .map_or_else(|| "-".to_string(), |t| format!("{t:.2}"));
            output.push_str(&format!(
                "| {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {} |\n",
                row.label,
                row.observations,
                row.annualized_mean,
                row.annualized_vol,
                row.sharpe,
                row.skewness,
                row.excess_kurtosis,
                row.t_stat,
                trailing
            ));
        }

        output
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} series)", self.title, self.rows.len())?;
        for row in &self.rows {
            writeln!(f, "  {row}")?;
        }
        Ok(())
    }
}
