//! Composable pipelines of `Transform` stages.
//!
//! The same clean → adjust → aggregate → lag sequence underlies every
//! study here; a `Pipeline` strings the stages together, validates each
//! stage's required columns against the evolving schema, and collects
//! once at the end. Eager integrity checks run on the collected panel.

use crate::config::StudyConfig;
use hobart_data::clean::UniverseFilter;
use hobart_panel::PanelError;
use hobart_panel::adjust::{ReturnAdjuster, merge_delistings};
use hobart_panel::integrity::verify_panel;
use hobart_panel::market_value::{LaggedValue, MarketValue, MarketValueConfig};
use hobart_panel::momentum::RankingReturn;
use hobart_traits::{ConfiguredTransform, Transform, TransformError};
use polars::prelude::*;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while running a pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage rejected its input or configuration.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Polars error while planning or collecting.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// A post-collection integrity check failed.
    #[error("Panel error: {0}")]
    Panel(#[from] PanelError),
}

/// An ordered sequence of pipeline stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Transform + Send + Sync>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    #[must_use]
    pub fn stage<T>(mut self, stage: T) -> Self
    where
        T: Transform + Send + Sync + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    /// Names of the stages, in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage over `data` and collect the result.
    ///
    /// Each stage's required columns are checked against the schema the
    /// previous stages produce, so a misassembled pipeline fails before
    /// any data moves.
    pub fn run(&self, data: LazyFrame) -> Result<DataFrame, PipelineError> {
        let mut lf = data;
        for stage in &self.stages {
            let schema = lf.collect_schema()?;
            stage.validate(&schema)?;
            lf = stage.apply(lf)?;
        }
        Ok(lf.collect()?)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// The standard equity-panel pipeline: universe filter, delisting
/// return adjustment, issuer market-value aggregation, one-period lag.
pub fn market_panel_pipeline(config: &StudyConfig) -> Pipeline {
    Pipeline::new()
        .stage(UniverseFilter::with_config(config.universe.clone()))
        .stage(ReturnAdjuster::default())
        .stage(MarketValue::with_config(MarketValueConfig {
            scale: config.value_scale,
        }))
        .stage(LaggedValue::default())
}

/// The equity-panel pipeline plus the momentum ranking return.
pub fn momentum_pipeline(config: &StudyConfig) -> Pipeline {
    market_panel_pipeline(config).stage(RankingReturn::default())
}

/// Merge, clean, adjust, aggregate, and integrity-check an equity
/// panel from coerced security-month and delisting tables.
pub fn run_market_panel(
    securities: LazyFrame,
    delistings: LazyFrame,
    config: &StudyConfig,
) -> Result<DataFrame, PipelineError> {
    let merged = merge_delistings(securities, delistings);
    let panel = market_panel_pipeline(config).run(merged)?;
    verify_panel(&panel, &config.sentinel_codes)?;
    Ok(panel)
}

/// [`run_market_panel`] with the momentum ranking column added.
pub fn run_momentum_panel(
    securities: LazyFrame,
    delistings: LazyFrame,
    config: &StudyConfig,
) -> Result<DataFrame, PipelineError> {
    let merged = merge_delistings(securities, delistings);
    let panel = momentum_pipeline(config).run(merged)?;
    verify_panel(&panel, &config.sentinel_codes)?;
    Ok(panel)
}
