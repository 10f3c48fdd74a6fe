#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-research/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use polars::prelude::*;
use thiserror::Error;

/// Errors that can occur while applying a pipeline stage.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column the stage requires is absent from the input schema.
    #[error("stage `{stage}` requires column `{column}` which is missing from the input")]
    MissingColumn {
        /// Name of the stage reporting the problem.
        stage: String,
        /// The absent column.
        column: String,
    },

    /// The stage was configured with values it cannot work with.
    #[error("stage `{stage}` misconfigured: {reason}")]
    InvalidConfig {
        /// Name of the stage reporting the problem.
        stage: String,
        /// Why the configuration is unusable.
        reason: String,
    },

    /// Polars error raised while building or executing the stage plan.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// A pipeline stage: a named table-to-table mapping.
///
/// Stages are pure with respect to their input: they take a `LazyFrame`,
/// extend or filter it, and hand back a `LazyFrame`. Eager checks that
/// must inspect materialized data (sentinel scans, volatility matching)
/// live outside this contract, next to where the pipeline collects.
pub trait Transform {
    /// Stable, snake_case identifier for the stage.
    fn name(&self) -> &str;

    /// Columns that must be present in the input schema.
    fn required_columns(&self) -> &[&str];

    /// Apply the stage to the input table.
    fn apply(&self, data: LazyFrame) -> Result<LazyFrame, TransformError>;

    /// Check the input schema against [`Transform::required_columns`].
    ///
    /// Pipelines call this before [`Transform::apply`]; standalone use
    /// is also fine when running a single stage by hand.
    fn validate(&self, schema: &Schema) -> Result<(), TransformError> {
        for column in self.required_columns() {
            if !schema.contains(column) {
                return Err(TransformError::MissingColumn {
                    stage: self.name().to_string(),
                    column: (*column).to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A stage constructed from a serde-friendly configuration struct.
pub trait ConfiguredTransform: Transform {
    /// Configuration type for the stage.
    type Config;

    /// Build the stage from its configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Borrow the stage configuration.
    fn config(&self) -> &Self::Config;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Passthrough;

    impl Transform for Passthrough {
        fn name(&self) -> &str {
            "passthrough"
        }

        fn required_columns(&self) -> &[&str] {
            &["ret"]
        }

        fn apply(&self, data: LazyFrame) -> Result<LazyFrame, TransformError> {
            Ok(data)
        }
    }

    #[test]
    fn test_validate_accepts_present_columns() {
        let df = df!("ret" => [0.01, 0.02]).unwrap();
        assert!(Passthrough.validate(&df.schema()).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_columns() {
        let df = df!("price" => [10.0]).unwrap();
        let err = Passthrough.validate(&df.schema()).unwrap_err();
        match err {
            TransformError::MissingColumn { stage, column } => {
                assert_eq!(stage, "passthrough");
                assert_eq!(column, "ret");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
