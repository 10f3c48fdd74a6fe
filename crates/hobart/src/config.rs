//! Explicit study configuration.
//!
//! Sample window, venue and security-type sets, reference universe,
//! and sentinel codes travel as one explicit object handed to the
//! pipeline builders, never as module-level constants.

use hobart_data::clean::UniverseFilterConfig;
use hobart_panel::integrity::SENTINEL_RETURNS;
use hobart_portfolio::breakpoints::ReferenceUniverse;
use serde::{Deserialize, Serialize};

/// Everything a replication study fixes up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Universe membership and sample window.
    pub universe: UniverseFilterConfig,

    /// Reference universe used to compute sort breakpoints.
    pub reference: ReferenceUniverse,

    /// Provider sentinel codes that must never survive adjustment.
    pub sentinel_codes: Vec<f64>,

    /// Multiplier turning |price| × shares into market value
    /// (default: thousands of shares and dollar prices into millions).
    pub value_scale: f64,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            universe: UniverseFilterConfig::default(),
            reference: ReferenceUniverse::default(),
            sentinel_codes: SENTINEL_RETURNS.to_vec(),
            value_scale: 1e-3,
        }
    }
}
