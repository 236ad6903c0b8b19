//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::cluster::{DEFAULT_PRECISION, MAX_PRECISION};
use crate::error::EngineError;

/// Tunables for a [`MapView`](crate::MapView).
///
/// Every field has a default, so a partial (or empty) JSON object is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Decimal places for cluster keys.
    pub precision: u32,
    /// Initial state of the "show all markers" toggle.
    pub show_all_markers: bool,
    /// Build an R-tree over the records for visibility queries.
    pub use_spatial_index: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            show_all_markers: false,
            use_spatial_index: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.precision > MAX_PRECISION {
            return Err(EngineError::Config(format!(
                "precision {} exceeds maximum of {MAX_PRECISION}", self.precision
            )));
        }
        Ok(())
    }
}
