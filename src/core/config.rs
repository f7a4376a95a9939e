use serde::{Deserialize, Serialize};

use super::validation::{AUTH_NUMBER_LENGTHS, REFERENCE_WIDTH};

/// Numbering engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Width references are zero-padded to and drawn numbers must match.
    pub reference_width: usize,
    /// Printed document number while no reference is set.
    pub placeholder: String,
    /// Accepted authorization number lengths for received documents.
    pub auth_number_lengths: Vec<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_width: REFERENCE_WIDTH,
            placeholder: "*".into(),
            auth_number_lengths: AUTH_NUMBER_LENGTHS.to_vec(),
        }
    }
}

#[cfg(feature = "config")]
impl EngineConfig {
    /// Load settings from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, super::error::AuthorizationError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| super::error::AuthorizationError::Config(e.to_string()))?;
        if config.reference_width == 0 {
            return Err(super::error::AuthorizationError::Config(
                "reference_width must be positive".into(),
            ));
        }
        Ok(config)
    }
}
