use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;
use crate::error::ConfigError;

/// Tunables for placement, progression and spawning.
///
/// Every field defaults to the matching value in [`crate::constants`]; a JSON
/// file only needs to list the fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalConfig {
    pub exclusion_padding: f32,
    pub edge_buffer: f32,
    pub max_y_fraction: f32,
    pub attempt_budget: u32,
    pub spawn_threshold: u32,
    pub max_spawn_per_attempt: u32,
    pub spawn_cap: usize,
    pub celebration_secs: f32,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            exclusion_padding: EXCLUSION_PADDING,
            edge_buffer: EDGE_BUFFER,
            max_y_fraction: MAX_Y_FRACTION,
            attempt_budget: PLACEMENT_ATTEMPT_BUDGET,
            spawn_threshold: SPAWN_THRESHOLD,
            max_spawn_per_attempt: MAX_SPAWN_PER_ATTEMPT,
            spawn_cap: SPAWN_CAP,
            celebration_secs: CELEBRATION_SECS,
        }
    }
}

impl ProposalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.exclusion_padding.is_finite() || self.exclusion_padding < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "exclusion_padding must be finite and >= 0, got {}",
                self.exclusion_padding
            )));
        }
        if !self.edge_buffer.is_finite() || self.edge_buffer < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "edge_buffer must be finite and >= 0, got {}",
                self.edge_buffer
            )));
        }
        if !(self.max_y_fraction > 0.0 && self.max_y_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "max_y_fraction must be in (0, 1], got {}",
                self.max_y_fraction
            )));
        }
        if self.attempt_budget == 0 {
            return Err(ConfigError::Invalid("attempt_budget must be > 0".into()));
        }
        if self.spawn_threshold == 0 {
            return Err(ConfigError::Invalid("spawn_threshold must be > 0".into()));
        }
        if self.spawn_cap == 0 {
            return Err(ConfigError::Invalid("spawn_cap must be > 0".into()));
        }
        if !self.celebration_secs.is_finite() || self.celebration_secs < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "celebration_secs must be finite and >= 0, got {}",
                self.celebration_secs
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "loaded proposal config");
        Ok(config)
    }
}
