//! Caster configuration.
//!
//! Defines the serde schema for `config/caster.yaml`. Every key is optional;
//! missing keys take the library defaults.

use crate::recorder::RecorderConfig;
use crate::{DEFAULT_ACCEPTANCE_THRESHOLD, DEFAULT_AIM_GRACE_SECS};
use gesture_core::{ConfigError, MatcherConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the whole casting loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasterConfig {
    /// Minimum gesture score that chambers a spell.
    pub acceptance_threshold: f32,

    /// Seconds a chambered spell can wait before it fizzles.
    pub aim_grace_secs: f32,

    /// Resample / normalize / score parameters.
    pub matcher: MatcherConfig,

    /// Casting plane and point spacing.
    pub recorder: RecorderConfig,
}

impl Default for CasterConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            aim_grace_secs: DEFAULT_AIM_GRACE_SECS,
            matcher: MatcherConfig::default(),
            recorder: RecorderConfig::default(),
        }
    }
}

impl CasterConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: CasterConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_unit("acceptance_threshold", self.acceptance_threshold)?;
        ConfigError::require_non_negative("aim_grace_secs", self.aim_grace_secs)?;
        self.matcher.validate()?;
        self.recorder.validate()?;
        Ok(())
    }
}
