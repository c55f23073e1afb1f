//! Matcher tunables.

use crate::error::ConfigError;
use crate::{DEFAULT_RESAMPLE_COUNT, DEFAULT_SCORE_SCALE, DEFAULT_SQUARE_SIZE, MIN_POINTS};
use serde::{Deserialize, Serialize};

/// Tunable parameters of the matching pipeline.
///
/// The acceptance threshold is deliberately absent: deciding what score
/// counts as a match belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Points both sequences are resampled to (N).
    pub resample_count: usize,
    /// Side of the normalization square (S).
    pub square_size: f32,
    /// Average distance at which the score reaches zero (K).
    pub score_scale: f32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            resample_count: DEFAULT_RESAMPLE_COUNT,
            square_size: DEFAULT_SQUARE_SIZE,
            score_scale: DEFAULT_SCORE_SCALE,
        }
    }
}

impl MatcherConfig {
    /// Set the resample count.
    pub fn with_resample_count(mut self, n: usize) -> Self {
        self.resample_count = n;
        self
    }

    /// Set the normalization square size.
    pub fn with_square_size(mut self, size: f32) -> Self {
        self.square_size = size;
        self
    }

    /// Set the score scaling constant.
    pub fn with_score_scale(mut self, scale: f32) -> Self {
        self.score_scale = scale;
        self
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resample_count < MIN_POINTS {
            return Err(ConfigError::ResampleCountTooSmall {
                min: MIN_POINTS,
                got: self.resample_count,
            });
        }
        ConfigError::require_positive("square_size", self.square_size)?;
        ConfigError::require_positive("score_scale", self.score_scale)?;
        Ok(())
    }
}
