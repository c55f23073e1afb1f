//! Configuration errors.
//!
//! Recognition itself never fails; every degenerate input maps to a defined
//! score. Only invalid tunables are reported as errors.

use thiserror::Error;

/// Invalid matcher or caller configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Resampling needs at least two points to span a path.
    #[error("resample count must be at least {min}, got {got}")]
    ResampleCountTooSmall { min: usize, got: usize },

    /// A length, scale or duration that must be strictly positive.
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// A value that must be finite and non-negative.
    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f32 },

    /// A probability-like value outside [0, 1].
    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },
}

impl ConfigError {
    /// Check `value > 0` and finite.
    pub fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NotPositive { field, value })
        }
    }

    /// Check `value >= 0` and finite.
    pub fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Negative { field, value })
        }
    }

    /// Check `0 <= value <= 1`.
    pub fn require_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::OutOfUnitRange { field, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check() {
        assert!(ConfigError::require_positive("k", 0.5).is_ok());
        assert!(ConfigError::require_positive("k", 0.0).is_err());
        assert!(ConfigError::require_positive("k", f32::NAN).is_err());
        assert!(ConfigError::require_positive("k", f32::INFINITY).is_err());
    }

    #[test]
    fn unit_check() {
        assert!(ConfigError::require_unit("t", 0.0).is_ok());
        assert!(ConfigError::require_unit("t", 1.0).is_ok());
        assert!(ConfigError::require_unit("t", 1.01).is_err());
        assert!(ConfigError::require_unit("t", f32::NAN).is_err());
    }

    #[test]
    fn messages_name_the_field() {
        let err = ConfigError::require_positive("square_size", -1.0).unwrap_err();
        assert_eq!(err.to_string(), "square_size must be positive and finite, got -1");
    }
}
