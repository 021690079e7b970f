//! World configuration, validation, and error types.
//!
//! [`WorldConfig`] is the input for constructing a [`WorldState`](crate::WorldState).
//! [`validate()`](WorldConfig::validate) checks its invariants once at
//! construction so the resolver can rely on them afterwards.

use std::error::Error;
use std::fmt;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`WorldConfig::validate()`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `base_transition_secs` is NaN, infinite, or negative.
    InvalidTransitionTime {
        /// The invalid value.
        value: f32,
    },
    /// `max_expansion` is zero, which would reject every move.
    ExpansionLimitZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransitionTime { value } => {
                write!(
                    f,
                    "base_transition_secs must be finite and non-negative, got {value}"
                )
            }
            Self::ExpansionLimitZero => write!(f, "max_expansion must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── WorldConfig ────────────────────────────────────────────────────

/// Tunables for a [`WorldState`](crate::WorldState).
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Duration of a one-step move of a unit-weight block, in seconds.
    /// Scaled by weight factor and distance. Default: 0.2.
    pub base_transition_secs: f32,
    /// Largest expanded set a single move may displace. Moves that would
    /// drag or push more blocks than this are rejected. Default: 4096.
    pub max_expansion: usize,
}

impl WorldConfig {
    /// Default base transition duration.
    pub const DEFAULT_BASE_TRANSITION_SECS: f32 = 0.2;

    /// Default expansion limit.
    pub const DEFAULT_MAX_EXPANSION: usize = 4096;

    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.base_transition_secs;
        if !t.is_finite() || t < 0.0 {
            return Err(ConfigError::InvalidTransitionTime { value: t });
        }
        if self.max_expansion == 0 {
            return Err(ConfigError::ExpansionLimitZero);
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            base_transition_secs: Self::DEFAULT_BASE_TRANSITION_SECS,
            max_expansion: Self::DEFAULT_MAX_EXPANSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_transition_time_is_allowed() {
        let cfg = WorldConfig {
            base_transition_secs: 0.0,
            ..WorldConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_nan_transition_time_fails() {
        let cfg = WorldConfig {
            base_transition_secs: f32::NAN,
            ..WorldConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidTransitionTime { .. }) => {}
            other => panic!("expected InvalidTransitionTime, got {other:?}"),
        }
    }

    #[test]
    fn validate_negative_transition_time_fails() {
        let cfg = WorldConfig {
            base_transition_secs: -0.1,
            ..WorldConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidTransitionTime { value }) => assert_eq!(value, -0.1),
            other => panic!("expected InvalidTransitionTime, got {other:?}"),
        }
    }

    #[test]
    fn validate_zero_expansion_fails() {
        let cfg = WorldConfig {
            max_expansion: 0,
            ..WorldConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ExpansionLimitZero));
        assert!(ConfigError::ExpansionLimitZero
            .to_string()
            .contains("max_expansion"));
    }
}
