//! Predictor Configuration - history sizes and input timing
//!
//! Sizes are fixed when a [`Predictor`](crate::Predictor) is built. Both
//! capacities must exceed the longest round trip, in ticks, between
//! predicting a tick and receiving the authoritative state for it.

use serde::{Deserialize, Serialize};
use tickback_core::{Error, Result};

/// Configuration for a [`Predictor`](crate::Predictor)
///
/// # Example
///
/// ```
/// use tickback_netcode::PredictorConfig;
///
/// let config: PredictorConfig =
///     ron::from_str("(state_capacity: 64, one_frame_delay: true)").unwrap();
/// assert_eq!(config.state_capacity, 64);
/// assert_eq!(config.input_capacity, 128);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Slots in the state history ring
    pub state_capacity: usize,
    /// Slots in the input history ring
    pub input_capacity: usize,
    /// Record the state *before* each input is applied
    ///
    /// - `false`: the history at tick `t` holds the state after input `t`
    /// - `true`: the history at tick `t` holds the state before input `t`
    pub one_frame_delay: bool,
}

impl PredictorConfig {
    /// Create a configuration with the same capacity for both rings
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state_capacity: capacity,
            input_capacity: capacity,
            ..Self::default()
        }
    }

    /// Enable or disable one-frame-delayed recording
    pub fn one_frame_delay(mut self, enabled: bool) -> Self {
        self.one_frame_delay = enabled;
        self
    }

    /// Check that both rings have at least one slot
    pub fn validate(&self) -> Result<()> {
        if self.state_capacity == 0 {
            return Err(Error::InvalidConfig(
                "state_capacity must be greater than 0".to_string(),
            ));
        }
        if self.input_capacity == 0 {
            return Err(Error::InvalidConfig(
                "input_capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            state_capacity: 128,
            input_capacity: 128,
            one_frame_delay: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = PredictorConfig::default();
        assert_eq!(config.state_capacity, 128);
        assert_eq!(config.input_capacity, 128);
        assert!(!config.one_frame_delay);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = PredictorConfig::with_capacity(32).one_frame_delay(true);
        assert_eq!(config.state_capacity, 32);
        assert_eq!(config.input_capacity, 32);
        assert!(config.one_frame_delay);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = PredictorConfig {
            input_capacity: 0,
            ..PredictorConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = PredictorConfig::with_capacity(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = PredictorConfig::with_capacity(16).one_frame_delay(true);
        let text = ron::to_string(&config).unwrap();
        let parsed: PredictorConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_ron_missing_fields_use_defaults() {
        let parsed: PredictorConfig = ron::from_str("(one_frame_delay: false)").unwrap();
        assert_eq!(parsed, PredictorConfig::default());
    }
}
