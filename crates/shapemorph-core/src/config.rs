//! Engine configuration, JSON-loadable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controller::ShapeConfig;
use crate::gesture::GestureConfig;
use crate::morph::MorphConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Full engine configuration. Every section (and every field) is optional
/// in JSON; omitted values keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub gesture: GestureConfig,
    pub shape: ShapeConfig,
    pub morph: MorphConfig,
}

impl DemoConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_thresholds() {
        let config = DemoConfig::default();
        assert!((config.gesture.double_click_threshold - 0.3).abs() < f64::EPSILON);
        assert!((config.gesture.rotation_sensitivity - 0.5).abs() < f64::EPSILON);
        assert!((config.gesture.pinch_threshold - 5.0).abs() < f64::EPSILON);
        assert!((config.shape.min_scale - 0.5).abs() < f64::EPSILON);
        assert!((config.shape.max_scale - 2.0).abs() < f64::EPSILON);
        assert!((config.morph.transition_time - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = DemoConfig::default();
        let json = config.to_json().unwrap();
        let back = DemoConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            DemoConfig::from_json(r#"{"morph": {"transition_time": 1.0}}"#).unwrap();
        assert!((config.morph.transition_time - 1.0).abs() < f64::EPSILON);
        assert!((config.morph.swap_settle_time - 0.1).abs() < f64::EPSILON);
        assert!((config.gesture.double_click_threshold - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(DemoConfig::from_json("not json").is_err());
    }
}
