use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("rest_split must be between 0 and 1 (exclusive), got {0}")]
    RestSplitOutOfRange(f64),

    #[error("max_hands must be at least 1")]
    NoHands,
}

/// Session tuning: calibration window, rhythm cycle, track layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Length of the calibration window in seconds.
    pub calibration_secs: f64,
    /// Tap threshold = mean calibrated pinch distance × this.
    pub threshold_multiplier: f64,
    /// Time for the cursor to sweep the frame once.
    pub cycle_period_ms: u64,
    /// Share of the frame width one whole bar occupies.
    pub bar_fraction: f64,
    /// Silent share of a rest segment; the remainder is the pickup.
    pub rest_split: f64,
    /// Front-facing capture reports mirrored handedness. When set, a hand
    /// labelled "Left" drives the right-hand threshold and score.
    pub mirror_handedness: bool,
    /// Maximum number of hands requested from the detector.
    pub max_hands: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            calibration_secs: 5.0,
            threshold_multiplier: 0.25,
            cycle_period_ms: 8000,
            bar_fraction: 1.0,
            rest_split: 0.8,
            mirror_handedness: true,
            max_hands: 2,
        }
    }
}

impl SessionConfig {
    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("calibration_secs", self.calibration_secs),
            ("threshold_multiplier", self.threshold_multiplier),
            ("cycle_period_ms", self.cycle_period_ms as f64),
            ("bar_fraction", self.bar_fraction),
        ];
        for (field, value) in positive {
            // `!(v > 0)` also rejects NaN.
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.rest_split > 0.0 && self.rest_split < 1.0) {
            return Err(ConfigError::RestSplitOutOfRange(self.rest_split));
        }
        if self.max_hands == 0 {
            return Err(ConfigError::NoHands);
        }
        Ok(())
    }

    pub fn calibration_duration_us(&self) -> i64 {
        (self.calibration_secs * 1_000_000.0).round() as i64
    }

    pub fn cycle_period_us(&self) -> i64 {
        self.cycle_period_ms as i64 * 1_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = SessionConfig::default();
        assert!((config.calibration_secs - 5.0).abs() < f64::EPSILON);
        assert!((config.threshold_multiplier - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.cycle_period_ms, 8000);
        assert!(config.mirror_handedness);
        assert_eq!(config.max_hands, 2);
        assert_eq!(config.calibration_duration_us(), 5_000_000);
        assert_eq!(config.cycle_period_us(), 8_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"cycle_period_ms": 4000, "mirror_handedness": false}"#)
                .unwrap();
        assert_eq!(config.cycle_period_ms, 4000);
        assert!(!config.mirror_handedness);
        assert!((config.rest_split - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_file_io() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("session.json");

        let config = SessionConfig {
            calibration_secs: 3.0,
            cycle_period_ms: 6000,
            ..Default::default()
        };

        config.save_to(&file_path).unwrap();
        let loaded = SessionConfig::load_from(&file_path).unwrap();

        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nonexistent.json");

        let config = SessionConfig::load_from(&file_path).unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.json");
        fs::write(&file_path, r#"{"rest_split": 1.5}"#).unwrap();
        assert!(SessionConfig::load_from(&file_path).is_err());
    }

    #[test]
    fn test_validate_fields() {
        let config = SessionConfig {
            calibration_secs: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "calibration_secs",
                value: 0.0
            })
        );

        let config = SessionConfig {
            max_hands: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoHands));
    }
}
