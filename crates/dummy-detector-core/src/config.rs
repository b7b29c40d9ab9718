// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detector configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DetectorError, Result};
use crate::types::FrameSize;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "DUMMY_DETECTOR_CONFIG";

/// Tunables for the synthetic detector.
///
/// `Default` reproduces the shipped behaviour exactly; a config file only
/// needs the fields it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Frame size used when the host passes missing or non-numeric dimensions.
    pub default_frame: FrameSize,
    /// Frames with fewer pixels than this produce no detections.
    pub min_area: u64,
    /// Pixel width of the synthetic box before normalisation.
    pub reference_width: f64,
    /// Pixel height of the synthetic box before normalisation.
    pub reference_height: f64,
    /// Upper bound on the normalised box width and height.
    pub max_box_extent: f64,
    /// Score assigned before the area-dependent boost.
    pub base_score: f64,
    /// Pixel count that maps to a boost of 1.0.
    pub area_scale: f64,
    /// Cap on the area-dependent boost.
    pub max_score_boost: f64,
    /// Label attached to every synthetic detection.
    pub label: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            default_frame: FrameSize::new(640, 480),
            min_area: 200_000,
            reference_width: 320.0,
            reference_height: 240.0,
            max_box_extent: 0.5,
            base_score: 0.48,
            area_scale: 1_000_000.0,
            max_score_boost: 0.5,
            label: "toy_object".into(),
        }
    }
}

impl DetectorConfig {
    /// Load and validate a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        info!(path = %path.display(), "loaded detector config");
        Ok(config)
    }

    /// Load from the file named by `DUMMY_DETECTOR_CONFIG`, or fall back to
    /// defaults when the variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_json_file(path),
            None => {
                debug!("{CONFIG_ENV_VAR} not set, using default detector config");
                Ok(Self::default())
            }
        }
    }

    /// Reject configurations that would produce boxes or scores outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.default_frame.width == 0 || self.default_frame.height == 0 {
            return Err(DetectorError::Config(format!(
                "default_frame must be non-empty, got {}",
                self.default_frame
            )));
        }
        if !is_positive(self.reference_width) || !is_positive(self.reference_height) {
            return Err(DetectorError::Config(
                "reference_width and reference_height must be positive".into(),
            ));
        }
        if !is_positive(self.max_box_extent) || self.max_box_extent > 1.0 {
            return Err(DetectorError::Config(format!(
                "max_box_extent must be in (0, 1], got {}",
                self.max_box_extent
            )));
        }
        if !is_positive(self.area_scale) {
            return Err(DetectorError::Config("area_scale must be positive".into()));
        }
        let ceiling = self.base_score + self.max_score_boost;
        if self.base_score < 0.0 || self.max_score_boost < 0.0 || !(0.0..=1.0).contains(&ceiling) {
            return Err(DetectorError::Config(format!(
                "score range [{}, {}] must lie within [0, 1]",
                self.base_score, ceiling
            )));
        }
        if self.label.trim().is_empty() {
            return Err(DetectorError::Config("label must not be empty".into()));
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_valid() {
        DetectorConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "label": "person", "min_area": 1000 }}"#).unwrap();

        let config = DetectorConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.label, "person");
        assert_eq!(config.min_area, 1000);
        assert_eq!(config.default_frame, FrameSize::new(640, 480));
        assert_eq!(config.base_score, 0.48);
    }

    #[test]
    fn json_round_trip() {
        let config = DetectorConfig {
            label: "cup".into(),
            ..DetectorConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: DetectorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn rejects_score_range_above_one() {
        let config = DetectorConfig {
            base_score: 0.6,
            max_score_boost: 0.5,
            ..DetectorConfig::default()
        };
        assert!(matches!(config.validate(), Err(DetectorError::Config(_))));
    }

    #[test]
    fn rejects_empty_default_frame() {
        let config = DetectorConfig {
            default_frame: FrameSize::new(0, 480),
            ..DetectorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_blank_label() {
        let config = DetectorConfig {
            label: "  ".into(),
            ..DetectorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_nan_reference_box() {
        let config = DetectorConfig {
            reference_width: f64::NAN,
            ..DetectorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_file_values_are_rejected_on_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "area_scale": 0.0 }}"#).unwrap();
        assert!(DetectorConfig::from_json_file(file.path()).is_err());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            DetectorConfig::from_json_file(file.path()),
            Err(DetectorError::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            DetectorConfig::from_json_file("/nonexistent/dummy-detector.json"),
            Err(DetectorError::Io(_))
        ));
    }
}
