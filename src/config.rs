use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Output encoding for extracted frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
        }
    }
}

/// Extraction configuration, typically deserialized from the embedding
/// application's settings form.
///
/// `end_time == 0.0` means "until the end of the video". Thresholds and
/// `quality` live in `(0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Seconds between captures in fixed-interval mode.
    pub interval: f64,
    pub start_time: f64,
    pub end_time: f64,
    /// Derive capture timestamps from detected scene/motion events instead
    /// of the fixed grid.
    pub use_smart_analysis: bool,
    pub detect_scenes: bool,
    /// Drop frames too similar to the previously retained one
    /// (smart-analysis mode only).
    pub skip_similar: bool,
    pub scene_threshold: f64,
    pub similarity_threshold: f64,
    pub format: ImageFormat,
    /// JPEG quality factor in `(0, 1]`; ignored for PNG.
    pub quality: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            interval: 5.0,
            start_time: 0.0,
            end_time: 0.0,
            use_smart_analysis: false,
            detect_scenes: true,
            skip_similar: true,
            scene_threshold: crate::analysis::classifier::DEFAULT_SCENE_THRESHOLD,
            similarity_threshold: crate::analysis::classifier::DEFAULT_SIMILARITY_THRESHOLD,
            format: ImageFormat::Png,
            quality: 0.92,
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<(), ExtractError> {
        if !(self.interval > 0.0) {
            return Err(ExtractError::InvalidConfig(format!(
                "interval must be > 0, got {}",
                self.interval
            )));
        }
        if self.start_time < 0.0 {
            return Err(ExtractError::InvalidConfig(format!(
                "start_time must be >= 0, got {}",
                self.start_time
            )));
        }
        if self.end_time < 0.0 {
            return Err(ExtractError::InvalidConfig(format!(
                "end_time must be >= 0, got {}",
                self.end_time
            )));
        }
        if self.end_time > 0.0 && self.start_time >= self.end_time {
            return Err(ExtractError::InvalidConfig(format!(
                "start_time {} must be before end_time {}",
                self.start_time, self.end_time
            )));
        }
        Self::check_unit_range("scene_threshold", self.scene_threshold)?;
        Self::check_unit_range("similarity_threshold", self.similarity_threshold)?;
        Self::check_unit_range("quality", self.quality)?;
        Ok(())
    }

    fn check_unit_range(name: &str, value: f64) -> Result<(), ExtractError> {
        if value > 0.0 && value <= 1.0 {
            Ok(())
        } else {
            Err(ExtractError::InvalidConfig(format!(
                "{name} must be in (0, 1], got {value}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExtractionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_interval() {
        let config = ExtractionConfig {
            interval: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExtractionConfig {
            interval: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = ExtractionConfig {
            start_time: 10.0,
            end_time: 5.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_open_ended_range_is_valid() {
        let config = ExtractionConfig {
            start_time: 10.0,
            end_time: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_bounds() {
        for bad in [0.0, -0.1, 1.5] {
            let config = ExtractionConfig {
                scene_threshold: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "scene_threshold {bad}");
        }
        let config = ExtractionConfig {
            similarity_threshold: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_from_form_json() {
        let json = r#"{
            "interval": 2.5,
            "use_smart_analysis": true,
            "format": "jpg",
            "quality": 0.8
        }"#;
        let config: ExtractionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.interval, 2.5);
        assert!(config.use_smart_analysis);
        assert_eq!(config.format, ImageFormat::Jpg);
        assert_eq!(config.quality, 0.8);
        // unspecified fields fall back to defaults
        assert_eq!(config.scene_threshold, 0.3);
    }
}
