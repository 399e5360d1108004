//! Configuration management for the pose coaching tools

use crate::{
    constants::{
        DEFAULT_ANGLE_PRECISION, DEFAULT_MIN_CONFIDENCE, DEFAULT_MODERATE_BELOW_DEGREES,
        DEFAULT_SLIGHT_BELOW_DEGREES, DEFAULT_THRESHOLD_DEGREES,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pose comparison configuration
    pub comparison: ComparisonConfig,

    /// Reference pose building configuration
    pub reference: ReferenceConfig,

    /// Detection acceptance configuration
    pub detection: DetectionConfig,
}

/// Pose comparison parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Angle tolerance in degrees; differences up to this value are held
    pub threshold_degrees: f64,

    /// Differences below this are reported as "slightly"
    pub slight_below_degrees: f64,

    /// Differences below this are reported as "a bit"
    pub moderate_below_degrees: f64,
}

/// Reference pose parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Decimal places kept for averaged angles
    pub angle_precision: u32,

    /// Directory reference files are written to
    pub output_dir: PathBuf,
}

/// Detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum mean landmark visibility (0.0-1.0) to accept a detection
    pub min_confidence: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comparison: ComparisonConfig::default(),
            reference: ReferenceConfig::default(),
            detection: DetectionConfig::default(),
        }
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            threshold_degrees: DEFAULT_THRESHOLD_DEGREES,
            slight_below_degrees: DEFAULT_SLIGHT_BELOW_DEGREES,
            moderate_below_degrees: DEFAULT_MODERATE_BELOW_DEGREES,
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            angle_precision: DEFAULT_ANGLE_PRECISION,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        let comparison = &self.comparison;
        if !comparison.threshold_degrees.is_finite() || comparison.threshold_degrees < 0.0 {
            return Err(Error::ConfigError(
                "Threshold must be a non-negative number of degrees".to_string(),
            ));
        }
        if !(comparison.slight_below_degrees > 0.0
            && comparison.slight_below_degrees < comparison.moderate_below_degrees)
        {
            return Err(Error::ConfigError(
                "Severity bands must satisfy 0 < slight_below_degrees < moderate_below_degrees".to_string(),
            ));
        }
        if !comparison.moderate_below_degrees.is_finite() {
            return Err(Error::ConfigError("moderate_below_degrees must be finite".to_string()));
        }

        if self.reference.angle_precision > 10 {
            return Err(Error::ConfigError(
                "Angle precision must be at most 10 decimal places".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.detection.min_confidence) {
            return Err(Error::ConfigError(
                "Minimum confidence must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Pose Coach Configuration

# Pose comparison
comparison:
  threshold_degrees: 10.0
  slight_below_degrees: 8.0
  moderate_below_degrees: 15.0

# Reference pose building
reference:
  angle_precision: 3
  output_dir: "."

# Detection acceptance (0.0 keeps every detection)
detection:
  min_confidence: 0.0
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed = Config::from_yaml("comparison:\n  threshold_degrees: 5.0\n").unwrap();
        assert_eq!(parsed.comparison.threshold_degrees, 5.0);
        assert_eq!(parsed.comparison.slight_below_degrees, DEFAULT_SLIGHT_BELOW_DEGREES);
        assert_eq!(parsed.reference, ReferenceConfig::default());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.comparison.threshold_degrees = -1.0;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let mut config = Config::default();
        config.comparison.slight_below_degrees = 20.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.detection.min_confidence = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.reference.angle_precision = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Config::from_yaml("comparison: [1, 2"),
            Err(Error::ConfigError(_))
        ));
    }
}
