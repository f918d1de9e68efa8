//! Configuration for the scroll intent classifier.
//!
//! [`ClassifierOptions`] is what callers (or the config file) provide; every
//! field is optional. [`ClassifierConfig`] is the resolved, floor-clamped set
//! of thresholds a classifier is built with.

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SENSITIVITY: f64 = 2.0;
pub const DEFAULT_DELAY_MS: f64 = 100.0;
pub const DEFAULT_HIGH_VELOCITY: f64 = 100.0;
pub const DEFAULT_INCREASING_DELTAS_THRESHOLD: usize = 3;

const MIN_SENSITIVITY: f64 = 1.0;
const MIN_DELAY_MS: f64 = 1.0;
const MIN_HIGH_VELOCITY: f64 = 1.0;
const MIN_INCREASING_DELTAS_THRESHOLD: i64 = 2;

/// Optional classifier settings, as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierOptions {
    /// Minimum biggest-delta magnitude for an event to be considered at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<f64>,
    /// Gap (ms) after which a new event starts a fresh gesture
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    /// Magnitude above which non-decreasing deltas are still human
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_velocity: Option<f64>,
    /// Length of a strictly increasing run that is judged human. Any number
    /// is accepted here; fractions are truncated and the floor applies later.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_count"
    )]
    pub increasing_deltas_threshold: Option<i64>,
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_nan()).map(|v| v as i64))
}

impl ClassifierOptions {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(&self, other: &ClassifierOptions) -> ClassifierOptions {
        ClassifierOptions {
            sensitivity: other.sensitivity.or(self.sensitivity),
            delay: other.delay.or(self.delay),
            high_velocity: other.high_velocity.or(self.high_velocity),
            increasing_deltas_threshold: other
                .increasing_deltas_threshold
                .or(self.increasing_deltas_threshold),
        }
    }
}

/// Resolved classifier thresholds. Immutable once a classifier is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    pub sensitivity: f64,
    pub delay: f64,
    pub high_velocity: f64,
    pub increasing_deltas_threshold: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            delay: DEFAULT_DELAY_MS,
            high_velocity: DEFAULT_HIGH_VELOCITY,
            increasing_deltas_threshold: DEFAULT_INCREASING_DELTAS_THRESHOLD,
        }
    }
}

impl From<&ClassifierOptions> for ClassifierConfig {
    /// Missing or NaN values take their default; everything else is clamped
    /// to its floor.
    fn from(options: &ClassifierOptions) -> Self {
        Self {
            sensitivity: floor_at(options.sensitivity, DEFAULT_SENSITIVITY, MIN_SENSITIVITY),
            delay: floor_at(options.delay, DEFAULT_DELAY_MS, MIN_DELAY_MS),
            high_velocity: floor_at(
                options.high_velocity,
                DEFAULT_HIGH_VELOCITY,
                MIN_HIGH_VELOCITY,
            ),
            increasing_deltas_threshold: options
                .increasing_deltas_threshold
                .map_or(DEFAULT_INCREASING_DELTAS_THRESHOLD, run_length),
        }
    }
}

impl From<ClassifierOptions> for ClassifierConfig {
    fn from(options: ClassifierOptions) -> Self {
        Self::from(&options)
    }
}

fn floor_at(value: Option<f64>, default: f64, min: f64) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v.max(min),
        _ => default,
    }
}

fn run_length(value: i64) -> usize {
    usize::try_from(value.max(MIN_INCREASING_DELTAS_THRESHOLD))
        .unwrap_or(usize::MAX)
}

/// How the CLI renders verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// One JSON object per line
    Jsonl,
}

/// Persistent configuration for the `scroll-intent` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classifier settings used when no flag overrides them
    pub classifier: ClassifierOptions,

    /// Default output format
    pub output_format: OutputFormat,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scroll-intent")
            .join("config.json")
    }

    /// The resolved thresholds, with `overrides` taking precedence.
    pub fn classifier_config(&self, overrides: &ClassifierOptions) -> ClassifierConfig {
        ClassifierConfig::from(self.classifier.merge(overrides))
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classifier_config() {
        let config = ClassifierConfig::from(ClassifierOptions::default());
        assert_eq!(config, ClassifierConfig::default());
        assert_eq!(config.sensitivity, 2.0);
        assert_eq!(config.delay, 100.0);
        assert_eq!(config.high_velocity, 100.0);
        assert_eq!(config.increasing_deltas_threshold, 3);
    }

    #[test]
    fn test_values_are_clamped_to_floors() {
        let config = ClassifierConfig::from(ClassifierOptions {
            sensitivity: Some(-5.0),
            delay: Some(0.0),
            high_velocity: Some(0.5),
            increasing_deltas_threshold: Some(0),
        });
        assert_eq!(config.sensitivity, 1.0);
        assert_eq!(config.delay, 1.0);
        assert_eq!(config.high_velocity, 1.0);
        assert_eq!(config.increasing_deltas_threshold, 2);
    }

    #[test]
    fn test_negative_run_threshold_is_clamped() {
        let options: ClassifierOptions =
            serde_json::from_str(r#"{ "increasingDeltasThreshold": -1, "delay": 50 }"#)
                .unwrap();
        assert_eq!(options.increasing_deltas_threshold, Some(-1));

        let config = ClassifierConfig::from(&options);
        assert_eq!(config.increasing_deltas_threshold, 2);
        assert_eq!(config.delay, 50.0);
    }

    #[test]
    fn test_fractional_run_threshold_is_truncated() {
        let options: ClassifierOptions =
            serde_json::from_str(r#"{ "increasingDeltasThreshold": 4.7 }"#)
                .unwrap();
        assert_eq!(options.increasing_deltas_threshold, Some(4));

        let options: ClassifierOptions =
            serde_json::from_str(r#"{ "increasingDeltasThreshold": null }"#)
                .unwrap();
        assert_eq!(options.increasing_deltas_threshold, None);
    }

    #[test]
    fn test_config_file_with_negative_run_threshold_loads() {
        let path = std::env::temp_dir()
            .join(format!("scroll-intent-negative-run-{}", std::process::id()))
            .join("config.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{ "classifier": { "increasingDeltasThreshold": -1, "delay": 50 } }"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let resolved = config.classifier_config(&ClassifierOptions::default());
        assert_eq!(resolved.increasing_deltas_threshold, 2);
        assert_eq!(resolved.delay, 50.0);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_nan_falls_back_to_default() {
        let config = ClassifierConfig::from(ClassifierOptions {
            delay: Some(f64::NAN),
            ..Default::default()
        });
        assert_eq!(config.delay, DEFAULT_DELAY_MS);
    }

    #[test]
    fn test_options_merge() {
        let base = ClassifierOptions {
            sensitivity: Some(5.0),
            delay: Some(150.0),
            ..Default::default()
        };
        let overrides = ClassifierOptions {
            delay: Some(80.0),
            ..Default::default()
        };
        let merged = base.merge(&overrides);
        assert_eq!(merged.sensitivity, Some(5.0));
        assert_eq!(merged.delay, Some(80.0));
        assert_eq!(merged.high_velocity, None);
    }

    #[test]
    fn test_options_parse_camel_case() {
        let options: ClassifierOptions =
            serde_json::from_str(r#"{ "highVelocity": 250, "increasingDeltasThreshold": 4 }"#)
                .unwrap();
        assert_eq!(options.high_velocity, Some(250.0));
        assert_eq!(options.increasing_deltas_threshold, Some(4));
        assert_eq!(options.sensitivity, None);
    }

    #[test]
    fn test_config_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("scroll-intent-config-test-{}", std::process::id()))
            .join("config.json");

        let config = Config {
            classifier: ClassifierOptions {
                sensitivity: Some(4.0),
                ..Default::default()
            },
            output_format: OutputFormat::Jsonl,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.classifier.sensitivity, Some(4.0));
        assert_eq!(loaded.output_format, OutputFormat::Jsonl);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_config_is_default() {
        let path = std::env::temp_dir().join("scroll-intent-does-not-exist.json");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.classifier, ClassifierOptions::default());
    }
}
