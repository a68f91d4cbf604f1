//! Platform configuration for `shadowops`.
//!
//! Settings come from an optional TOML file, then the environment, then CLI
//! flags. The file is `--config <path>` if given, otherwise `shadowops.toml`
//! in the working directory if present, otherwise built-in defaults.
//!
//! # Example
//!
//! ```toml
//! fixtures = "data/alpha.json"
//!
//! [intelligence]
//! model = "gemini-3-flash-preview"
//! timeout_secs = 30
//!
//! [governance]
//! privacy_mode = true
//!
//! [inference]
//! gravity_alert_threshold = 65
//! confidence_cutoff = "medium"
//!
//! [notifications]
//! intervention_reports = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shadowops_intel::IntelConfig;

/// Name of the settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "shadowops.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse '{path}': {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Fixture document replacing the bundled demo data.
    pub fixtures: Option<PathBuf>,
    pub intelligence: IntelConfig,
    pub governance: Governance,
    pub inference: Inference,
    pub notifications: Notifications,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Governance {
    /// Metadata-only ingestion: never ingest message content or identifiers.
    pub privacy_mode: bool,
    /// Map personal identifiers to role-based aliases.
    pub anonymous_actor_mapping: bool,
}

impl Default for Governance {
    fn default() -> Self {
        Governance {
            privacy_mode: true,
            anonymous_actor_mapping: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inference {
    /// Nodes above this gravity are flagged. Range 10-100.
    pub gravity_alert_threshold: u32,
    pub confidence_cutoff: ConfidenceCutoff,
    pub learning_rate: LearningRate,
}

impl Default for Inference {
    fn default() -> Self {
        Inference {
            gravity_alert_threshold: 65,
            confidence_cutoff: ConfidenceCutoff::Discovery,
            learning_rate: LearningRate::Standard,
        }
    }
}

/// Minimum insight confidence shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceCutoff {
    /// 85% and up.
    High,
    /// 65% and up.
    Medium,
    /// Everything.
    Discovery,
}

impl ConfidenceCutoff {
    pub fn min_confidence(self) -> f64 {
        match self {
            ConfidenceCutoff::High => 0.85,
            ConfidenceCutoff::Medium => 0.65,
            ConfidenceCutoff::Discovery => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningRate {
    /// Weekly.
    Standard,
    /// Daily.
    Aggressive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notifications {
    pub executive_summaries: bool,
    pub high_gravity_alerts: bool,
    pub intervention_reports: bool,
}

impl Default for Notifications {
    fn default() -> Self {
        Notifications {
            executive_summaries: true,
            high_gravity_alerts: true,
            intervention_reports: false,
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, or from `shadowops.toml` in the working
    /// directory when it exists, then overlay the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
        let settings = match explicit {
            Some(path) => Self::read(path)?,
            None => {
                let default_path = Path::new(DEFAULT_SETTINGS_FILE);
                if default_path.is_file() {
                    Self::read(default_path)?
                } else {
                    Settings::default()
                }
            }
        };
        let mut settings = settings;
        settings.intelligence = settings.intelligence.with_env();
        Ok(settings)
    }

    /// Read and validate one TOML file. The environment is not consulted.
    pub fn read(path: &Path) -> Result<Settings, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut settings = Self::parse(&content).map_err(|e| match e {
            ParseFailure::Toml(source) => ConfigError::Toml {
                path: path.display().to_string(),
                source,
            },
            ParseFailure::Invalid(err) => err,
        })?;
        // Relative fixture paths are relative to the settings file.
        if let (Some(fixtures), Some(dir)) = (settings.fixtures.as_mut(), path.parent()) {
            if fixtures.is_relative() {
                *fixtures = dir.join(&*fixtures);
            }
        }
        Ok(settings)
    }

    fn parse(content: &str) -> Result<Settings, ParseFailure> {
        let settings: Settings = toml::from_str(content).map_err(ParseFailure::Toml)?;
        settings.validate().map_err(ParseFailure::Invalid)?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.inference.gravity_alert_threshold;
        if !(10..=100).contains(&threshold) {
            return Err(ConfigError::Invalid {
                field: "inference.gravity_alert_threshold",
                message: format!("{} is outside 10-100", threshold),
            });
        }
        if self.intelligence.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "intelligence.model",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Settings, ConfigError> {
        Settings::parse(content).map_err(|e| match e {
            ParseFailure::Toml(source) => ConfigError::Toml {
                path: "<test>".to_string(),
                source,
            },
            ParseFailure::Invalid(err) => err,
        })
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let s = parse("").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.inference.gravity_alert_threshold, 65);
        assert!(s.governance.privacy_mode);
        assert!(!s.notifications.intervention_reports);
        assert_eq!(s.intelligence.model, "gemini-3-flash-preview");
    }

    #[test]
    fn sections_override_defaults() {
        let s = parse(
            r#"
fixtures = "alpha.json"

[intelligence]
model = "gemini-2.5-flash"
base_url = "http://localhost:9999"
timeout_secs = 3

[inference]
gravity_alert_threshold = 80
confidence_cutoff = "high"
learning_rate = "aggressive"
"#,
        )
        .unwrap();
        assert_eq!(s.fixtures, Some(PathBuf::from("alpha.json")));
        assert_eq!(s.intelligence.model, "gemini-2.5-flash");
        assert_eq!(s.intelligence.base_url, "http://localhost:9999");
        assert_eq!(s.intelligence.timeout_secs, Some(3));
        assert_eq!(s.inference.gravity_alert_threshold, 80);
        assert_eq!(s.inference.confidence_cutoff, ConfidenceCutoff::High);
        assert_eq!(s.inference.learning_rate, LearningRate::Aggressive);
    }

    #[test]
    fn api_key_is_not_read_from_file() {
        let s = parse("[intelligence]\napi_key = \"leaked\"\n").unwrap();
        assert!(s.intelligence.api_key.is_empty());
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let err = parse("[inference]\ngravity_alert_threshold = 5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "inference.gravity_alert_threshold", .. }
        ));
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        assert!(matches!(
            parse("treshold = 3\n").unwrap_err(),
            ConfigError::Toml { .. }
        ));
    }

    #[test]
    fn cutoffs() {
        assert_eq!(ConfidenceCutoff::High.min_confidence(), 0.85);
        assert_eq!(ConfidenceCutoff::Medium.min_confidence(), 0.65);
        assert_eq!(ConfidenceCutoff::Discovery.min_confidence(), 0.0);
    }
}
