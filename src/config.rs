//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mansion/mansion.toml`
//! 3. Explicit config file: `--config <file>`
//! 4. Environment variables: `MANSION_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{DEFAULT_BUCKET_COUNT, SUSTAIN_THRESHOLD};
use crate::util::path::expand_path;

/// Unified configuration for mansion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Buckets of the clue -> suspect lookup table (default: 101)
    pub bucket_count: usize,
    /// Matching clues needed to sustain an accusation (default: 2)
    pub sustain_threshold: usize,
    /// Show the suspect a clue points to when it is found (default: true)
    pub show_suspect_hints: bool,
    /// Scenario file to play instead of the built-in mansion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            sustain_threshold: SUSTAIN_THRESHOLD,
            show_suspect_hints: true,
            scenario: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub bucket_count: Option<usize>,
    pub sustain_threshold: Option<usize>,
    pub show_suspect_hints: Option<bool>,
    pub scenario: Option<PathBuf>,
}

/// Get the XDG config directory for mansion.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mansion").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mansion.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            bucket_count: overlay.bucket_count.unwrap_or(self.bucket_count),
            sustain_threshold: overlay.sustain_threshold.unwrap_or(self.sustain_threshold),
            show_suspect_hints: overlay.show_suspect_hints.unwrap_or(self.show_suspect_hints),
            scenario: overlay.scenario.clone().or_else(|| self.scenario.clone()),
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the scenario path.
    fn expand_paths(&mut self) {
        if let Some(scenario) = &self.scenario {
            self.scenario = Some(expand_path(scenario));
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.bucket_count == 0 {
            return Err(ApplicationError::Config {
                message: "bucket_count must be at least 1".into(),
            });
        }
        if self.sustain_threshold == 0 {
            return Err(ApplicationError::Config {
                message: "sustain_threshold must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let path = expand_path(path);
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(&path)?);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply MANSION_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MANSION")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(config.get_int("bucket_count"), "bucket_count")? {
            settings.bucket_count = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("bucket_count out of range: {val}"),
            })?;
        }
        if let Some(val) = env_value(config.get_int("sustain_threshold"), "sustain_threshold")? {
            settings.sustain_threshold =
                usize::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("sustain_threshold out of range: {val}"),
                })?;
        }
        if let Some(val) = env_value(config.get_bool("show_suspect_hints"), "show_suspect_hints")? {
            settings.show_suspect_hints = val;
        }
        if let Some(val) = env_value(config.get_string("scenario"), "scenario")? {
            settings.scenario = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# mansion configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/mansion/mansion.toml
#   Explicit: mansion --config <file>
#   Env:      MANSION_* environment variables (e.g. MANSION_BUCKET_COUNT=53)

# Buckets of the clue -> suspect lookup table
# bucket_count = 101

# Matching clues needed to sustain an accusation
# sustain_threshold = 2

# Tell the player which suspect a clue points to when it is found
# show_suspect_hints = true

# Scenario file to play instead of the built-in mansion
# scenario = "~/mysteries/casa.toml"
"#
        .to_string()
    }
}

/// An unset variable is `None`; a set but unparsable one is an error.
fn env_value<T>(result: Result<T, ConfigError>, key: &str) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("MANSION_{}: {}", key.to_uppercase(), e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_match_reference_game() {
        let settings = Settings::default();
        assert_eq!(settings.bucket_count, 101);
        assert_eq!(settings.sustain_threshold, 2);
        assert!(settings.show_suspect_hints);
        assert!(settings.scenario.is_none());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified() {
        let base = Settings::default();
        let overlay = RawSettings {
            sustain_threshold: Some(3),
            ..RawSettings::default()
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.sustain_threshold, 3);
        assert_eq!(result.bucket_count, 101);
        assert!(result.show_suspect_hints);
    }

    #[test]
    fn given_zero_buckets_when_validating_then_errors() {
        let settings = Settings {
            bucket_count: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn given_tilde_in_scenario_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            scenario: Some(PathBuf::from("~/casa.toml")),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let scenario = settings.scenario.unwrap();
        assert!(scenario.starts_with(&home), "scenario should start with home: {}", scenario.display());
    }

    #[test]
    fn given_unset_key_when_reading_env_value_then_none() {
        let result: Result<i64, ConfigError> = Err(ConfigError::NotFound("bucket_count".into()));
        assert!(matches!(env_value(result, "bucket_count"), Ok(None)));
    }

    #[test]
    fn given_unparsable_value_when_reading_env_value_then_config_error() {
        let result: Result<i64, ConfigError> = Err(ConfigError::Message("invalid type".into()));
        let err = env_value(result, "bucket_count").unwrap_err();
        assert!(err.to_string().contains("MANSION_BUCKET_COUNT"), "error: {err}");
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.bucket_count.is_none());
    }
}
