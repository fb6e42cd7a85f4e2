//! Integration tests for Settings loading from an explicit config file.
//!
//! These tests assume no global config overrides the keys they write.

use std::fs;

use tempfile::TempDir;

use mansion::application::ApplicationError;
use mansion::config::Settings;

#[test]
fn given_explicit_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mansion.toml");
    fs::write(&path, "bucket_count = 53\nsustain_threshold = 3\n").unwrap();

    // Act
    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    // Assert
    assert_eq!(settings.bucket_count, 53);
    assert_eq!(settings.sustain_threshold, 3);
}

#[test]
fn given_missing_config_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = Settings::load(Some(path.as_path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_zero_threshold_in_file_when_load_then_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mansion.toml");
    fs::write(&path, "sustain_threshold = 0\n").unwrap();

    let err = Settings::load(Some(path.as_path())).unwrap_err();

    assert!(err.to_string().contains("sustain_threshold"), "unexpected error: {err}");
}

#[test]
fn given_malformed_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mansion.toml");
    fs::write(&path, "bucket_count = [not toml").unwrap();

    assert!(matches!(
        Settings::load(Some(path.as_path())),
        Err(ApplicationError::Config { .. })
    ));
}

#[test]
fn given_loaded_settings_when_shown_then_round_trips_as_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mansion.toml");
    fs::write(&path, "show_suspect_hints = false\n").unwrap();

    let settings = Settings::load(Some(path.as_path())).unwrap();
    let shown = settings.to_toml().unwrap();

    assert!(shown.contains("show_suspect_hints = false"), "shown: {shown}");
}
