//! Tests for scenario resolution in the ServiceContainer

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use mansion::application::{ApplicationError, Scenario};
use mansion::config::Settings;
use mansion::infrastructure::di::ServiceContainer;
use mansion::infrastructure::traits::ScriptedConsole;
use mansion::infrastructure::InfraError;

const SMALL_SCENARIO: &str = r#"
title = "Casa Pequena"

[mansion]
name = "Porao"
clue = "Chave enferrujada"

[mansion.right]
name = "Adega"
clue = "Garrafa aberta"

[suspects]
"Chave enferrujada" = "Jardineiro"
"Garrafa aberta" = "Jardineiro"
"#;

fn container(settings: Settings) -> ServiceContainer {
    ServiceContainer::with_deps(settings, Arc::new(ScriptedConsole::default()))
}

#[test]
fn given_no_scenario_configured_when_loading_then_builtin_mansion() {
    let scenario = container(Settings::default()).load_scenario(None).unwrap();
    assert_eq!(scenario, Scenario::reference());
}

#[test]
fn given_explicit_file_when_loading_then_parsed_and_buildable() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pequena.toml");
    fs::write(&path, SMALL_SCENARIO).unwrap();

    // Act
    let scenario = container(Settings::default()).load_scenario(Some(path.as_path())).unwrap();
    let (tree, table) = scenario.build(7).unwrap();

    // Assert
    assert_eq!(scenario.title, "Casa Pequena");
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.leaf_names(), vec!["Adega"]);
    assert_eq!(table.suspects(), vec!["Jardineiro"]);
}

#[test]
fn given_configured_scenario_when_loading_without_explicit_then_uses_configured() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pequena.toml");
    fs::write(&path, SMALL_SCENARIO).unwrap();
    let settings = Settings {
        scenario: Some(path),
        ..Settings::default()
    };

    let scenario = container(settings).load_scenario(None).unwrap();

    assert_eq!(scenario.mansion.name, "Porao");
}

#[test]
fn given_missing_file_when_loading_then_scenario_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nowhere.toml");

    let err = container(Settings::default()).load_scenario(Some(path.as_path())).unwrap_err();

    assert!(matches!(
        err,
        InfraError::Application(ApplicationError::ScenarioNotFound(_))
    ));
}

#[test]
fn given_invalid_toml_when_loading_then_scenario_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[mansion]\nclue = \"sem nome\"\n").unwrap();

    let err = container(Settings::default()).load_scenario(Some(path.as_path())).unwrap_err();

    assert!(err.to_string().contains("broken.toml"), "error: {err}");
}
