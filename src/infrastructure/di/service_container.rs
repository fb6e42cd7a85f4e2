//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::{GameOptions, GameService};
use crate::application::{ApplicationError, Scenario};
use crate::config::Settings;
use crate::infrastructure::traits::{Console, TerminalConsole};
use crate::infrastructure::{InfraError, InfraResult};
use crate::util::path::expand_path;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Player console
    pub console: Arc<dyn Console>,
}

impl ServiceContainer {
    /// Create a new service container with the real terminal.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(TerminalConsole))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, console: Arc<dyn Console>) -> Self {
        Self {
            settings: Arc::new(settings),
            console,
        }
    }

    /// Game service configured from the settings.
    pub fn game_service(&self) -> GameService {
        GameService::new(Arc::clone(&self.console), GameOptions::from(self.settings.as_ref()))
    }

    /// Loads the scenario to play.
    ///
    /// An explicit path wins over the configured one; with neither, the
    /// built-in mansion is used.
    pub fn load_scenario(&self, explicit: Option<&Path>) -> InfraResult<Scenario> {
        let path = match explicit {
            Some(p) => expand_path(p),
            None => match &self.settings.scenario {
                Some(p) => p.clone(),
                None => {
                    debug!("using built-in scenario");
                    return Ok(Scenario::reference());
                }
            },
        };
        debug!("loading scenario from {}", path.display());

        if !path.is_file() {
            return Err(ApplicationError::ScenarioNotFound(path).into());
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| InfraError::io(format!("read scenario {}", path.display()), e))?;
        Ok(Scenario::from_toml_str(&content, &path.display().to_string())?)
    }
}
