//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::GameOutcome;
use crate::application::{ApplicationError, Scenario};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::CliResult;
use crate::config::{global_config_path, Settings};
use crate::domain::TreeDisplay;
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None => play(cli, None, false),
        Some(Commands::Play { scenario, no_hints }) => play(cli, scenario.as_deref(), *no_hints),
        Some(Commands::Map { scenario }) => map(cli, scenario.as_deref()),
        Some(Commands::Suspects { scenario }) => suspects(cli, scenario.as_deref()),
        Some(Commands::Scenario) => print_scenario(),
        Some(Commands::Config { command }) => config(cli, command),
        Some(Commands::Completion { shell }) => completion(*shell),
    }
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = Settings::load(cli.config.as_deref())?;
    Ok(ServiceContainer::new(settings))
}

#[instrument(skip(cli))]
fn play(cli: &Cli, scenario: Option<&Path>, no_hints: bool) -> CliResult<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if no_hints {
        settings.show_suspect_hints = false;
    }
    let container = ServiceContainer::new(settings);
    let scenario = container.load_scenario(scenario)?;
    let (mut tree, mut table) = scenario
        .build(container.settings.bucket_count)
        .map_err(ApplicationError::from)?;

    if !scenario.title.is_empty() {
        output::header(&scenario.title);
    }
    let report = container.game_service().play(&tree, &table)?;
    match &report.outcome {
        GameOutcome::NoAccusation => debug!("game over without accusation"),
        GameOutcome::Judged { outcome, .. } => debug!("game over: {}", outcome),
    }

    tree.release();
    table.clear();
    Ok(())
}

#[instrument(skip(cli))]
fn map(cli: &Cli, scenario: Option<&Path>) -> CliResult<()> {
    let container = container(cli)?;
    let scenario = container.load_scenario(scenario)?;
    let (tree, _) = scenario
        .build(container.settings.bucket_count)
        .map_err(ApplicationError::from)?;

    output::info(&tree.to_tree_string());
    output::action("rooms", &tree.len());
    output::action("dead ends", &tree.leaf_names().join(", "));
    Ok(())
}

#[instrument(skip(cli))]
fn suspects(cli: &Cli, scenario: Option<&Path>) -> CliResult<()> {
    let container = container(cli)?;
    let scenario = container.load_scenario(scenario)?;
    let (_, table) = scenario
        .build(container.settings.bucket_count)
        .map_err(ApplicationError::from)?;

    for suspect in table.suspects() {
        output::header(suspect);
        let clues = table
            .iter()
            .filter(|(_, s)| *s == suspect)
            .map(|(clue, _)| clue)
            .sorted();
        for clue in clues {
            output::detail(clue);
        }
    }
    Ok(())
}

fn print_scenario() -> CliResult<()> {
    output::info(&Scenario::reference().to_toml()?);
    Ok(())
}

fn config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let container = container(cli)?;
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if path.exists() { "exists" } else { "not found" };
                output::action("global", &format!("{} ({})", path.display(), state));
            }
            None => output::action("global", &"no config directory on this platform"),
        },
    }
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
