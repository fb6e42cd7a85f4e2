//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Mansion mystery: explore the rooms, collect clues, accuse a suspect
#[derive(Parser, Debug)]
#[command(name = "mansion")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output to stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a game (default)
    Play {
        /// Scenario file instead of the configured one
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        scenario: Option<PathBuf>,
        /// Do not reveal which suspect a clue points to
        #[arg(long)]
        no_hints: bool,
    },

    /// Show the mansion layout as a tree
    Map {
        /// Scenario file instead of the configured one
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        scenario: Option<PathBuf>,
    },

    /// List suspects and the clues pointing to them
    Suspects {
        /// Scenario file instead of the configured one
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        scenario: Option<PathBuf>,
    },

    /// Print the built-in scenario as TOML (template for own mansions)
    Scenario,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show config file locations
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_debug_flag_counts() {
        let cli = Cli::parse_from(["mansion", "-ddd", "map"]);
        assert_eq!(cli.debug, 3);
        assert!(matches!(cli.command, Some(Commands::Map { scenario: None })));
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let cli = Cli::parse_from(["mansion"]);
        assert!(cli.command.is_none());
    }
}
