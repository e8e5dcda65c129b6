//! Command-line interface definitions

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use script_bar_sdk::RunMode;
use std::path::PathBuf;

/// Launch package.json scripts from a button bar
///
/// Without a subcommand, opens the interactive bar for the project root.
#[derive(Parser, Debug)]
#[command(name = "script-bar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root containing package.json (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Run mode for tasks without a stored preference
    #[arg(long, global = true, value_name = "MODE", value_parser = parse_run_mode)]
    pub default_run_mode: Option<RunMode>,

    /// Do not report background task completion
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the tasks shown in the bar
    List {
        /// Include disabled tasks
        #[arg(long, short)]
        all: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show whether the project has a manifest and declared tasks
    Status,
    /// Sync the preference file with package.json
    Rescan,
    /// Run a task
    Run {
        #[arg(value_name = "TASK")]
        name: String,
        /// Override the task's run mode
        #[arg(long, short, value_name = "MODE", value_parser = parse_run_mode)]
        mode: Option<RunMode>,
        /// Run terminal-mode tasks in this terminal instead of a new window
        #[arg(long)]
        inline: bool,
    },
    /// Create the preference file if needed and print its path
    Settings {
        /// Print the global settings file instead
        #[arg(long)]
        global: bool,
    },
    /// Launch the interactive bar
    Tui,
    /// Generate shell completions
    Completions {
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

fn parse_run_mode(value: &str) -> Result<RunMode, String> {
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_with_mode() {
        let cli = Cli::parse_from(["script-bar", "--root", "/tmp/app", "run", "dev", "--mode", "terminal"]);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/app")));
        match cli.command {
            Some(Commands::Run { name, mode, inline }) => {
                assert_eq!(name, "dev");
                assert_eq!(mode, Some(RunMode::Terminal));
                assert!(!inline);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let result = Cli::try_parse_from(["script-bar", "run", "dev", "--mode", "sideways"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["script-bar", "-q"]);
        assert!(cli.command.is_none());
        assert!(cli.quiet);
    }
}
