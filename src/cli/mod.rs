//! CLI Module
//!
//! Command-line interface for carapace using Clap v4.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::config::{self, ConfigStore};

/// carapace - Session bookkeeping, startup tips, and usage telemetry
#[derive(Parser, Debug)]
#[command(name = "carapace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug mode (creates log files in ~/.carapace/logs/)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Config file path (default: ~/.carapace/config.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a session start and print the best eligible tip (default)
    Tip,

    /// Show the startup count and per-tip display history
    History,

    /// Config operations
    Config {
        #[command(subcommand)]
        operation: ConfigCommands,
    },

    /// Clear tips history, or the whole config record with --all
    Reset {
        /// Reset every field, not just tips history
        #[arg(long)]
        all: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the resolved config record as JSON
    Show,
    /// Print the config file path
    Path,
    /// Persist the auto-updater preference: enabled or disabled
    SetAutoUpdater { status: String },
}

/// Main CLI entry point
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = crate::logging::init(cli.debug);

    let store_override;
    let store: &ConfigStore = match &cli.config {
        Some(path) => {
            store_override = ConfigStore::new(path.clone());
            &store_override
        }
        None => config::global(),
    };

    match cli.command {
        None | Some(Commands::Tip) => commands::cmd_tip(store).await,
        Some(Commands::History) => commands::cmd_history(store),
        Some(Commands::Config { operation }) => commands::cmd_config(store, operation),
        Some(Commands::Reset { all }) => commands::cmd_reset(store, all),
        Some(Commands::Completions { shell }) => {
            commands::cmd_completions(shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_tip() {
        let cli = Cli::parse_from(["carapace"]);
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_config_path_flag() {
        let cli = Cli::parse_from(["carapace", "--config", "/tmp/other.json", "history"]);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/other.json")));
        assert!(matches!(cli.command, Some(Commands::History)));
    }
}
