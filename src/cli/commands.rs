//! CLI command handlers.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::config::{Config, ConfigStore};
use crate::telemetry::{HttpSink, TelemetrySink, maybe_show_data_sharing_notice};
use crate::tips::{self, Tip, TipsCatalog, startup_difference};
use crate::updater::{AutoUpdaterStatus, DISABLE_AUTOUPDATER_ENV, is_auto_updater_disabled};
use crate::utils::env_flag;

use super::{Cli, ConfigCommands};

/// `carapace tip` (and the bare invocation): record the session, surface
/// the best eligible tip, track and report it.
pub async fn cmd_tip(store: &ConfigStore) -> Result<()> {
    TipsCatalog::write_defaults_if_missing();
    let catalog = TipsCatalog::load();

    let sink = HttpSink::new();
    run_tip(store, &sink, &catalog.tips);

    // Give the tip event a grace window before the process exits.
    sink.flush().await;
    Ok(())
}

/// One startup turn: bump the counter, one-time notice, pick and print.
fn run_tip(store: &ConfigStore, sink: &dyn TelemetrySink, tips: &[Tip]) -> Option<Tip> {
    let startups = store.record_startup();
    maybe_show_data_sharing_notice(store);

    let picked = tips::startup_tip(store, sink, tips);
    match &picked {
        Some(tip) => println!("\u{1f4a1} {}", tip.text),
        None => tracing::debug!("No eligible tip at startup {}", startups),
    }
    picked
}

/// `carapace history`
pub fn cmd_history(store: &ConfigStore) -> Result<()> {
    let config = store.config();
    println!("Startups recorded: {}", config.num_startups);

    if config.tips_history.is_empty() {
        println!("No tips shown yet.");
        return Ok(());
    }

    println!();
    println!("{:<24} {:>10} {:>10}", "tip", "shown at", "sessions");
    for (id, shown_at) in &config.tips_history {
        let sessions = match startup_difference(store, id) {
            Some(delta) => delta.to_string(),
            None => "never".to_string(),
        };
        println!("{:<24} {:>10} {:>10}", id, shown_at, sessions);
    }
    Ok(())
}

/// `carapace config <show|path|set-auto-updater>`
pub fn cmd_config(store: &ConfigStore, operation: ConfigCommands) -> Result<()> {
    match operation {
        ConfigCommands::Show => {
            let config = store.config();
            println!("{}", serde_json::to_string_pretty(&config)?);
            // Stderr so piped JSON stays clean.
            let effective = if is_auto_updater_disabled(store) {
                "disabled"
            } else {
                "enabled"
            };
            eprintln!("effective auto-updater status: {effective}");
        }
        ConfigCommands::Path => {
            println!("{}", store.path().display());
        }
        ConfigCommands::SetAutoUpdater { status } => {
            let status: AutoUpdaterStatus =
                status.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            store.update(|config| config.auto_updater_status = status);
            println!("Auto-updater {}.", status.as_str());

            if env_flag(DISABLE_AUTOUPDATER_ENV) {
                println!(
                    "Note: {} is set and overrides this preference.",
                    DISABLE_AUTOUPDATER_ENV
                );
            }
        }
    }
    Ok(())
}

/// `carapace reset [--all]`
pub fn cmd_reset(store: &ConfigStore, all: bool) -> Result<()> {
    if all {
        store.update(|config| *config = Config::default());
        println!("Config reset to defaults.");
    } else {
        store.update(|config| config.tips_history.clear());
        println!("Tips history cleared.");
    }
    Ok(())
}

/// `carapace completions <shell>`
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
