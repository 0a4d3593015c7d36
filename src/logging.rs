//! Logging setup.
//!
//! `CARAPACE_LOG` takes an `EnvFilter` directive; without it the level is
//! `warn` (or `debug` in debug mode). Debug mode additionally writes to a
//! daily-rolled file under `~/.carapace/logs/` via a non-blocking appender.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::carapace_home;

/// Env var holding a tracing filter directive, e.g. `carapace=debug`.
pub const LOG_FILTER_ENV: &str = "CARAPACE_LOG";

/// Install the global subscriber. Call once, before any tracing output.
///
/// The returned guard must stay alive for the life of the process when file
/// logging is active; dropping it stops the background writer.
pub fn init(debug: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));

    if debug {
        let appender = tracing_appender::rolling::daily(carapace_home().join("logs"), "carapace.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        None
    }
}
