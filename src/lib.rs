//! carapace - Session Bookkeeping, Startup Tips, and Usage Telemetry
//!
//! The launch-time state layer for terminal AI assistants: a disk-backed
//! JSON config record tracking process startups, a cooldown-throttled
//! startup-tip rotation, and fire-and-forget telemetry events.
//!
//! ## Quick Start
//!
//! ```bash
//! # Record a session and print the best eligible tip
//! carapace
//!
//! # Inspect persisted state
//! carapace history
//! carapace config show
//! ```
//!
//! As a library:
//!
//! ```no_run
//! use carapace::config::ConfigStore;
//! use carapace::telemetry::NoopSink;
//! use carapace::tips::{Tip, startup_tip};
//!
//! let store = ConfigStore::at_default_location();
//! store.record_startup();
//! let tips = vec![Tip::new("shell-mode", "Use ! for shell commands.", 10)];
//! if let Some(tip) = startup_tip(&store, &NoopSink, &tips) {
//!     println!("{}", tip.text);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod telemetry;
pub mod tips;
pub mod updater;
pub mod utils;

// Re-export commonly used types
pub use error::CarapaceError;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
