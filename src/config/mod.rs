//! Configuration Module
//!
//! Disk-backed JSON config record plus the process-wide cached accessor.

mod store;
mod types;

pub use store::{ConfigStore, global};
pub use types::{Config, carapace_home, config_path};
