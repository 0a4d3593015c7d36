//! Configuration record: fields, defaults, JSON (de)serialization.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CarapaceError;
use crate::updater::AutoUpdaterStatus;

/// Persistent application state, one JSON object on disk.
///
/// Every field carries a serde default so records written by older versions
/// (or hand-edited files with fields removed) still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Counter of process launches, incremented once per startup.
    #[serde(default)]
    pub num_startups: u64,

    /// Tip id → `num_startups` value at last display. 0 means never shown.
    #[serde(default)]
    pub tips_history: BTreeMap<String, u64>,

    /// Whether the auto-updater may run. Env vars can override at resolution
    /// time; this field holds the persisted preference only.
    #[serde(default)]
    pub auto_updater_status: AutoUpdaterStatus,

    /// Set after the one-time data sharing notice has been printed.
    #[serde(default)]
    pub initial_data_sharing_message_seen: bool,
}

impl Config {
    /// Load a config record from a JSON file.
    pub fn load_from_path(path: &Path) -> Result<Self, CarapaceError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| CarapaceError::io("reading config", path, source))?;

        let mut config: Self =
            serde_json::from_str(&contents).map_err(|source| CarapaceError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        config.normalize();
        Ok(config)
    }

    /// Write the full record to a JSON file, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<(), CarapaceError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| CarapaceError::io("creating config directory", path, source))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| {
            CarapaceError::ConfigSerialize {
                path: path.to_path_buf(),
                source,
            }
        })?;

        fs::write(path, json).map_err(|source| CarapaceError::io("writing config", path, source))
    }

    /// Re-establish the record invariant: no tips_history value exceeds
    /// `num_startups`. Out-of-range values (hand-edited files) are clamped.
    pub fn normalize(&mut self) {
        let ceiling = self.num_startups;
        for shown_at in self.tips_history.values_mut() {
            if *shown_at > ceiling {
                *shown_at = ceiling;
            }
        }
    }
}

/// Canonical base directory: `~/.carapace/`
///
/// All carapace data lives here: config, tips catalog override, logs.
pub fn carapace_home() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let p = home.join(".carapace");
    if !p.exists() {
        let _ = fs::create_dir_all(&p);
    }
    p
}

/// Default location of the persisted config record.
pub fn config_path() -> PathBuf {
    carapace_home().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.num_startups, 0);
        assert!(config.tips_history.is_empty());
        assert_eq!(config.auto_updater_status, AutoUpdaterStatus::Enabled);
        assert!(!config.initial_data_sharing_message_seen);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{ "num_startups": 7 }"#).unwrap();
        assert_eq!(config.num_startups, 7);
        assert!(config.tips_history.is_empty());
        assert_eq!(config.auto_updater_status, AutoUpdaterStatus::Enabled);
    }

    #[test]
    fn test_roundtrip_via_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config {
            num_startups: 12,
            auto_updater_status: AutoUpdaterStatus::Disabled,
            ..Config::default()
        };
        config.tips_history.insert("shell-mode".to_string(), 9);
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_clamps_history_above_startup_count() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "num_startups": 3, "tips_history": { "a": 99, "b": 2 } }"#,
        )
        .unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.tips_history["a"], 3);
        assert_eq!(loaded.tips_history["b"], 2);
    }

    #[test]
    fn test_load_corrupt_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json {{{").unwrap();

        assert!(matches!(
            Config::load_from_path(&path),
            Err(CarapaceError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("config.json");

        Config::default().save_to_path(&path).unwrap();
        assert!(path.exists());
    }
}
