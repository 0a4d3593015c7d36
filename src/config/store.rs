//! Cached config accessor.
//!
//! One `ConfigStore` owns the path to the persisted record and an in-memory
//! cache. The first read hits disk; afterwards the cache is authoritative for
//! the life of the process, including across failed writes. A process-wide
//! store at the default location is available via [`global`]; tests and
//! embedders construct their own against any path.

use std::path::PathBuf;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use super::types::{Config, config_path};

/// Disk-backed config record with a process-lifetime cache.
pub struct ConfigStore {
    path: PathBuf,
    cached: Mutex<Option<Config>>,
}

impl ConfigStore {
    /// Create a store reading and writing the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cached: Mutex::new(None),
        }
    }

    /// Store at the default location, `~/.carapace/config.json`.
    pub fn at_default_location() -> Self {
        Self::new(config_path())
    }

    /// Path of the persisted record.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Return the cached config, reading it from disk on first access.
    ///
    /// A missing or unreadable file yields the all-defaults record; either
    /// way the result is cached, so later calls never re-read storage.
    pub fn config(&self) -> Config {
        let mut cached = self.cached.lock().expect("config cache poisoned");
        if let Some(config) = cached.as_ref() {
            return config.clone();
        }

        let config = match Config::load_from_path(&self.path) {
            Ok(config) => config,
            Err(e) => {
                if self.path.exists() {
                    tracing::warn!("Falling back to default config: {}", e);
                } else {
                    tracing::debug!("No config at {} yet, using defaults", self.path.display());
                }
                Config::default()
            }
        };

        *cached = Some(config.clone());
        config
    }

    /// Apply a mutation to the cached config and persist the merged record.
    ///
    /// The write is synchronous and best-effort: a failure is logged and the
    /// in-memory cache keeps the mutated value regardless, so subsequent
    /// reads observe the update without re-reading storage.
    pub fn update(&self, mutate: impl FnOnce(&mut Config)) {
        // First access loads from disk; do it before taking the lock.
        let _ = self.config();

        let mut cached = self.cached.lock().expect("config cache poisoned");
        let config = cached.as_mut().expect("config cache filled above");

        mutate(config);
        config.normalize();

        if let Err(e) = config.save_to_path(&self.path) {
            tracing::warn!("Failed to persist config (keeping in-memory state): {}", e);
        }
    }

    /// Record one process launch: bump `num_startups` and persist.
    ///
    /// Returns the new startup count. Called once, early, before any tip is
    /// considered, so a displayed tip always records a count >= 1.
    pub fn record_startup(&self) -> u64 {
        self.update(|config| {
            config.num_startups += 1;
        });
        self.config().num_startups
    }
}

/// Process-wide store at the default location.
static GLOBAL: Lazy<ConfigStore> = Lazy::new(ConfigStore::at_default_location);

/// The process-wide [`ConfigStore`], initialized lazily on first access.
pub fn global() -> &'static ConfigStore {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("config.json"))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.config(), Config::default());
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), "][ not json").unwrap();
        let store = store_in(&dir);

        assert_eq!(store.config(), Config::default());
    }

    #[test]
    fn test_update_persists_and_caches() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);

        store.update(|config| {
            config.num_startups = 5;
            config.tips_history.insert("a".to_string(), 2);
        });

        // Cache reflects the update.
        assert_eq!(store.config().num_startups, 5);
        assert_eq!(store.config().tips_history["a"], 2);

        // And so does a fresh store reading the same file.
        let fresh = store_in(&dir);
        assert_eq!(fresh.config().num_startups, 5);
    }

    #[test]
    fn test_cache_survives_external_file_change() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);

        store.update(|config| config.num_startups = 3);
        fs::write(dir.path().join("config.json"), r#"{ "num_startups": 99 }"#).unwrap();

        // Loaded once, cached for the life of the process.
        assert_eq!(store.config().num_startups, 3);
    }

    #[test]
    fn test_update_enforces_history_invariant() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);

        store.update(|config| {
            config.num_startups = 4;
            config.tips_history.insert("rogue".to_string(), 40);
        });

        assert_eq!(store.config().tips_history["rogue"], 4);
    }

    #[test]
    fn test_record_startup_increments_and_persists() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.record_startup(), 1);
        assert_eq!(store.record_startup(), 2);

        let fresh = store_in(&dir);
        assert_eq!(fresh.config().num_startups, 2);
    }

    #[test]
    fn test_update_survives_unwritable_path() {
        // Parent dir cannot be created under a file, so every save fails;
        // the cache must still carry the mutation.
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let store = ConfigStore::new(blocker.join("sub").join("config.json"));

        store.update(|config| config.num_startups = 8);
        assert_eq!(store.config().num_startups, 8);
    }
}
