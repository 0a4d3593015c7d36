//! Built-in tip catalog.
//!
//! Loaded from `~/.carapace/tips.json` at runtime, falling back to the
//! compiled-in set when the file is missing or unreadable. Users can edit
//! the file live; changes take effect on the next launch.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::carapace_home;

use super::Tip;

/// The catalog on disk: `{ "tips": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TipsCatalog {
    #[serde(default)]
    pub tips: Vec<Tip>,
}

impl TipsCatalog {
    /// Load from `~/.carapace/tips.json`, else compiled-in defaults.
    pub fn load() -> Self {
        Self::load_from_path(&tips_path())
    }

    /// Load from a specific path, else compiled-in defaults.
    pub fn load_from_path(path: &std::path::Path) -> Self {
        if let Ok(content) = std::fs::read_to_string(path) {
            match serde_json::from_str::<Self>(&content) {
                Ok(catalog) => return catalog,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse tips catalog at {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }
        Self::defaults()
    }

    /// Write the default catalog to `~/.carapace/tips.json` if absent, so
    /// users have a file to edit.
    pub fn write_defaults_if_missing() {
        let path = tips_path();
        if !path.exists() {
            let _ = std::fs::write(&path, DEFAULT_TIPS_JSON);
        }
    }

    /// Compiled-in defaults, used as fallback if the file is missing.
    pub fn defaults() -> Self {
        serde_json::from_str(DEFAULT_TIPS_JSON).unwrap_or_default()
    }
}

/// Path to the editable tips catalog: `~/.carapace/tips.json`
pub fn tips_path() -> PathBuf {
    carapace_home().join("tips.json")
}

// Default catalog (compiled in as fallback). Order matters: earlier entries
// win ties in the selector, so lead with the highest-leverage hints.
const DEFAULT_TIPS_JSON: &str = r#"{
  "tips": [
    {
      "id": "shell-mode",
      "text": "Prefix a message with ! to run it directly in your shell instead of sending it to the agent.",
      "cooldown_sessions": 10
    },
    {
      "id": "slash-commands",
      "text": "Type / to browse built-in and user-defined commands.",
      "cooldown_sessions": 8
    },
    {
      "id": "resume-session",
      "text": "Pick up where you left off: run with --session <id> to resume a previous conversation.",
      "cooldown_sessions": 12
    },
    {
      "id": "context-files",
      "text": "Keep an AGENTS.md in your repo root; its contents are loaded as standing instructions.",
      "cooldown_sessions": 15
    },
    {
      "id": "plan-first",
      "text": "Ask for a plan before a big refactor; approve it step by step instead of all at once.",
      "cooldown_sessions": 20
    },
    {
      "id": "edit-tips",
      "text": "These hints live in ~/.carapace/tips.json. Edit the file to add your own.",
      "cooldown_sessions": 40
    }
  ]
}"#;
