//! Error Types
//!
//! Library-level errors carry the offending path and the underlying source.
//! Most bookkeeping paths recover to defaults instead of propagating these;
//! they surface only where a caller asked for an explicit load or save.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarapaceError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config for {path}: {source}")]
    ConfigSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CarapaceError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
