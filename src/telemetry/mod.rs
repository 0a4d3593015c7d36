//! Telemetry
//!
//! Fire-and-forget event emission behind a sink trait. Nothing in the
//! bookkeeping flow ever waits on, retries, or observes a telemetry failure;
//! a sink that cannot deliver simply drops the event.

mod http;

use std::sync::Mutex;

use serde_json::Value;

use crate::config::ConfigStore;
use crate::utils::env_flag;

pub use http::HttpSink;

/// Env var that disables all telemetry traffic for this process.
pub const DISABLE_NONESSENTIAL_TRAFFIC_ENV: &str = "CARAPACE_DISABLE_NONESSENTIAL_TRAFFIC";

/// Whether telemetry traffic is allowed in this environment.
pub fn telemetry_enabled() -> bool {
    !env_flag(DISABLE_NONESSENTIAL_TRAFFIC_ENV)
}

/// Destination for telemetry events.
///
/// `metadata` is a flat JSON object of event attributes. Implementations must
/// return quickly and must not propagate delivery failures.
pub trait TelemetrySink: Send + Sync {
    fn emit(&self, event: &str, metadata: Value);
}

/// Sink that discards every event.
#[derive(Debug, Default)]
pub struct NoopSink;

impl TelemetrySink for NoopSink {
    fn emit(&self, _event: &str, _metadata: Value) {}
}

/// Sink that records events in memory. Used by tests and by embedders that
/// batch events through their own transport.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<(String, Value)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events emitted so far, in order.
    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().expect("event buffer poisoned").clone()
    }
}

impl TelemetrySink for MemorySink {
    fn emit(&self, event: &str, metadata: Value) {
        self.events
            .lock()
            .expect("event buffer poisoned")
            .push((event.to_string(), metadata));
    }
}

/// Print the one-time data sharing notice if it has not been shown yet.
///
/// Returns true when the notice was printed on this call. The seen flag is
/// persisted immediately so the notice never repeats.
pub fn maybe_show_data_sharing_notice(store: &ConfigStore) -> bool {
    if store.config().initial_data_sharing_message_seen {
        return false;
    }

    eprintln!("carapace shares anonymous usage events (tip ids, launch counts) to improve");
    eprintln!(
        "the built-in hints. Set {}=1 to opt out.",
        DISABLE_NONESSENTIAL_TRAFFIC_ENV
    );
    eprintln!();

    store.update(|config| config.initial_data_sharing_message_seen = true);
    true
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.emit("first", json!({ "n": 1 }));
        sink.emit("second", json!({ "n": 2 }));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, "first");
        assert_eq!(events[1].1, json!({ "n": 2 }));
    }

    #[test]
    fn test_data_sharing_notice_shown_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        assert!(maybe_show_data_sharing_notice(&store));
        assert!(!maybe_show_data_sharing_notice(&store));
        assert!(store.config().initial_data_sharing_message_seen);
    }
}
