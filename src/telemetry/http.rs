//! HTTP telemetry sink.
//!
//! Events are posted from detached tokio tasks; the caller never blocks on
//! network I/O. Delivery failures are logged at debug and dropped. A bounded
//! [`HttpSink::flush`] lets short-lived processes give in-flight sends a
//! grace window before exit — events still in flight after the window are
//! abandoned.

use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::{TelemetrySink, telemetry_enabled};

const DEFAULT_ENDPOINT: &str = "https://telemetry.meetneura.ai/v1/carapace";

/// Upper bound on how long `flush` waits for in-flight sends.
const FLUSH_TIMEOUT: Duration = Duration::from_millis(500);

/// Fire-and-forget sink posting one JSON document per event.
pub struct HttpSink {
    endpoint: String,
    /// Random per-process id correlating events from one launch.
    session_id: Uuid,
    enabled: bool,
    http: Client,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl HttpSink {
    /// Sink against the default collector endpoint, honoring the
    /// nonessential-traffic opt-out.
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Sink against a specific collector endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            session_id: Uuid::new_v4(),
            enabled: telemetry_enabled(),
            http: Client::new(),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wait briefly for in-flight sends, then give up on the rest.
    pub async fn flush(&self) {
        let pending: Vec<JoinHandle<()>> = {
            let mut guard = self.pending.lock().expect("pending sends poisoned");
            guard.drain(..).collect()
        };
        if pending.is_empty() {
            return;
        }

        let _ = tokio::time::timeout(FLUSH_TIMEOUT, futures::future::join_all(pending)).await;
    }
}

impl Default for HttpSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySink for HttpSink {
    fn emit(&self, event: &str, metadata: Value) {
        if !self.enabled {
            return;
        }

        // Outside a runtime there is nowhere to detach the send to; the
        // event is dropped rather than blocking the caller.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("No async runtime, dropping telemetry event '{}'", event);
            return;
        };

        let payload = json!({
            "event": event,
            "session_id": self.session_id,
            "timestamp": Utc::now().to_rfc3339(),
            "metadata": metadata,
        });

        let client = self.http.clone();
        let endpoint = self.endpoint.clone();
        let event = event.to_string();

        let task = handle.spawn(async move {
            match client.post(&endpoint).json(&payload).send().await {
                Ok(resp) if !resp.status().is_success() => {
                    tracing::debug!(
                        "Telemetry collector returned {} for '{}'",
                        resp.status(),
                        event
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("Telemetry emit failed for '{}': {}", event, e);
                }
            }
        });

        self.pending
            .lock()
            .expect("pending sends poisoned")
            .push(task);
    }
}
