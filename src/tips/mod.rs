//! Startup Tips
//!
//! Ephemeral hints surfaced at launch, throttled by how many sessions have
//! elapsed since each tip was last shown. Selection is pure bookkeeping over
//! the config record; displaying a tip persists the current startup count
//! under the tip id and emits one telemetry event.

mod catalog;
mod select;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::ConfigStore;
use crate::telemetry::TelemetrySink;

pub use catalog::{TipsCatalog, tips_path};
pub use select::{eligible_tips, startup_difference, tip_with_most_sessions};

/// Telemetry event recorded once per displayed tip.
pub const TIP_SHOWN_EVENT: &str = "tengu_tip_shown";

/// One displayable hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    /// Stable identifier keyed into `tips_history`.
    pub id: String,

    /// The hint text printed to the user.
    pub text: String,

    /// Minimum sessions that must elapse before this tip repeats.
    #[serde(default)]
    pub cooldown_sessions: u64,
}

impl Tip {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        cooldown_sessions: u64,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            cooldown_sessions,
        }
    }
}

/// Mark a tip as shown at the current startup count and record the event.
///
/// Re-running at the same startup count rewrites the same value, so the call
/// is idempotent within a session. Telemetry is fire-and-forget.
pub fn show_tip_and_track(store: &ConfigStore, sink: &dyn TelemetrySink, tip: &Tip) {
    store.update(|config| {
        let shown_at = config.num_startups;
        config.tips_history.insert(tip.id.clone(), shown_at);
    });

    // "tipIdLength" is a historical payload key: it carries the tip id
    // itself, not a length. Collectors index on it as-is.
    sink.emit(
        TIP_SHOWN_EVENT,
        json!({
            "tipIdLength": tip.id,
            "cooldownSessions": tip.cooldown_sessions,
        }),
    );
}

/// Full startup flow: filter by cooldown, pick the stalest candidate, mark
/// it shown. Returns the tip to print, or `None` when nothing is eligible.
pub fn startup_tip(
    store: &ConfigStore,
    sink: &dyn TelemetrySink,
    tips: &[Tip],
) -> Option<Tip> {
    let eligible = eligible_tips(store, tips);
    let best = tip_with_most_sessions(store, &eligible)?;
    show_tip_and_track(store, sink, &best);
    Some(best)
}
