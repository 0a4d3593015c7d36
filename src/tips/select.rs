//! Tip eligibility and selection.
//!
//! Pure reads over the config record. A tip never shown has unbounded
//! priority; otherwise priority is the number of sessions elapsed since its
//! last display.

use crate::config::ConfigStore;

use super::Tip;

/// Sessions elapsed since the tip was last shown.
///
/// `None` means never shown (stored value 0 or absent), which ranks above
/// every finite delta.
pub fn startup_difference(store: &ConfigStore, tip_id: &str) -> Option<u64> {
    let config = store.config();
    match config.tips_history.get(tip_id).copied().unwrap_or(0) {
        0 => None,
        shown_at => Some(config.num_startups.saturating_sub(shown_at)),
    }
}

/// Tips whose cooldown has elapsed (or that were never shown).
pub fn eligible_tips(store: &ConfigStore, tips: &[Tip]) -> Vec<Tip> {
    tips.iter()
        .filter(|tip| match startup_difference(store, &tip.id) {
            None => true,
            Some(delta) => delta >= tip.cooldown_sessions,
        })
        .cloned()
        .collect()
}

/// Pick the candidate with the most sessions since last display.
///
/// Never-shown tips win over all shown ones; ties keep input order (stable
/// sort), so callers control tie-breaking by how they order the slice.
pub fn tip_with_most_sessions(store: &ConfigStore, tips: &[Tip]) -> Option<Tip> {
    match tips {
        [] => None,
        [only] => Some(only.clone()),
        _ => {
            let mut ranked: Vec<(&Tip, u64)> = tips
                .iter()
                .map(|tip| {
                    let sessions =
                        startup_difference(store, &tip.id).unwrap_or(u64::MAX);
                    (tip, sessions)
                })
                .collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            ranked.first().map(|(tip, _)| (*tip).clone())
        }
    }
}
