//! Auto-Updater Gate
//!
//! The updater itself runs elsewhere; this module only answers "may it run?".
//! Two inputs feed that decision: the persisted `auto_updater_status` flag
//! and the `DISABLE_AUTOUPDATER` environment variable. Env wins.

use serde::{Deserialize, Serialize};

use crate::config::ConfigStore;
use crate::utils::is_truthy;

/// Env var that force-disables the auto-updater regardless of stored config.
pub const DISABLE_AUTOUPDATER_ENV: &str = "DISABLE_AUTOUPDATER";

/// Persisted auto-updater preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoUpdaterStatus {
    #[default]
    Enabled,
    Disabled,
}

impl AutoUpdaterStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

impl std::str::FromStr for AutoUpdaterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "enabled" => Ok(Self::Enabled),
            "disabled" => Ok(Self::Disabled),
            other => Err(format!(
                "unknown auto-updater status '{other}' (expected 'enabled' or 'disabled')"
            )),
        }
    }
}

/// Combine the env override with the stored preference. A truthy env value
/// forces `Disabled`; otherwise the stored flag stands.
pub fn resolve_auto_updater_status(
    env_value: Option<&str>,
    configured: AutoUpdaterStatus,
) -> AutoUpdaterStatus {
    match env_value {
        Some(v) if is_truthy(v) => AutoUpdaterStatus::Disabled,
        _ => configured,
    }
}

/// Whether the auto-updater is disabled for this process.
pub fn is_auto_updater_disabled(store: &ConfigStore) -> bool {
    let env_value = std::env::var(DISABLE_AUTOUPDATER_ENV).ok();
    let resolved = resolve_auto_updater_status(
        env_value.as_deref(),
        store.config().auto_updater_status,
    );
    resolved == AutoUpdaterStatus::Disabled
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_status_serde_strings() {
        assert_eq!(
            serde_json::to_string(&AutoUpdaterStatus::Enabled).unwrap(),
            r#""enabled""#
        );
        let parsed: AutoUpdaterStatus = serde_json::from_str(r#""disabled""#).unwrap();
        assert_eq!(parsed, AutoUpdaterStatus::Disabled);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "Enabled".parse::<AutoUpdaterStatus>().unwrap(),
            AutoUpdaterStatus::Enabled
        );
        assert!("sometimes".parse::<AutoUpdaterStatus>().is_err());
    }

    #[rstest]
    #[case(None, AutoUpdaterStatus::Enabled, AutoUpdaterStatus::Enabled)]
    #[case(None, AutoUpdaterStatus::Disabled, AutoUpdaterStatus::Disabled)]
    #[case(Some("1"), AutoUpdaterStatus::Enabled, AutoUpdaterStatus::Disabled)]
    #[case(Some("true"), AutoUpdaterStatus::Disabled, AutoUpdaterStatus::Disabled)]
    #[case(Some("0"), AutoUpdaterStatus::Enabled, AutoUpdaterStatus::Enabled)]
    #[case(Some("false"), AutoUpdaterStatus::Disabled, AutoUpdaterStatus::Disabled)]
    #[case(Some(""), AutoUpdaterStatus::Enabled, AutoUpdaterStatus::Enabled)]
    fn test_env_overrides_stored_config(
        #[case] env_value: Option<&str>,
        #[case] configured: AutoUpdaterStatus,
        #[case] expected: AutoUpdaterStatus,
    ) {
        assert_eq!(resolve_auto_updater_status(env_value, configured), expected);
    }

    #[test]
    fn test_disabled_via_stored_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = crate::config::ConfigStore::new(dir.path().join("config.json"));
        store.update(|config| config.auto_updater_status = AutoUpdaterStatus::Disabled);

        assert!(is_auto_updater_disabled(&store));
    }
}
