//! Desktop runtime persistence adapters for the injected window-placement configuration.
//!
//! Window records themselves are never persisted; only [`DesktopConfig`] survives reloads.

use platform_host::{load_pref_with, save_pref_with, PrefsStore};
use serde_json::Value;

use crate::model::{DesktopConfig, DESKTOP_CONFIG_SCHEMA_VERSION};

/// Preference key holding the serialized [`DesktopConfig`].
pub const DESKTOP_CONFIG_KEY: &str = "retrodesk.desktop.config.v1";

fn migrate_desktop_config(
    schema_version: Option<u32>,
    raw: Value,
) -> Result<Option<DesktopConfig>, String> {
    match schema_version {
        Some(0 | DESKTOP_CONFIG_SCHEMA_VERSION) => {
            let mut config: DesktopConfig =
                serde_json::from_value(raw).map_err(|e| e.to_string())?;
            config.schema_version = DESKTOP_CONFIG_SCHEMA_VERSION;
            Ok(Some(config))
        }
        _ => Ok(None),
    }
}

/// Loads the persisted desktop configuration, falling back to defaults.
///
/// Missing, malformed, or future-versioned values yield [`DesktopConfig::default`]; failures are
/// logged rather than returned so boot never blocks on preferences.
pub fn load_desktop_config<S: PrefsStore + ?Sized>(store: &S) -> DesktopConfig {
    let raw = match load_pref_with::<_, Value>(store, DESKTOP_CONFIG_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return DesktopConfig::default(),
        Err(err) => {
            log::warn!("desktop config load failed: {err}");
            return DesktopConfig::default();
        }
    };

    let schema_version = match raw.get("schema_version") {
        None => Some(0),
        Some(value) => value.as_u64().and_then(|v| u32::try_from(v).ok()),
    };
    match migrate_desktop_config(schema_version, raw) {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::warn!("desktop config schema {schema_version:?} is not supported; using defaults");
            DesktopConfig::default()
        }
        Err(err) => {
            log::warn!("desktop config is malformed: {err}");
            DesktopConfig::default()
        }
    }
}

/// Persists the desktop configuration through the preference store.
pub fn persist_desktop_config<S: PrefsStore + ?Sized>(
    store: &S,
    config: &DesktopConfig,
) -> Result<(), String> {
    save_pref_with(store, DESKTOP_CONFIG_KEY, config)
}
