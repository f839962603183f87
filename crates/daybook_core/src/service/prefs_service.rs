//! Theme preference persistence.

use crate::repo::kv_repo::{KvStore, StoreResult};
use crate::service::load_or_default;
use serde::{Deserialize, Serialize};

const PREFS_KEY: &str = "prefs";

/// Color scheme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Persisted appearance preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePrefs {
    pub theme: Theme,
    /// Accent color as a CSS hex string.
    pub accent: String,
}

impl Default for ThemePrefs {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            accent: "#6c5ce7".to_string(),
        }
    }
}

/// Preference facade over the key-value store.
pub struct PrefsService<S: KvStore> {
    store: S,
}

impl<S: KvStore> PrefsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored preferences, or defaults when absent/malformed.
    pub fn prefs(&self) -> StoreResult<ThemePrefs> {
        load_or_default(&self.store, PREFS_KEY, "prefs")
    }

    /// Replaces the stored preferences.
    pub fn set_prefs(&self, prefs: &ThemePrefs) -> StoreResult<()> {
        self.store.put_json(PREFS_KEY, prefs)
    }
}
