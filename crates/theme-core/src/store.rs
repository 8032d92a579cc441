//! In-memory scoped configuration store.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigKey, ConfigScope, ScopedConfigStore};
use crate::error::{load_structured_file, ThemeResult};

/// A stored setting as written in a config file.
///
/// Files may use native TOML/JSON types; everything is kept as text so the
/// accessor applies the same interpretation rules as the platform store.
/// Any other value (float, array, table) is kept as its JSON text and
/// resolves like any other malformed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSetting {
    Bool(bool),
    Int(i64),
    Text(String),
    Other(serde_json::Value),
}

impl RawSetting {
    fn to_text(&self) -> String {
        match self {
            RawSetting::Bool(true) => "1".to_string(),
            RawSetting::Bool(false) => "0".to_string(),
            RawSetting::Int(n) => n.to_string(),
            RawSetting::Text(s) => s.clone(),
            RawSetting::Other(value) => value.to_string(),
        }
    }
}

/// Settings for one store view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Website the store belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Store-level values, keyed by storage path.
    #[serde(default)]
    pub values: HashMap<String, RawSetting>,
}

/// Scoped settings held in memory.
///
/// Resolution order is store, then the store's website, then default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryConfigStore {
    /// Default-scope values.
    #[serde(default)]
    pub default: HashMap<String, RawSetting>,

    /// Website-scope values, keyed by website code.
    #[serde(default)]
    pub websites: HashMap<String, HashMap<String, RawSetting>>,

    /// Store-scope values, keyed by store code.
    #[serde(default)]
    pub stores: HashMap<String, StoreSettings>,
}

impl InMemoryConfigStore {
    /// Create an empty store (every key resolves to its default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML or JSON file.
    pub fn load(path: &Path) -> ThemeResult<Self> {
        load_structured_file(path)
    }

    /// Set a default-scope value.
    pub fn set_default(mut self, key: ConfigKey, value: RawSetting) -> Self {
        self.default.insert(key.path().to_string(), value);
        self
    }

    /// Set a website-scope value.
    pub fn set_website(mut self, website: &str, key: ConfigKey, value: RawSetting) -> Self {
        self.websites
            .entry(website.to_string())
            .or_default()
            .insert(key.path().to_string(), value);
        self
    }

    /// Set a store-scope value.
    pub fn set_store(mut self, store: &str, key: ConfigKey, value: RawSetting) -> Self {
        self.stores
            .entry(store.to_string())
            .or_default()
            .values
            .insert(key.path().to_string(), value);
        self
    }

    /// Assign a store to a website.
    pub fn assign_store(mut self, store: &str, website: &str) -> Self {
        self.stores.entry(store.to_string()).or_default().website = Some(website.to_string());
        self
    }

    /// Whether a store code is known to this store.
    pub fn has_store(&self, code: &str) -> bool {
        self.stores.contains_key(code)
    }

    fn website_value(&self, website: &str, path: &str) -> Option<&RawSetting> {
        self.websites.get(website).and_then(|values| values.get(path))
    }
}

impl ScopedConfigStore for InMemoryConfigStore {
    fn raw_value(&self, path: &str, scope: &ConfigScope) -> Option<String> {
        let found = match scope {
            ConfigScope::Store(code) => {
                let store = self.stores.get(code);
                store
                    .and_then(|s| s.values.get(path))
                    .or_else(|| {
                        store
                            .and_then(|s| s.website.as_deref())
                            .and_then(|website| self.website_value(website, path))
                    })
                    .or_else(|| self.default.get(path))
            }
            ConfigScope::Website(code) => self
                .website_value(code, path)
                .or_else(|| self.default.get(path)),
            ConfigScope::Default => self.default.get(path),
        };

        found.map(RawSetting::to_text)
    }
}
