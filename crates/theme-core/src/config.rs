//! Theme configuration schema and scoped accessor.
//!
//! Every setting the theme reads is a variant of [`ConfigKey`]. The key owns
//! its storage path, its value type and its default, so call sites never
//! deal with raw path strings. Values that are missing or malformed resolve
//! to the key default instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scope a setting is resolved against.
///
/// Lookups inherit upwards: a store falls back to its website, a website
/// falls back to the default scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "code")]
pub enum ConfigScope {
    /// Global default scope.
    #[default]
    Default,
    /// A website, by code.
    Website(String),
    /// A store view, by code.
    Store(String),
}

impl ConfigScope {
    /// Create a store scope.
    pub fn store(code: impl Into<String>) -> Self {
        Self::Store(code.into())
    }

    /// Create a website scope.
    pub fn website(code: impl Into<String>) -> Self {
        Self::Website(code.into())
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Website(code) => write!(f, "website:{}", code),
            Self::Store(code) => write!(f, "store:{}", code),
        }
    }
}

/// Value type of a configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigType {
    Bool,
    String,
    Int,
}

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    String(&'static str),
    Int(i64),
}

impl ConfigValue {
    /// Bool view of the value (non-bool values are `false`).
    pub fn as_bool(&self) -> bool {
        matches!(self, ConfigValue::Bool(true))
    }

    /// Int view of the value (non-int values are `0`).
    pub fn as_int(&self) -> i64 {
        match self {
            ConfigValue::Int(n) => *n,
            _ => 0,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Int(n) => write!(f, "{}", n),
        }
    }
}

/// Default capability cookie name.
pub const DEFAULT_JS_COOKIE_NAME: &str = "js_enabled";

/// Default capability cookie lifetime (one year).
pub const DEFAULT_JS_COOKIE_LIFETIME_SECONDS: i64 = 31_536_000;

/// Every setting the theme reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Master switch for the whole feature.
    Enabled,
    /// Always serve the fallback page.
    ForceFallback,
    /// Sniff crawler user agents.
    DetectCrawlers,
    /// Require the JS capability cookie.
    DetectJs,
    /// Name of the JS capability cookie.
    JsCookieName,
    /// Max-age hint for the JS capability cookie.
    JsCookieLifetimeSeconds,
    /// Renderer hint passed to the client.
    CanvasKitEnabled,
    /// Service worker hint passed to the client.
    ServiceWorkerEnabled,
    /// Gate for JSON-LD emission.
    StructuredDataEnabled,
    /// Gate for reduced-markup fallback rendering.
    MinimalHtmlEnabled,
}

impl ConfigKey {
    /// All keys, in schema order.
    pub const ALL: [ConfigKey; 10] = [
        ConfigKey::Enabled,
        ConfigKey::ForceFallback,
        ConfigKey::DetectCrawlers,
        ConfigKey::DetectJs,
        ConfigKey::JsCookieName,
        ConfigKey::JsCookieLifetimeSeconds,
        ConfigKey::CanvasKitEnabled,
        ConfigKey::ServiceWorkerEnabled,
        ConfigKey::StructuredDataEnabled,
        ConfigKey::MinimalHtmlEnabled,
    ];

    /// Storage path in the configuration store.
    pub fn path(&self) -> &'static str {
        match self {
            ConfigKey::Enabled => "flutter_theme/general/enabled",
            ConfigKey::ForceFallback => "flutter_theme/general/force_fallback",
            ConfigKey::DetectCrawlers => "flutter_theme/detection/detect_crawlers",
            ConfigKey::DetectJs => "flutter_theme/detection/detect_js",
            ConfigKey::JsCookieName => "flutter_theme/detection/js_cookie_name",
            ConfigKey::JsCookieLifetimeSeconds => "flutter_theme/detection/js_cookie_lifetime",
            ConfigKey::CanvasKitEnabled => "flutter_theme/flutter/canvas_kit_renderer",
            ConfigKey::ServiceWorkerEnabled => "flutter_theme/flutter/service_worker_enabled",
            ConfigKey::StructuredDataEnabled => "flutter_theme/seo/structured_data",
            ConfigKey::MinimalHtmlEnabled => "flutter_theme/seo/minimal_html",
        }
    }

    /// Short camelCase name, as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::Enabled => "enabled",
            ConfigKey::ForceFallback => "forceFallback",
            ConfigKey::DetectCrawlers => "detectCrawlers",
            ConfigKey::DetectJs => "detectJs",
            ConfigKey::JsCookieName => "jsCookieName",
            ConfigKey::JsCookieLifetimeSeconds => "jsCookieLifetimeSeconds",
            ConfigKey::CanvasKitEnabled => "canvasKitEnabled",
            ConfigKey::ServiceWorkerEnabled => "serviceWorkerEnabled",
            ConfigKey::StructuredDataEnabled => "structuredDataEnabled",
            ConfigKey::MinimalHtmlEnabled => "minimalHtmlEnabled",
        }
    }

    /// Value type of this key.
    pub fn config_type(&self) -> ConfigType {
        match self {
            ConfigKey::JsCookieName => ConfigType::String,
            ConfigKey::JsCookieLifetimeSeconds => ConfigType::Int,
            _ => ConfigType::Bool,
        }
    }

    /// Value used when the key is missing or malformed.
    pub fn default_value(&self) -> ConfigValue {
        match self {
            ConfigKey::JsCookieName => ConfigValue::String(DEFAULT_JS_COOKIE_NAME),
            ConfigKey::JsCookieLifetimeSeconds => {
                ConfigValue::Int(DEFAULT_JS_COOKIE_LIFETIME_SECONDS)
            }
            _ => ConfigValue::Bool(false),
        }
    }

    /// Look up a key by storage path or camelCase name.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.path() == s || key.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// External configuration store the theme reads from.
///
/// Implementations own scope inheritance and caching; the accessor only
/// interprets the raw text they return.
pub trait ScopedConfigStore {
    /// Raw value stored at `path`, resolved for `scope`.
    fn raw_value(&self, path: &str, scope: &ConfigScope) -> Option<String>;
}

impl<S: ScopedConfigStore + ?Sized> ScopedConfigStore for &S {
    fn raw_value(&self, path: &str, scope: &ConfigScope) -> Option<String> {
        (**self).raw_value(path, scope)
    }
}

/// Parse a stored flag. Returns `None` for values that are not a flag.
pub fn parse_flag(raw: &str) -> Option<bool> {
    let value = raw.trim();
    if value.is_empty() {
        return Some(false);
    }

    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Typed, defaulting reader over a [`ScopedConfigStore`].
#[derive(Debug, Clone)]
pub struct ConfigAccessor<S> {
    store: S,
}

impl<S: ScopedConfigStore> ConfigAccessor<S> {
    /// Create an accessor over a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read a flag. Missing or malformed values resolve to the key default.
    pub fn get_bool(&self, key: ConfigKey, scope: &ConfigScope) -> bool {
        self.store
            .raw_value(key.path(), scope)
            .and_then(|raw| parse_flag(&raw))
            .unwrap_or_else(|| key.default_value().as_bool())
    }

    /// Read a string. Missing or blank values resolve to the key default.
    pub fn get_string(&self, key: ConfigKey, scope: &ConfigScope) -> String {
        match self.store.raw_value(key.path(), scope) {
            Some(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
            _ => key.default_value().to_string(),
        }
    }

    /// Read an integer. Missing, unparsable or zero values resolve to the
    /// key default.
    pub fn get_int(&self, key: ConfigKey, scope: &ConfigScope) -> i64 {
        self.store
            .raw_value(key.path(), scope)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|n| *n != 0)
            .unwrap_or_else(|| key.default_value().as_int())
    }

    /// Resolve every key for `scope` into a [`FeatureConfig`].
    pub fn feature_config(&self, scope: &ConfigScope) -> FeatureConfig {
        FeatureConfig {
            enabled: self.get_bool(ConfigKey::Enabled, scope),
            force_fallback: self.get_bool(ConfigKey::ForceFallback, scope),
            detect_crawlers: self.get_bool(ConfigKey::DetectCrawlers, scope),
            detect_js: self.get_bool(ConfigKey::DetectJs, scope),
            js_cookie_name: self.get_string(ConfigKey::JsCookieName, scope),
            js_cookie_lifetime_seconds: self.get_int(ConfigKey::JsCookieLifetimeSeconds, scope),
            canvas_kit_enabled: self.get_bool(ConfigKey::CanvasKitEnabled, scope),
            service_worker_enabled: self.get_bool(ConfigKey::ServiceWorkerEnabled, scope),
            structured_data_enabled: self.get_bool(ConfigKey::StructuredDataEnabled, scope),
            minimal_html_enabled: self.get_bool(ConfigKey::MinimalHtmlEnabled, scope),
        }
    }

    /// Keys whose stored value for `scope` is present but could not be
    /// interpreted, and therefore resolved to the default.
    pub fn malformed_keys(&self, scope: &ConfigScope) -> Vec<ConfigKey> {
        ConfigKey::ALL
            .iter()
            .copied()
            .filter(|key| {
                let Some(raw) = self.store.raw_value(key.path(), scope) else {
                    return false;
                };
                match key.config_type() {
                    ConfigType::Bool => parse_flag(&raw).is_none(),
                    ConfigType::Int => raw.trim().parse::<i64>().is_err(),
                    ConfigType::String => false,
                }
            })
            .collect()
    }
}

/// Resolved theme settings for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureConfig {
    pub enabled: bool,
    pub force_fallback: bool,
    pub detect_crawlers: bool,
    pub detect_js: bool,
    pub js_cookie_name: String,
    pub js_cookie_lifetime_seconds: i64,
    pub canvas_kit_enabled: bool,
    pub service_worker_enabled: bool,
    pub structured_data_enabled: bool,
    pub minimal_html_enabled: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            force_fallback: false,
            detect_crawlers: false,
            detect_js: false,
            js_cookie_name: DEFAULT_JS_COOKIE_NAME.to_string(),
            js_cookie_lifetime_seconds: DEFAULT_JS_COOKIE_LIFETIME_SECONDS,
            canvas_kit_enabled: false,
            service_worker_enabled: false,
            structured_data_enabled: false,
            minimal_html_enabled: false,
        }
    }
}

impl FeatureConfig {
    /// Enable crawler detection.
    pub fn with_crawler_detection(mut self, enabled: bool) -> Self {
        self.detect_crawlers = enabled;
        self
    }

    /// Enable JS cookie detection.
    pub fn with_js_detection(mut self, enabled: bool) -> Self {
        self.detect_js = enabled;
        self
    }

    /// Force the fallback page.
    pub fn with_force_fallback(mut self, enabled: bool) -> Self {
        self.force_fallback = enabled;
        self
    }

    /// Enable structured data output.
    pub fn with_structured_data(mut self, enabled: bool) -> Self {
        self.structured_data_enabled = enabled;
        self
    }

    /// Set the JS capability cookie name.
    pub fn with_js_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.js_cookie_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapStore(HashMap<&'static str, &'static str>);

    impl ScopedConfigStore for MapStore {
        fn raw_value(&self, path: &str, _scope: &ConfigScope) -> Option<String> {
            self.0.get(path).map(|v| v.to_string())
        }
    }

    fn accessor(pairs: &[(&'static str, &'static str)]) -> ConfigAccessor<MapStore> {
        ConfigAccessor::new(MapStore(pairs.iter().copied().collect()))
    }

    #[test]
    fn test_missing_keys_resolve_to_defaults() {
        let config = accessor(&[]).feature_config(&ConfigScope::Default);
        assert_eq!(config, FeatureConfig::default());
        assert_eq!(config.js_cookie_name, "js_enabled");
        assert_eq!(config.js_cookie_lifetime_seconds, 31_536_000);
    }

    #[test]
    fn test_flag_parsing() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag("2"), None);
        assert_eq!(parse_flag("-1"), None);
        assert_eq!(parse_flag("01"), None);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let acc = accessor(&[
            ("flutter_theme/general/force_fallback", "maybe"),
            ("flutter_theme/detection/js_cookie_lifetime", "forever"),
            ("flutter_theme/detection/js_cookie_name", "   "),
        ]);
        let scope = ConfigScope::Default;

        assert!(!acc.get_bool(ConfigKey::ForceFallback, &scope));
        assert_eq!(acc.get_int(ConfigKey::JsCookieLifetimeSeconds, &scope), 31_536_000);
        assert_eq!(acc.get_string(ConfigKey::JsCookieName, &scope), "js_enabled");

        let malformed = acc.malformed_keys(&scope);
        assert_eq!(
            malformed,
            vec![ConfigKey::ForceFallback, ConfigKey::JsCookieLifetimeSeconds]
        );
    }

    #[test]
    fn test_zero_lifetime_uses_default() {
        let acc = accessor(&[("flutter_theme/detection/js_cookie_lifetime", "0")]);
        assert_eq!(
            acc.get_int(ConfigKey::JsCookieLifetimeSeconds, &ConfigScope::Default),
            DEFAULT_JS_COOKIE_LIFETIME_SECONDS
        );
    }

    #[test]
    fn test_explicit_values() {
        let acc = accessor(&[
            ("flutter_theme/general/enabled", "1"),
            ("flutter_theme/detection/detect_crawlers", "1"),
            ("flutter_theme/detection/js_cookie_name", "has_js"),
            ("flutter_theme/detection/js_cookie_lifetime", "3600"),
        ]);
        let config = acc.feature_config(&ConfigScope::store("default"));

        assert!(config.enabled);
        assert!(config.detect_crawlers);
        assert!(!config.detect_js);
        assert_eq!(config.js_cookie_name, "has_js");
        assert_eq!(config.js_cookie_lifetime_seconds, 3600);
    }

    #[test]
    fn test_key_lookup() {
        assert_eq!(ConfigKey::from_name("detectJs"), Some(ConfigKey::DetectJs));
        assert_eq!(
            ConfigKey::from_name("flutter_theme/seo/minimal_html"),
            Some(ConfigKey::MinimalHtmlEnabled)
        );
        assert_eq!(ConfigKey::from_name("nope"), None);
    }

    #[test]
    fn test_schema_types_match_defaults() {
        for key in ConfigKey::ALL {
            let matches = matches!(
                (key.config_type(), key.default_value()),
                (ConfigType::Bool, ConfigValue::Bool(_))
                    | (ConfigType::String, ConfigValue::String(_))
                    | (ConfigType::Int, ConfigValue::Int(_))
            );
            assert!(matches, "{} default has the wrong type", key);
        }
    }
}
