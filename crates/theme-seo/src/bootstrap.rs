//! Bootstrap payload for the client application loader.
//!
//! On the primary path the page embeds a global configuration object that
//! the loader script reads before booting the client application. The key
//! names here are the loader's contract and must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use theme_core::{FeatureConfig, StoreContext};

use crate::jsonld::to_script_json;

/// Global variable the loader reads its configuration from.
pub const BOOTSTRAP_GLOBAL: &str = "flutterConfiguration";

/// Event dispatched on `window` after a successful boot.
pub const LOADED_EVENT: &str = "flutterLoaded";

/// Element the client application mounts into.
pub const APP_ELEMENT_ID: &str = "flutter-app";

/// Loading indicator element, faded out after boot.
pub const LOADING_ELEMENT_ID: &str = "flutter-loading";

/// Entry point file, relative to `assetBase`.
pub const ENTRYPOINT_FILE: &str = "main.dart.js";

/// Store payload forwarded verbatim to the client application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlutterConfig {
    pub canvas_kit: bool,
    pub service_worker: bool,
    pub base_url: String,
    pub store_code: String,
    pub currency: String,
    pub locale: String,
}

impl FlutterConfig {
    pub fn new(config: &FeatureConfig, store: &StoreContext) -> Self {
        Self {
            canvas_kit: config.canvas_kit_enabled,
            service_worker: config.service_worker_enabled,
            base_url: store.base_url.clone(),
            store_code: store.code.clone(),
            currency: store.currency_code.clone(),
            locale: store.locale.clone(),
        }
    }
}

/// Capability cookie settings exposed to the client, which sets the cookie
/// once it has booted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsCookieConfig {
    pub name: String,
    pub lifetime: i64,
}

impl From<&FeatureConfig> for JsCookieConfig {
    fn from(config: &FeatureConfig) -> Self {
        Self {
            name: config.js_cookie_name.clone(),
            lifetime: config.js_cookie_lifetime_seconds,
        }
    }
}

/// Global configuration object read by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientBootstrapConfig {
    /// Path prefix of the client entry point.
    pub asset_base: String,
    pub use_canvas_kit: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub canvas_kit_base_url: Option<String>,
    pub service_worker_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub service_worker_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub service_worker_version: Option<String>,
    pub js_cookie: JsCookieConfig,
    /// Store payload, forwarded to the application unchanged.
    pub magento: FlutterConfig,
}

impl ClientBootstrapConfig {
    /// Build the loader configuration for a store.
    ///
    /// `asset_base` gets a trailing slash so the loader can append file
    /// names directly.
    pub fn new(config: &FeatureConfig, store: &StoreContext, asset_base: &str) -> Self {
        let mut asset_base = asset_base.to_string();
        if !asset_base.ends_with('/') {
            asset_base.push('/');
        }

        Self {
            asset_base,
            use_canvas_kit: config.canvas_kit_enabled,
            canvas_kit_base_url: None,
            service_worker_enabled: config.service_worker_enabled,
            service_worker_url: None,
            service_worker_version: None,
            js_cookie: JsCookieConfig::from(config),
            magento: FlutterConfig::new(config, store),
        }
    }

    pub fn with_canvas_kit_base_url(mut self, url: impl Into<String>) -> Self {
        self.canvas_kit_base_url = Some(url.into());
        self
    }

    pub fn with_service_worker(mut self, url: impl Into<String>, version: Option<&str>) -> Self {
        self.service_worker_url = Some(url.into());
        self.service_worker_version = version.map(str::to_string);
        self
    }

    /// URL of the client entry point.
    pub fn entrypoint_url(&self) -> String {
        format!("{}{}", self.asset_base, ENTRYPOINT_FILE)
    }

    /// Renderer name passed to the engine.
    pub fn renderer(&self) -> &'static str {
        if self.use_canvas_kit {
            "canvaskit"
        } else {
            "html"
        }
    }
}

/// Render the script that publishes the loader configuration.
///
/// Returns an empty string when the configuration cannot be serialized.
pub fn render_bootstrap_script(config: &ClientBootstrapConfig) -> String {
    to_script_json(config)
        .map(|json| format!("<script>window.{} = {};</script>", BOOTSTRAP_GLOBAL, json))
        .unwrap_or_default()
}

/// Render the primary-path body: the loading indicator, the mount element
/// and the configuration script, in the order the loader expects them.
pub fn render_app_shell(config: &ClientBootstrapConfig) -> String {
    format!(
        "<div id=\"{}\"></div>\n<div id=\"{}\"></div>\n{}",
        LOADING_ELEMENT_ID,
        APP_ELEMENT_ID,
        render_bootstrap_script(config)
    )
}

/// Detail of the loader's success event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedEventDetail {
    pub config: ClientBootstrapConfig,
    /// Boot completion time, ISO-8601.
    pub timestamp: DateTime<Utc>,
}

impl LoadedEventDetail {
    pub fn new(config: ClientBootstrapConfig, timestamp: DateTime<Utc>) -> Self {
        Self { config, timestamp }
    }

    /// Event detail stamped with the current time.
    pub fn now(config: ClientBootstrapConfig) -> Self {
        Self::new(config, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store() -> StoreContext {
        StoreContext::new("Demo", "en", "https://shop.test/en/")
            .with_currency("GBP")
            .with_locale("en_GB")
    }

    #[test]
    fn test_store_payload_keys() {
        let config = FeatureConfig {
            canvas_kit_enabled: true,
            ..FeatureConfig::default()
        };
        let value = serde_json::to_value(FlutterConfig::new(&config, &store())).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "canvasKit": true,
                "serviceWorker": false,
                "baseUrl": "https://shop.test/en/",
                "storeCode": "en",
                "currency": "GBP",
                "locale": "en_GB",
            })
        );
    }

    #[test]
    fn test_loader_config() {
        let bootstrap = ClientBootstrapConfig::new(&FeatureConfig::default(), &store(), "/static/flutter");

        assert_eq!(bootstrap.asset_base, "/static/flutter/");
        assert_eq!(bootstrap.entrypoint_url(), "/static/flutter/main.dart.js");
        assert_eq!(bootstrap.renderer(), "html");
        assert_eq!(bootstrap.js_cookie.name, "js_enabled");
        assert_eq!(bootstrap.js_cookie.lifetime, 31_536_000);

        let value = serde_json::to_value(&bootstrap).unwrap();
        assert_eq!(value["useCanvasKit"], false);
        assert_eq!(value["serviceWorkerEnabled"], false);
        assert!(value.get("serviceWorkerUrl").is_none());
        assert_eq!(value["magento"]["storeCode"], "en");
    }

    #[test]
    fn test_bootstrap_script() {
        let config = FeatureConfig {
            service_worker_enabled: true,
            ..FeatureConfig::default()
        };
        let bootstrap = ClientBootstrapConfig::new(&config, &store(), "/static/")
            .with_service_worker("/flutter_service_worker.js", Some("42"));
        let script = render_bootstrap_script(&bootstrap);

        assert!(script.starts_with("<script>window.flutterConfiguration = {"));
        assert!(script.ends_with("};</script>"));
        assert!(script.contains(r#""serviceWorkerUrl": "/flutter_service_worker.js""#));
        assert!(script.contains(r#""serviceWorkerVersion": "42""#));
    }

    #[test]
    fn test_app_shell() {
        let bootstrap = ClientBootstrapConfig::new(&FeatureConfig::default(), &store(), "/static/");
        let shell = render_app_shell(&bootstrap);
        let lines: Vec<&str> = shell.lines().collect();

        assert_eq!(lines[0], r#"<div id="flutter-loading"></div>"#);
        assert_eq!(lines[1], r#"<div id="flutter-app"></div>"#);
        assert!(shell.ends_with(&render_bootstrap_script(&bootstrap)));
    }

    #[test]
    fn test_loaded_event_timestamp_is_iso8601() {
        let bootstrap = ClientBootstrapConfig::new(&FeatureConfig::default(), &store(), "/static/");
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let detail = LoadedEventDetail::new(bootstrap, at);

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["timestamp"], "2024-05-01T12:30:00Z");
    }
}
