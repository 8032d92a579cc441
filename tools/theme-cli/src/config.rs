//! CLI configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use theme_core::{InMemoryConfigStore, StoreContext};

/// CLI configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Crawler signature file, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawlers: Option<PathBuf>,

    /// Path prefix of the client application assets.
    #[serde(default = "default_asset_base")]
    pub asset_base: String,

    /// Store used when a command is given no `--store`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_store: Option<String>,

    /// Scoped theme settings, keyed by storage path.
    #[serde(default)]
    pub settings: InMemoryConfigStore,

    /// Store contexts, keyed by store code.
    #[serde(default)]
    pub storefronts: HashMap<String, StoreContext>,
}

fn default_asset_base() -> String {
    "/static/flutter/".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            crawlers: None,
            asset_base: default_asset_base(),
            default_store: None,
            settings: InMemoryConfigStore::default(),
            storefronts: HashMap::new(),
        }
    }
}

impl CliConfig {
    /// Load config from a file.
    ///
    /// A relative `crawlers` path is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: CliConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        if let (Some(crawlers), Some(dir)) = (config.crawlers.as_ref(), path.parent()) {
            if crawlers.is_relative() {
                config.crawlers = Some(dir.join(crawlers));
            }
        }

        Ok(config)
    }

    /// Store context for a code, if configured.
    pub fn storefront(&self, code: &str) -> Option<&StoreContext> {
        self.storefronts.get(code)
    }
}

/// Generate a starter theme.toml.
pub fn generate_default_config() -> String {
    r#"# Storefront theme configuration

asset_base = "/static/flutter/"
default_store = "default"
# crawlers = "crawlers.toml"

[settings.default]
"flutter_theme/general/enabled" = true
"flutter_theme/detection/detect_crawlers" = true
"flutter_theme/detection/detect_js" = true
"flutter_theme/seo/structured_data" = true

[settings.websites.base]
# "flutter_theme/flutter/canvas_kit_renderer" = true

[settings.stores.default]
website = "base"

[settings.stores.default.values]
# "flutter_theme/general/force_fallback" = true

[storefronts.default]
name = "Main Store"
code = "default"
base_url = "https://example.com/"
currency_code = "USD"
locale = "en_US"
"#
    .to_string()
}
