//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use theme_core::{
    ConfigAccessor, ConfigScope, FeatureConfig, InMemoryConfigStore, RequestId, StoreContext,
    ThemeError,
};
use theme_detect::{CrawlerSignatureSet, FallbackPolicy};
use theme_observability::{LogFormat, LogLevel, StructuredLogger};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["theme.toml", ".theme.toml", "theme.json"];

/// Execution context for CLI commands.
pub struct Context {
    pub config: CliConfig,
    pub output: Output,
    /// Config file in use, if one was found.
    pub config_path: Option<PathBuf>,
    /// Fallback policy over the configured crawler signatures.
    pub policy: FallbackPolicy,
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            match Self::find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let signatures = match &config.crawlers {
            Some(path) => CrawlerSignatureSet::load(path)
                .with_context(|| format!("Failed to load crawler signatures: {}", path.display()))?,
            None => CrawlerSignatureSet::default(),
        };

        Ok(Self {
            config,
            output,
            config_path,
            policy: FallbackPolicy::new(signatures),
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .flat_map(|dir| CONFIG_NAMES.iter().map(move |name| dir.join(name)))
            .find(|path| path.is_file())
    }

    /// Accessor over the configured settings.
    pub fn accessor(&self) -> ConfigAccessor<&InMemoryConfigStore> {
        ConfigAccessor::new(&self.config.settings)
    }

    /// Store code to use: the explicit one, else the configured default.
    pub fn store_code(&self, store: Option<&str>) -> Option<String> {
        store
            .map(str::to_string)
            .or_else(|| self.config.default_store.clone())
    }

    /// Scope for a store code.
    ///
    /// Unknown codes are an error so typos do not silently resolve to
    /// default-scope values.
    pub fn scope(&self, store: Option<&str>) -> Result<ConfigScope> {
        match self.store_code(store) {
            None => Ok(ConfigScope::Default),
            Some(code) => {
                if self.config.settings.has_store(&code) || self.config.storefront(&code).is_some() {
                    Ok(ConfigScope::Store(code))
                } else {
                    Err(ThemeError::UnknownScope(code).into())
                }
            }
        }
    }

    /// Resolved theme settings for a store.
    pub fn feature_config(&self, store: Option<&str>) -> Result<FeatureConfig> {
        let scope = self.scope(store)?;
        let accessor = self.accessor();

        let malformed = accessor.malformed_keys(&scope);
        if !malformed.is_empty() {
            theme_observability::log_malformed_settings(&self.logger(store), &malformed);
        }

        Ok(accessor.feature_config(&scope))
    }

    /// Store context for a store, or a placeholder built from the code.
    pub fn store_context(&self, store: Option<&str>) -> StoreContext {
        let code = self.store_code(store).unwrap_or_else(|| "default".to_string());
        match self.config.storefront(&code) {
            Some(context) => context.clone(),
            None => {
                self.output
                    .debug(&format!("No storefront configured for '{}', using placeholder", code));
                StoreContext::new("Store", code.as_str(), "/")
            }
        }
    }

    /// Logger for one CLI invocation.
    pub fn logger(&self, store: Option<&str>) -> StructuredLogger {
        let format = if self.output.is_json() {
            LogFormat::Json
        } else {
            LogFormat::Human
        };
        let level = if self.output.is_verbose() {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        };

        let logger = StructuredLogger::new(RequestId::generate())
            .with_component("theme-cli")
            .with_format(format)
            .with_min_level(level);

        match self.store_code(store) {
            Some(code) => logger.with_store(code),
            None => logger,
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}
