//! Theme settings commands.

use anyhow::{bail, Result};
use serde::Serialize;
use theme_core::{ConfigKey, ConfigScope, ConfigType};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};
use crate::output::flag_badge;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show { store } => show_config(store.as_deref(), ctx).await,
        ConfigCommand::Get { key, store } => get_config(&key, store.as_deref(), ctx).await,
        ConfigCommand::Keys => list_keys(ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(store: Option<&str>, ctx: &Context) -> Result<()> {
    let config = ctx.feature_config(store)?;

    if ctx.output.is_json() {
        ctx.output.json(&config);
        return Ok(());
    }

    let scope = ctx.scope(store)?;
    ctx.output.header(&format!("Theme Settings ({})", scope));
    if let Some(path) = &ctx.config_path {
        ctx.output.kv("file", &path.display().to_string());
    }

    ctx.output.kv("enabled", &flag_badge(config.enabled));
    ctx.output.kv("force fallback", &flag_badge(config.force_fallback));
    ctx.output.kv("detect crawlers", &flag_badge(config.detect_crawlers));
    ctx.output.kv("detect js", &flag_badge(config.detect_js));
    ctx.output.kv("js cookie name", &config.js_cookie_name);
    ctx.output.kv(
        "js cookie lifetime",
        &format!("{}s", config.js_cookie_lifetime_seconds),
    );
    ctx.output.kv("canvaskit", &flag_badge(config.canvas_kit_enabled));
    ctx.output.kv("service worker", &flag_badge(config.service_worker_enabled));
    ctx.output.kv("structured data", &flag_badge(config.structured_data_enabled));
    ctx.output.kv("minimal html", &flag_badge(config.minimal_html_enabled));

    Ok(())
}

async fn get_config(name: &str, store: Option<&str>, ctx: &Context) -> Result<()> {
    let Some(key) = ConfigKey::from_name(name) else {
        bail!("Unknown setting: {} (see `theme config keys`)", name);
    };

    let scope = ctx.scope(store)?;
    let accessor = ctx.accessor();
    let value = match key.config_type() {
        ConfigType::Bool => serde_json::json!(accessor.get_bool(key, &scope)),
        ConfigType::Int => serde_json::json!(accessor.get_int(key, &scope)),
        ConfigType::String => serde_json::json!(accessor.get_string(key, &scope)),
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key.path(), "value": value }));
    } else {
        match value {
            serde_json::Value::String(text) => println!("{}", text),
            other => println!("{}", other),
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct KeyInfo {
    name: &'static str,
    path: &'static str,
    default: String,
}

async fn list_keys(ctx: &Context) -> Result<()> {
    let keys: Vec<KeyInfo> = ConfigKey::ALL
        .iter()
        .map(|key| KeyInfo {
            name: key.name(),
            path: key.path(),
            default: key.default_value().to_string(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&keys);
        return Ok(());
    }

    ctx.output.header("Theme Settings");
    for key in &keys {
        ctx.output.kv(key.name, &format!("{} (default: {})", key.path, key.default));
    }

    Ok(())
}

#[derive(Serialize)]
struct ScopeProblem {
    scope: String,
    keys: Vec<&'static str>,
}

async fn validate_config(ctx: &Context) -> Result<()> {
    let settings = &ctx.config.settings;
    let accessor = ctx.accessor();

    let mut scopes = vec![ConfigScope::Default];
    let mut websites: Vec<&String> = settings.websites.keys().collect();
    websites.sort();
    scopes.extend(websites.into_iter().map(|code| ConfigScope::website(code.as_str())));
    let mut stores: Vec<&String> = settings.stores.keys().collect();
    stores.sort();
    scopes.extend(stores.into_iter().map(|code| ConfigScope::store(code.as_str())));

    let problems: Vec<ScopeProblem> = scopes
        .iter()
        .filter_map(|scope| {
            let keys = accessor.malformed_keys(scope);
            (!keys.is_empty()).then(|| ScopeProblem {
                scope: scope.to_string(),
                keys: keys.iter().map(|key| key.path()).collect(),
            })
        })
        .collect();

    let unknown: Vec<&String> = settings
        .default
        .keys()
        .chain(settings.websites.values().flat_map(|values| values.keys()))
        .chain(settings.stores.values().flat_map(|store| store.values.keys()))
        .filter(|path| !ConfigKey::ALL.iter().any(|key| key.path() == path.as_str()))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": problems.is_empty(),
            "malformed": problems,
            "unknown": unknown,
        }));
        return Ok(());
    }

    for path in &unknown {
        ctx.output.warn(&format!("Unknown setting ignored: {}", path));
    }

    if problems.is_empty() {
        ctx.output.success("All settings are valid");
        return Ok(());
    }

    for problem in &problems {
        for key in &problem.keys {
            ctx.output
                .warn(&format!("{}: malformed value for {}, default applies", problem.scope, key));
        }
    }
    bail!("{} scope(s) with malformed settings", problems.len());
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(CONFIG_NAMES[0]);

    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    std::fs::write(&path, generate_default_config())?;
    ctx.output.success(&format!("Created {}", path.display()));

    Ok(())
}
