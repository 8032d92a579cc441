//! Client bootstrap script.

use anyhow::Result;
use theme_seo::{render_app_shell, render_bootstrap_script, ClientBootstrapConfig};

use super::BootstrapArgs;
use crate::context::Context;

/// Run the bootstrap command.
pub async fn run(args: BootstrapArgs, ctx: &Context) -> Result<()> {
    let config = ctx.feature_config(args.store.as_deref())?;
    let store = ctx.store_context(args.store.as_deref());
    let asset_base = args
        .asset_base
        .unwrap_or_else(|| ctx.config.asset_base.clone());

    let mut bootstrap = ClientBootstrapConfig::new(&config, &store, &asset_base);
    if let Some(url) = args.canvas_kit_base_url {
        bootstrap = bootstrap.with_canvas_kit_base_url(url);
    }
    if let Some(url) = args.service_worker_url {
        bootstrap = bootstrap.with_service_worker(url, args.service_worker_version.as_deref());
    }

    if ctx.output.is_json() {
        ctx.output.json(&bootstrap);
        return Ok(());
    }

    ctx.output
        .debug(&format!("entry point {} ({} renderer)", bootstrap.entrypoint_url(), bootstrap.renderer()));
    if args.shell {
        ctx.output.raw(&render_app_shell(&bootstrap));
    } else {
        ctx.output.raw(&render_bootstrap_script(&bootstrap));
    }

    Ok(())
}
