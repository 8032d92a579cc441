//! Markup rendering from snapshot files.

use anyhow::{Context as _, Result};
use serde::Serialize;
use theme_catalog::{CategorySnapshot, ProductSnapshot, SnapshotImageResolver};
use theme_seo::{DefaultFallbackPage, PageMeta, SeoRenderer};

use super::{RenderArgs, RenderCommand};
use crate::context::Context;

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    match args.command {
        RenderCommand::Category { input, store } => {
            render_category(&input, store.as_deref(), ctx).await
        }
        RenderCommand::Product {
            input,
            store,
            placeholder,
        } => render_product(&input, store.as_deref(), placeholder, ctx).await,
        RenderCommand::Website { store } => render_website(store.as_deref(), ctx).await,
        RenderCommand::Fallback {
            store_name,
            store,
            message,
            minimal,
        } => render_fallback(store_name, store.as_deref(), message, minimal, ctx).await,
    }
}

async fn render_category(input: &str, store: Option<&str>, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(input);
    let category = CategorySnapshot::load(&path)
        .with_context(|| format!("Failed to load category snapshot: {}", path.display()))?;

    let images = SnapshotImageResolver::new();
    let renderer = renderer(store, &images, ctx)?;
    emit(&renderer.category(Some(&category)), &renderer, ctx);

    Ok(())
}

async fn render_product(
    input: &str,
    store: Option<&str>,
    placeholder: Option<String>,
    ctx: &Context,
) -> Result<()> {
    let path = ctx.resolve_path(input);
    let product = ProductSnapshot::load(&path)
        .with_context(|| format!("Failed to load product snapshot: {}", path.display()))?;

    let images = match placeholder {
        Some(url) => SnapshotImageResolver::new().with_placeholder(url),
        None => SnapshotImageResolver::new(),
    };
    let renderer = renderer(store, &images, ctx)?;
    emit(&renderer.product(Some(&product)), &renderer, ctx);

    Ok(())
}

async fn render_website(store: Option<&str>, ctx: &Context) -> Result<()> {
    let images = SnapshotImageResolver::new();
    let renderer = renderer(store, &images, ctx)?;
    emit(&renderer.website(), &renderer, ctx);

    Ok(())
}

async fn render_fallback(
    store_name: Option<String>,
    store: Option<&str>,
    message: Option<String>,
    minimal: bool,
    ctx: &Context,
) -> Result<()> {
    let images = SnapshotImageResolver::new();
    let renderer = renderer(store, &images, ctx)?;
    let name = store_name.unwrap_or_else(|| renderer.store().name.clone());

    let mut page = DefaultFallbackPage::new(name.as_str())
        .minimal(minimal || renderer.config().minimal_html_enabled);
    if let Some(message) = message {
        page = page.with_message(message);
    }

    if ctx.output.is_json() {
        ctx.output.json(&FallbackReport {
            meta: renderer.page_meta(Some(name.as_str()), None),
            html: page.render(),
        });
        return Ok(());
    }

    ctx.output.raw(&page.render());

    Ok(())
}

/// JSON output of `render fallback`.
#[derive(Serialize)]
struct FallbackReport {
    #[serde(flatten)]
    meta: PageMeta,
    html: String,
}

fn renderer<'a>(
    store: Option<&str>,
    images: &'a SnapshotImageResolver,
    ctx: &Context,
) -> Result<SeoRenderer<'a>> {
    let config = ctx.feature_config(store)?;
    Ok(SeoRenderer::new(config, ctx.store_context(store), images))
}

fn emit(markup: &str, renderer: &SeoRenderer<'_>, ctx: &Context) {
    if markup.is_empty() {
        if !renderer.structured_data_enabled() {
            ctx.output
                .warn("Structured data is disabled for this scope; nothing rendered");
        }
        return;
    }
    ctx.output.raw(markup);
}
