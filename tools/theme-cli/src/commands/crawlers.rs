//! Crawler signature inspection.

use anyhow::Result;
use serde::Serialize;

use super::CrawlersArgs;
use crate::context::Context;

#[derive(Serialize)]
struct CheckReport<'a> {
    user_agent: &'a str,
    crawler: bool,
    signature: Option<&'a str>,
}

/// Run the crawlers command.
pub async fn run(args: CrawlersArgs, ctx: &Context) -> Result<()> {
    let signatures = ctx.policy.signatures();

    if let Some(user_agent) = args.check.as_deref() {
        let signature = signatures.find_match(user_agent);

        if ctx.output.is_json() {
            ctx.output.json(&CheckReport {
                user_agent,
                crawler: signature.is_some(),
                signature,
            });
            return Ok(());
        }

        match signature {
            Some(signature) => ctx.output.success(&format!("Crawler (matched '{}')", signature)),
            None => ctx.output.info("Not a known crawler"),
        }
        return Ok(());
    }

    if ctx.output.is_json() {
        ctx.output.json(signatures);
        return Ok(());
    }

    let source = ctx
        .config
        .crawlers
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    ctx.output
        .header(&format!("Crawler Signatures ({}, {})", signatures.len(), source));
    for pattern in signatures.patterns() {
        ctx.output.list_item(pattern);
    }

    Ok(())
}
