//! Fallback decision for a single request.

use anyhow::{Context as _, Result};
use http::header::{COOKIE, USER_AGENT};
use http::{HeaderMap, HeaderValue};
use serde::Serialize;
use theme_core::RequestSignals;
use theme_observability::{log_decision, DecisionRecord};

use super::DecideArgs;
use crate::context::Context;
use crate::output::decision_badge;

#[derive(Serialize)]
struct DecideReport<'a> {
    store: Option<String>,
    enabled: bool,
    #[serde(flatten)]
    record: &'a DecisionRecord,
}

/// Run the decide command.
pub async fn run(args: DecideArgs, ctx: &Context) -> Result<()> {
    let config = ctx.feature_config(args.store.as_deref())?;
    let headers = request_headers(&args.user_agent, args.cookie.as_deref())?;
    let signals = RequestSignals::from_headers(&headers, &config.js_cookie_name);

    let decision = ctx.policy.decide(&signals, &config);
    let logger = ctx.logger(args.store.as_deref());
    let record = log_decision(&logger, &signals, &config, &decision);

    if ctx.output.is_json() {
        ctx.output.json(&DecideReport {
            store: ctx.store_code(args.store.as_deref()),
            enabled: config.enabled,
            record: &record,
        });
        return Ok(());
    }

    if !config.enabled {
        ctx.output.warn("Theme is disabled for this scope; the decision is informational");
    }

    ctx.output.header("Fallback Decision");
    ctx.output.kv("render", &decision_badge(&decision));
    if let Some(reason) = decision.reason() {
        ctx.output.kv("reason", &reason.to_string());
    }
    ctx.output.kv("user agent", &signals.user_agent);
    ctx.output.kv(
        &format!("cookie {}", config.js_cookie_name),
        signals.js_cookie.as_deref().unwrap_or("(absent)"),
    );

    Ok(())
}

/// Request headers as a web server would pass them.
fn request_headers(user_agent: &str, cookie: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).context("Invalid User-Agent header value")?,
    );
    if let Some(cookie) = cookie {
        headers.insert(
            COOKIE,
            HeaderValue::from_str(cookie).context("Invalid Cookie header value")?,
        );
    }
    Ok(headers)
}
