//! Audit records for fallback decisions and configuration problems.

use serde::Serialize;
use theme_core::{ConfigKey, FeatureConfig, RequestSignals};
use theme_detect::{FallbackDecision, FallbackReason};

use crate::logging::{LogLevel, StructuredLogger};

/// What was decided for one request, and from which inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionRecord {
    pub fallback: bool,
    /// `forced`, `crawler`, `javascript_unconfirmed` or `none`.
    pub reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub user_agent: String,
    pub js_cookie_present: bool,
    pub detect_crawlers: bool,
    pub detect_js: bool,
    pub force_fallback: bool,
}

impl DecisionRecord {
    pub fn new(signals: &RequestSignals, config: &FeatureConfig, decision: &FallbackDecision) -> Self {
        let (reason, signature) = match decision.reason() {
            None => ("none", None),
            Some(FallbackReason::Forced) => ("forced", None),
            Some(FallbackReason::Crawler(signature)) => ("crawler", Some(signature.clone())),
            Some(FallbackReason::JavaScriptUnconfirmed) => ("javascript_unconfirmed", None),
        };

        Self {
            fallback: decision.use_fallback(),
            reason,
            signature,
            user_agent: signals.user_agent.clone(),
            js_cookie_present: signals.js_cookie_present(),
            detect_crawlers: config.detect_crawlers,
            detect_js: config.detect_js,
            force_fallback: config.force_fallback,
        }
    }
}

/// Write one info entry describing a fallback decision.
pub fn log_decision(
    logger: &StructuredLogger,
    signals: &RequestSignals,
    config: &FeatureConfig,
    decision: &FallbackDecision,
) -> DecisionRecord {
    let record = DecisionRecord::new(signals, config, decision);

    logger
        .info_builder("fallback decision")
        .field_bool("fallback", record.fallback)
        .field("reason", record.reason)
        .field_opt("signature", record.signature.as_deref())
        .field("user_agent", record.user_agent.as_str())
        .field_bool("js_cookie_present", record.js_cookie_present)
        .emit();

    record
}

/// Warn once per setting whose stored value could not be parsed and was
/// replaced by its default.
pub fn log_malformed_settings(logger: &StructuredLogger, keys: &[ConfigKey]) {
    for key in keys {
        logger
            .builder(LogLevel::Warn, "malformed setting, using default")
            .field("key", key.name())
            .field("path", key.path())
            .field("default", key.default_value().to_string())
            .emit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogSink;
    use theme_core::RequestId;

    fn logger() -> StructuredLogger {
        StructuredLogger::new(RequestId::from_string("req-7")).with_sink(LogSink::memory())
    }

    #[test]
    fn test_crawler_record() {
        let config = FeatureConfig::default().with_crawler_detection(true);
        let signals = RequestSignals::new("Mozilla/5.0 (compatible; bingbot/2.0)");
        let decision = FallbackDecision::Fallback(FallbackReason::Crawler("bingbot".to_string()));

        let logger = logger();
        let record = log_decision(&logger, &signals, &config, &decision);

        assert!(record.fallback);
        assert_eq!(record.reason, "crawler");
        assert_eq!(record.signature.as_deref(), Some("bingbot"));

        let lines = logger.sink().lines();
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["message"], "fallback decision");
        assert_eq!(value["signature"], "bingbot");
        assert_eq!(value["fallback"], true);
    }

    #[test]
    fn test_primary_record_has_no_signature() {
        let signals = RequestSignals::new("Mozilla/5.0").with_js_cookie("1");
        let record = DecisionRecord::new(&signals, &FeatureConfig::default(), &FallbackDecision::Primary);

        assert!(!record.fallback);
        assert_eq!(record.reason, "none");
        assert!(record.js_cookie_present);

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("signature").is_none());
    }

    #[test]
    fn test_malformed_settings_warn_per_key() {
        let logger = logger();
        log_malformed_settings(&logger, &[ConfigKey::DetectJs, ConfigKey::JsCookieLifetimeSeconds]);

        let lines = logger.sink().lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""level":"warn""#));
        assert!(lines[1].contains(r#""default":"31536000""#));
    }
}
