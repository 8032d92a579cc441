//! Fallback policy: serve the client application or the fallback page.

use std::fmt;
use std::sync::OnceLock;

use http::HeaderMap;
use serde::Serialize;
use theme_core::{FeatureConfig, RequestSignals};

use crate::signatures::CrawlerSignatureSet;

/// Cookie value that confirms JavaScript support.
pub const JS_COOKIE_CONFIRMED: &str = "1";

/// Why a request is served the fallback page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "signature", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Fallback is forced by configuration.
    Forced,
    /// The user agent matched a crawler signature.
    Crawler(String),
    /// JS detection is on and the capability cookie did not confirm support.
    JavaScriptUnconfirmed,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forced => write!(f, "forced by configuration"),
            Self::Crawler(signature) => write!(f, "crawler ({})", signature),
            Self::JavaScriptUnconfirmed => write!(f, "javascript not confirmed"),
        }
    }
}

/// Outcome of evaluating the policy for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "render")]
pub enum FallbackDecision {
    /// Serve the client application shell.
    Primary,
    /// Serve the server-rendered fallback page.
    Fallback(FallbackReason),
}

impl FallbackDecision {
    /// Whether the fallback page should be served.
    pub fn use_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Reason for the fallback, if any.
    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Primary => None,
            Self::Fallback(reason) => Some(reason),
        }
    }
}

impl fmt::Display for FallbackDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Fallback(reason) => write!(f, "fallback: {}", reason),
        }
    }
}

/// Fallback policy bound to a crawler signature set.
#[derive(Debug, Clone, Default)]
pub struct FallbackPolicy {
    signatures: CrawlerSignatureSet,
}

impl FallbackPolicy {
    /// Create a policy over a signature set.
    pub fn new(signatures: CrawlerSignatureSet) -> Self {
        Self { signatures }
    }

    /// Get the signature set.
    pub fn signatures(&self) -> &CrawlerSignatureSet {
        &self.signatures
    }

    /// Evaluate the policy.
    ///
    /// Checks run in order and the first that fires wins: forced fallback,
    /// crawler detection, then JS detection.
    pub fn decide(&self, signals: &RequestSignals, config: &FeatureConfig) -> FallbackDecision {
        if config.force_fallback {
            return FallbackDecision::Fallback(FallbackReason::Forced);
        }

        if let Some(signature) = self.matched_signature(signals, config) {
            return FallbackDecision::Fallback(FallbackReason::Crawler(signature.to_string()));
        }

        if !self.has_javascript_support(signals, config) {
            return FallbackDecision::Fallback(FallbackReason::JavaScriptUnconfirmed);
        }

        FallbackDecision::Primary
    }

    /// Extract signals from headers and evaluate the policy.
    pub fn decide_for_headers(&self, headers: &HeaderMap, config: &FeatureConfig) -> FallbackDecision {
        let signals = RequestSignals::from_headers(headers, &config.js_cookie_name);
        self.decide(&signals, config)
    }

    /// Whether the fallback page should be served.
    pub fn should_use_fallback(&self, signals: &RequestSignals, config: &FeatureConfig) -> bool {
        self.decide(signals, config).use_fallback()
    }

    /// First crawler signature matching the user agent.
    ///
    /// Always `None` when crawler detection is disabled or the user agent
    /// is empty.
    pub fn matched_signature(
        &self,
        signals: &RequestSignals,
        config: &FeatureConfig,
    ) -> Option<&str> {
        if !config.detect_crawlers {
            return None;
        }
        self.signatures.find_match(&signals.user_agent)
    }

    /// Whether the request comes from a known crawler.
    pub fn is_crawler(&self, signals: &RequestSignals, config: &FeatureConfig) -> bool {
        self.matched_signature(signals, config).is_some()
    }

    /// Whether the client is known to run JavaScript.
    ///
    /// With JS detection disabled support is assumed. Otherwise the
    /// capability cookie must be present with the exact value `"1"`.
    pub fn has_javascript_support(&self, signals: &RequestSignals, config: &FeatureConfig) -> bool {
        if !config.detect_js {
            return true;
        }
        signals.js_cookie.as_deref() == Some(JS_COOKIE_CONFIRMED)
    }
}

fn default_policy() -> &'static FallbackPolicy {
    static POLICY: OnceLock<FallbackPolicy> = OnceLock::new();
    POLICY.get_or_init(FallbackPolicy::default)
}

/// Evaluate the policy with the built-in crawler signatures.
pub fn decide(signals: &RequestSignals, config: &FeatureConfig) -> FallbackDecision {
    default_policy().decide(signals, config)
}

/// Whether to serve the fallback page, using the built-in crawler signatures.
pub fn should_use_fallback(signals: &RequestSignals, config: &FeatureConfig) -> bool {
    default_policy().should_use_fallback(signals, config)
}

/// Whether the request is a crawler, using the built-in crawler signatures.
pub fn is_crawler(signals: &RequestSignals, config: &FeatureConfig) -> bool {
    default_policy().is_crawler(signals, config)
}

/// Whether the client is known to run JavaScript.
pub fn has_javascript_support(signals: &RequestSignals, config: &FeatureConfig) -> bool {
    default_policy().has_javascript_support(signals, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1)";
    const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

    #[test]
    fn test_all_flags_off_serves_primary() {
        let config = FeatureConfig::default();
        assert_eq!(decide(&RequestSignals::new(GOOGLEBOT), &config), FallbackDecision::Primary);
        assert!(!should_use_fallback(&RequestSignals::default(), &config));
    }

    #[test]
    fn test_force_fallback_wins() {
        let config = FeatureConfig::default()
            .with_force_fallback(true)
            .with_crawler_detection(true);
        let signals = RequestSignals::new(GOOGLEBOT).with_js_cookie("1");

        assert_eq!(
            decide(&signals, &config),
            FallbackDecision::Fallback(FallbackReason::Forced)
        );
    }

    #[test]
    fn test_crawler_detected() {
        let config = FeatureConfig::default().with_crawler_detection(true);
        let decision = decide(&RequestSignals::new(GOOGLEBOT), &config);

        assert!(decision.use_fallback());
        assert_eq!(decision.reason(), Some(&FallbackReason::Crawler("googlebot".into())));
    }

    #[test]
    fn test_crawler_ignored_when_detection_disabled() {
        let config = FeatureConfig::default();
        assert!(!is_crawler(&RequestSignals::new(GOOGLEBOT), &config));
    }

    #[test]
    fn test_empty_user_agent_continues_to_js_check() {
        let config = FeatureConfig::default()
            .with_crawler_detection(true)
            .with_js_detection(true);

        assert!(!is_crawler(&RequestSignals::default(), &config));
        assert_eq!(
            decide(&RequestSignals::default(), &config),
            FallbackDecision::Fallback(FallbackReason::JavaScriptUnconfirmed)
        );
        assert!(!should_use_fallback(
            &RequestSignals::default().with_js_cookie("1"),
            &config
        ));
    }

    #[test]
    fn test_js_cookie_must_be_exactly_one() {
        let config = FeatureConfig::default().with_js_detection(true);

        for value in ["0", "true", " 1", "11", ""] {
            let signals = RequestSignals::new(FIREFOX).with_js_cookie(value);
            assert!(!has_javascript_support(&signals, &config), "value {:?}", value);
            assert!(should_use_fallback(&signals, &config));
        }

        let signals = RequestSignals::new(FIREFOX).with_js_cookie("1");
        assert!(has_javascript_support(&signals, &config));
        assert!(!should_use_fallback(&signals, &config));
    }

    #[test]
    fn test_js_assumed_when_detection_disabled() {
        let config = FeatureConfig::default();
        assert!(has_javascript_support(&RequestSignals::new(FIREFOX), &config));
    }

    #[test]
    fn test_custom_signatures() {
        let policy = FallbackPolicy::new(CrawlerSignatureSet::from_patterns(["petalbot"]).unwrap());
        let config = FeatureConfig::default().with_crawler_detection(true);

        assert!(policy.is_crawler(&RequestSignals::new("PetalBot/1.0"), &config));
        assert!(!policy.is_crawler(&RequestSignals::new(GOOGLEBOT), &config));
    }

    #[test]
    fn test_decision_display() {
        let decision = FallbackDecision::Fallback(FallbackReason::Crawler("bingbot".into()));
        assert_eq!(decision.to_string(), "fallback: crawler (bingbot)");
        assert_eq!(FallbackDecision::Primary.to_string(), "primary");
    }
}
