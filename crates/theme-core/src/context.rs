//! Per-request inputs and store context.

use std::sync::atomic::{AtomicU32, Ordering};

use http::header::{COOKIE, USER_AGENT};
use http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Unique request identifier for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new request ID.
    pub fn generate() -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let id = format!(
            "{:x}-{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        Self(id)
    }

    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The parts of a request the fallback policy looks at.
///
/// Built explicitly from headers so policy evaluation stays a pure function
/// of its arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSignals {
    /// Raw `User-Agent` header (empty when absent).
    pub user_agent: String,
    /// Value of the JS capability cookie, if the cookie was sent.
    pub js_cookie: Option<String>,
}

impl RequestSignals {
    /// Create signals from a user agent, with no capability cookie.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            js_cookie: None,
        }
    }

    /// Set the capability cookie value.
    pub fn with_js_cookie(mut self, value: impl Into<String>) -> Self {
        self.js_cookie = Some(value.into());
        self
    }

    /// Extract signals from request headers.
    ///
    /// `cookie_name` is the configured capability cookie name. Header bytes
    /// that are not valid UTF-8 are replaced, never dropped.
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        let user_agent = headers
            .get(USER_AGENT)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();

        let js_cookie = headers
            .get_all(COOKIE)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
            .find_map(|header| cookie_value(&header, cookie_name).map(str::to_string));

        Self {
            user_agent,
            js_cookie,
        }
    }

    /// Whether the capability cookie was sent at all.
    pub fn js_cookie_present(&self) -> bool {
        self.js_cookie.is_some()
    }
}

/// Find a cookie's value in a `Cookie` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}

/// Store, locale and currency of the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreContext {
    /// Store display name.
    pub name: String,
    /// Store code.
    pub code: String,
    /// Store base URL.
    pub base_url: String,
    /// Active currency code (e.g., "USD").
    pub currency_code: String,
    /// Active locale (e.g., "en_US").
    pub locale: String,
}

impl StoreContext {
    /// Create a store context.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            base_url: base_url.into(),
            currency_code: "USD".to_string(),
            locale: "en_US".to_string(),
        }
    }

    /// Set the active currency code.
    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    /// Set the active locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Locale formatted for the HTML `lang` attribute (`en_US` -> `en-US`).
    pub fn html_lang(&self) -> String {
        self.locale.replace('_', "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_signals_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0 (X11)"));
        headers.insert(COOKIE, HeaderValue::from_static("session=abc; js_enabled=1"));

        let signals = RequestSignals::from_headers(&headers, "js_enabled");
        assert_eq!(signals.user_agent, "Mozilla/5.0 (X11)");
        assert_eq!(signals.js_cookie.as_deref(), Some("1"));
        assert!(signals.js_cookie_present());
    }

    #[test]
    fn test_non_ascii_header_bytes_are_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_bytes(b"Mozilla/5.0 (compatible; Googlebot/2.1; caf\xe9)").unwrap(),
        );
        headers.insert(COOKIE, HeaderValue::from_bytes(b"name=Jos\xe9; js_enabled=1").unwrap());

        let signals = RequestSignals::from_headers(&headers, "js_enabled");
        assert!(signals.user_agent.starts_with("Mozilla/5.0 (compatible; Googlebot/2.1; caf"));
        assert_eq!(signals.js_cookie.as_deref(), Some("1"));
    }

    #[test]
    fn test_missing_headers() {
        let signals = RequestSignals::from_headers(&HeaderMap::new(), "js_enabled");
        assert_eq!(signals.user_agent, "");
        assert!(!signals.js_cookie_present());
    }

    #[test]
    fn test_cookie_across_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("has_js=0"));

        let signals = RequestSignals::from_headers(&headers, "has_js");
        assert_eq!(signals.js_cookie.as_deref(), Some("0"));
    }

    #[test]
    fn test_cookie_name_is_exact() {
        assert_eq!(cookie_value("xjs_enabled=1", "js_enabled"), None);
        assert_eq!(cookie_value("js_enabled=", "js_enabled"), Some(""));
        assert_eq!(cookie_value(" js_enabled = 1 ", "js_enabled"), Some("1"));
    }

    #[test]
    fn test_html_lang() {
        let store = StoreContext::new("Shop", "default", "https://shop.test/").with_locale("de_DE");
        assert_eq!(store.html_lang(), "de-DE");
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }
}
