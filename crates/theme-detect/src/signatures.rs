//! Crawler user-agent signatures.

use std::path::Path;

use serde::{Deserialize, Serialize};
use theme_core::{load_structured_file, ThemeError, ThemeResult};

/// Built-in crawler signatures, lowercase, in match order.
pub const DEFAULT_CRAWLER_SIGNATURES: &[&str] = &[
    "googlebot",
    "bingbot",
    "slurp", // Yahoo
    "duckduckbot",
    "baiduspider",
    "yandexbot",
    "sogou",
    "exabot",
    "facebot",
    "facebookexternalhit",
    "ia_archiver", // Alexa
    "applebot",
    "twitterbot",
    "linkedinbot",
    "whatsapp",
    "telegrambot",
    "pingdom",
    "uptimerobot",
    "semrushbot",
    "ahrefsbot",
    "mj12bot",
    "dotbot",
];

/// On-disk format of a signature file.
///
/// ```toml
/// extend_defaults = true
/// patterns = ["petalbot", "bytespider"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureFile {
    /// Keep the built-in list and append `patterns` to it.
    #[serde(default)]
    pub extend_defaults: bool,

    /// Substrings to match against the lowercased user agent.
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Immutable, ordered set of lowercase user-agent substrings.
///
/// Matching is case-insensitive and unanchored: a user agent is a crawler
/// when any signature occurs anywhere in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CrawlerSignatureSet {
    patterns: Vec<String>,
}

impl Default for CrawlerSignatureSet {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_CRAWLER_SIGNATURES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl CrawlerSignatureSet {
    /// Build a set from arbitrary patterns.
    ///
    /// Patterns are trimmed and lowercased; duplicates keep their first
    /// position. An empty pattern would match every user agent and is
    /// rejected.
    pub fn from_patterns<I, S>(patterns: I) -> ThemeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();

        for (index, pattern) in patterns.into_iter().enumerate() {
            let pattern = pattern.as_ref().trim().to_lowercase();
            if pattern.is_empty() {
                return Err(ThemeError::InvalidSignature { index });
            }
            if !normalized.contains(&pattern) {
                normalized.push(pattern);
            }
        }

        Ok(Self {
            patterns: normalized,
        })
    }

    /// Build a set from a parsed signature file.
    pub fn from_file_contents(file: SignatureFile) -> ThemeResult<Self> {
        if file.extend_defaults {
            Self::default().extended_with(file.patterns)
        } else {
            Self::from_patterns(file.patterns)
        }
    }

    /// Load a signature file (TOML or JSON).
    pub fn load(path: &Path) -> ThemeResult<Self> {
        let file: SignatureFile = load_structured_file(path)?;
        Self::from_file_contents(file)
    }

    /// A new set with `extra` appended after the current patterns.
    pub fn extended_with<I, S>(&self, extra: I) -> ThemeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let combined: Vec<String> = self
            .patterns
            .iter()
            .cloned()
            .chain(extra.into_iter().map(|p| p.as_ref().to_string()))
            .collect();
        Self::from_patterns(combined)
    }

    /// First signature contained in `user_agent`, if any.
    ///
    /// An empty user agent never matches.
    pub fn find_match(&self, user_agent: &str) -> Option<&str> {
        if user_agent.is_empty() {
            return None;
        }

        let user_agent = user_agent.to_lowercase();
        self.patterns
            .iter()
            .find(|pattern| user_agent.contains(pattern.as_str()))
            .map(String::as_str)
    }

    /// Whether `user_agent` contains any signature.
    pub fn is_match(&self, user_agent: &str) -> bool {
        self.find_match(user_agent).is_some()
    }

    /// Signatures in match order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    /// Number of signatures.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set has no signatures.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_set() {
        let set = CrawlerSignatureSet::default();
        assert_eq!(set.len(), 22);
        assert_eq!(set.patterns().next(), Some("googlebot"));
        assert!(set.patterns().all(|p| p == p.to_lowercase()));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let set = CrawlerSignatureSet::default();
        assert_eq!(
            set.find_match("Mozilla/5.0 (compatible; DuckDuckBot-Https/1.1)"),
            Some("duckduckbot")
        );
        assert!(set.is_match("facebookexternalhit/1.1"));
        assert!(!set.is_match("Mozilla/5.0 (Windows NT 10.0; Win64; x64) Firefox/121.0"));
    }

    #[test]
    fn test_empty_user_agent_never_matches() {
        assert!(!CrawlerSignatureSet::default().is_match(""));
    }

    #[test]
    fn test_first_match_in_order() {
        // "facebot" is checked before "facebookexternalhit" but does not occur in it
        let set = CrawlerSignatureSet::default();
        assert_eq!(set.find_match("facebookexternalhit"), Some("facebookexternalhit"));

        let set = CrawlerSignatureSet::from_patterns(["bot", "googlebot"]).unwrap();
        assert_eq!(set.find_match("Googlebot/2.1"), Some("bot"));
    }

    #[test]
    fn test_normalization_and_dedup() {
        let set = CrawlerSignatureSet::from_patterns([" PetalBot ", "petalbot", "Bytespider"]).unwrap();
        assert_eq!(set.patterns().collect::<Vec<_>>(), vec!["petalbot", "bytespider"]);
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = CrawlerSignatureSet::from_patterns(["googlebot", "  "]).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidSignature { index: 1 }));
    }

    #[test]
    fn test_extend_keeps_defaults() {
        let set = CrawlerSignatureSet::default().extended_with(["petalbot"]).unwrap();
        assert_eq!(set.len(), 23);
        assert!(set.is_match("Mozilla/5.0 (compatible; PetalBot)"));
        assert!(set.is_match("Googlebot"));
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "extend_defaults = true\npatterns = [\"PetalBot\"]").unwrap();

        let set = CrawlerSignatureSet::load(file.path()).unwrap();
        assert_eq!(set.len(), 23);
        assert!(set.is_match("petalbot"));
    }

    #[test]
    fn test_load_from_json_replaces_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"patterns": ["internal-monitor"]}}"#).unwrap();

        let set = CrawlerSignatureSet::load(file.path()).unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.is_match("Googlebot"));
        assert!(set.is_match("Internal-Monitor/3"));
    }
}
