//! Page-level metadata for the fallback document.

use serde::Serialize;
use theme_core::StoreContext;

/// Title used when the page has none.
pub const DEFAULT_PAGE_TITLE: &str = "Store";

/// Head metadata shared by both render paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Page title.
    pub title: String,
    /// Meta description (may be empty).
    pub description: String,
    /// Value for the `lang` attribute.
    pub lang: String,
}

impl PageMeta {
    /// Build page metadata, applying defaults for a missing title or
    /// description.
    pub fn new(title: Option<&str>, description: Option<&str>, store: &StoreContext) -> Self {
        Self {
            title: page_title(title),
            description: page_description(description),
            lang: store.html_lang(),
        }
    }
}

/// Page title, or `"Store"` when empty.
pub fn page_title(title: Option<&str>) -> String {
    title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_PAGE_TITLE)
        .to_string()
}

/// Meta description, or empty when there is none.
pub fn page_description(description: Option<&str>) -> String {
    description.unwrap_or_default().trim().to_string()
}
