//! Default fallback page content.

use crate::html::escape_html;

/// Message shown on the default fallback page.
pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Welcome to our store. Please enable JavaScript for the full experience.";

/// Minimal page shown to crawlers and no-JS browsers when the page layer
/// has no richer fallback content registered.
#[derive(Debug, Clone)]
pub struct DefaultFallbackPage {
    store_name: String,
    message: String,
    minimal: bool,
}

impl DefaultFallbackPage {
    /// Create the page for a store, with the default message.
    pub fn new(store_name: impl Into<String>) -> Self {
        Self {
            store_name: store_name.into(),
            message: DEFAULT_WELCOME_MESSAGE.to_string(),
            minimal: false,
        }
    }

    /// Replace the message (e.g., with a translation).
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Render without the wrapper elements.
    pub fn minimal(mut self, minimal: bool) -> Self {
        self.minimal = minimal;
        self
    }

    /// Render the page fragment. Store name and message are escaped.
    pub fn render(&self) -> String {
        let name = escape_html(&self.store_name);
        let message = escape_html(&self.message);

        if self.minimal {
            return format!("<h1>{}</h1>\n<p>{}</p>", name, message);
        }

        format!(
            concat!(
                "<div class=\"fallback-container\">\n",
                "    <header class=\"fallback-header\">\n",
                "        <h1>{}</h1>\n",
                "    </header>\n",
                "    <main class=\"fallback-main\">\n",
                "        <p>{}</p>\n",
                "    </main>\n",
                "</div>"
            ),
            name, message
        )
    }
}

/// Render the default fallback page for a store.
pub fn render_default_fallback(store_name: &str) -> String {
    DefaultFallbackPage::new(store_name).render()
}

/// Fallback body for the page: the registered block's HTML when there is
/// one with content, otherwise the default page.
pub fn fallback_content(registered: Option<&str>, default_page: &DefaultFallbackPage) -> String {
    match registered {
        Some(html) if !html.trim().is_empty() => html.to_string(),
        _ => default_page.render(),
    }
}
