//! Website structured data.

use theme_core::{FeatureConfig, StoreContext};

use crate::jsonld::{json_ld_script, WebSite, SCHEMA_CONTEXT};

/// Build the `WebSite` document for a store.
pub fn website_document(store: &StoreContext) -> WebSite {
    WebSite {
        context: SCHEMA_CONTEXT.to_string(),
        kind: "WebSite".to_string(),
        name: store.name.clone(),
        url: store.base_url.clone(),
    }
}

/// Render the store-wide JSON-LD block.
///
/// Returns an empty string when structured data is disabled.
pub fn render_website_structured_data(store: &StoreContext, config: &FeatureConfig) -> String {
    if !config.structured_data_enabled {
        return String::new();
    }
    json_ld_script(&website_document(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_website_gated_by_config() {
        let store = StoreContext::new("Demo Store", "default", "https://shop.test/");
        assert_eq!(render_website_structured_data(&store, &FeatureConfig::default()), "");

        let config = FeatureConfig::default().with_structured_data(true);
        let html = render_website_structured_data(&store, &config);
        assert!(html.contains(r#""@type": "WebSite""#));
        assert!(html.contains(r#""url": "https://shop.test/""#));
    }
}
