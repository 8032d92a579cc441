//! Structured data gated by the theme configuration.

use theme_catalog::{CategorySnapshot, ImageResolver, ProductSnapshot};
use theme_core::{FeatureConfig, StoreContext};

use crate::category::render_category_structured_data;
use crate::fallback::{fallback_content, DefaultFallbackPage};
use crate::page::PageMeta;
use crate::product::render_product_structured_data;
use crate::website::render_website_structured_data;

/// Renders the SEO fragments of a fallback page for one store.
///
/// When structured data is disabled every JSON-LD method returns an empty
/// string. The fallback body is rendered either way.
pub struct SeoRenderer<'a> {
    config: FeatureConfig,
    store: StoreContext,
    images: &'a dyn ImageResolver,
}

impl<'a> SeoRenderer<'a> {
    pub fn new(config: FeatureConfig, store: StoreContext, images: &'a dyn ImageResolver) -> Self {
        Self {
            config,
            store,
            images,
        }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub fn store(&self) -> &StoreContext {
        &self.store
    }

    pub fn structured_data_enabled(&self) -> bool {
        self.config.structured_data_enabled
    }

    pub fn category(&self, category: Option<&CategorySnapshot>) -> String {
        if !self.structured_data_enabled() {
            return String::new();
        }
        render_category_structured_data(category)
    }

    pub fn product(&self, product: Option<&ProductSnapshot>) -> String {
        if !self.structured_data_enabled() {
            return String::new();
        }
        render_product_structured_data(product, &self.store, self.images)
    }

    pub fn website(&self) -> String {
        render_website_structured_data(&self.store, &self.config)
    }

    /// Head metadata for a page of this store.
    pub fn page_meta(&self, title: Option<&str>, description: Option<&str>) -> PageMeta {
        PageMeta::new(title, description, &self.store)
    }

    /// Default fallback page for this store. Minimal when minimal HTML is
    /// enabled.
    pub fn default_page(&self) -> DefaultFallbackPage {
        DefaultFallbackPage::new(self.store.name.as_str()).minimal(self.config.minimal_html_enabled)
    }

    /// Fallback body: registered content if any, else the default page.
    pub fn fallback_content(&self, registered: Option<&str>) -> String {
        fallback_content(registered, &self.default_page())
    }
}
