//! Product snapshot for fallback rendering.

use std::path::Path;

use serde::{Deserialize, Serialize};
use theme_core::{load_structured_file, ThemeResult};

use crate::image::ProductImage;
use crate::money::{format_price, round_half_up};

/// Review summary attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Average rating on the platform's 0-100 scale.
    pub rating_summary: f64,
    /// Number of approved reviews.
    pub reviews_count: u32,
}

impl RatingSummary {
    pub fn new(rating_summary: f64, reviews_count: u32) -> Self {
        Self {
            rating_summary,
            reviews_count,
        }
    }

    /// Whether there is anything to publish.
    pub fn has_reviews(&self) -> bool {
        self.reviews_count > 0 && self.rating_summary > 0.0
    }

    /// Rating on a 0-5 scale, rounded to one decimal.
    pub fn five_star_value(&self) -> f64 {
        round_half_up(self.rating_summary / 20.0, 1)
            .parse()
            .unwrap_or(0.0)
    }
}

/// Read-only projection of the current product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Stock keeping unit.
    pub sku: String,
    /// Product name.
    pub name: String,
    /// Full description (may contain HTML).
    #[serde(default)]
    pub description: Option<String>,
    /// Short description for listings (may contain HTML).
    #[serde(default)]
    pub short_description: Option<String>,
    /// Canonical product URL.
    pub url: String,
    /// Final price in the store's active currency.
    #[serde(default)]
    pub final_price: f64,
    /// Whether the product is salable.
    #[serde(default)]
    pub available: bool,
    /// Manufacturer attribute text.
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Review summary.
    #[serde(default)]
    pub rating: Option<RatingSummary>,
    /// Resolved images.
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl ProductSnapshot {
    /// Create an available product with no price or optional attributes.
    pub fn new(sku: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            description: None,
            short_description: None,
            url: url.into(),
            final_price: 0.0,
            available: true,
            manufacturer: None,
            rating: None,
            images: Vec::new(),
        }
    }

    /// Load a snapshot from a TOML or JSON file.
    pub fn load(path: &Path) -> ThemeResult<Self> {
        load_structured_file(path)
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.final_price = price;
        self
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_short_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = Some(description.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_rating(mut self, rating: RatingSummary) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_image(mut self, image: ProductImage) -> Self {
        self.images.push(image);
        self
    }

    /// Description to publish: the short description when it has content,
    /// otherwise the full description.
    pub fn summary_text(&self) -> Option<&str> {
        self.short_description
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.description.as_deref())
    }

    /// Final price formatted with two decimals.
    pub fn formatted_price(&self) -> String {
        format_price(self.final_price)
    }

    /// Manufacturer name, if it has content.
    pub fn brand(&self) -> Option<&str> {
        self.manufacturer.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Rating summary, if there are reviews to publish.
    pub fn published_rating(&self) -> Option<&RatingSummary> {
        self.rating.as_ref().filter(|r| r.has_reviews())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prefers_short_description() {
        let product = ProductSnapshot::new("SKU", "Mug", "https://shop.test/mug.html")
            .with_description("<p>Long</p>")
            .with_short_description("Short");
        assert_eq!(product.summary_text(), Some("Short"));
    }

    #[test]
    fn test_summary_falls_back_to_description() {
        let product = ProductSnapshot::new("SKU", "Mug", "https://shop.test/mug.html")
            .with_description("Long")
            .with_short_description("");
        assert_eq!(product.summary_text(), Some("Long"));

        let bare = ProductSnapshot::new("SKU", "Mug", "https://shop.test/mug.html");
        assert_eq!(bare.summary_text(), None);
    }

    #[test]
    fn test_rating_conversion() {
        let rating = RatingSummary::new(80.0, 10);
        assert!(rating.has_reviews());
        assert_eq!(rating.five_star_value(), 4.0);

        assert_eq!(RatingSummary::new(93.0, 3).five_star_value(), 4.7);
        assert_eq!(RatingSummary::new(100.0, 1).five_star_value(), 5.0);
    }

    #[test]
    fn test_rating_without_reviews_is_not_published() {
        let product = ProductSnapshot::new("SKU", "Mug", "https://shop.test/mug.html")
            .with_rating(RatingSummary::new(80.0, 0));
        assert!(product.published_rating().is_none());

        let product = product.with_rating(RatingSummary::new(0.0, 4));
        assert!(product.published_rating().is_none());
    }

    #[test]
    fn test_blank_brand_is_ignored() {
        let product = ProductSnapshot::new("SKU", "Mug", "https://shop.test/mug.html")
            .with_manufacturer("  ");
        assert_eq!(product.brand(), None);
    }

    #[test]
    fn test_formatted_price() {
        let product = ProductSnapshot::new("SKU", "Mug", "https://shop.test/mug.html").with_price(19.999);
        assert_eq!(product.formatted_price(), "20.00");
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mug.toml");
        std::fs::write(
            &path,
            r#"
sku = "MUG-1"
name = "Enamel Mug"
url = "https://shop.test/enamel-mug.html"
final_price = 12.5
available = true
manufacturer = "Falcon"

[rating]
rating_summary = 90.0
reviews_count = 3

[[images]]
role = "product_base_image"
url = "https://cdn.test/mug.jpg"
"#,
        )
        .unwrap();

        let product = ProductSnapshot::load(&path).unwrap();
        assert_eq!(product.formatted_price(), "12.50");
        assert_eq!(product.brand(), Some("Falcon"));
        assert_eq!(product.published_rating().map(|r| r.five_star_value()), Some(4.5));
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ProductSnapshot::load(&dir.path().join("missing.json")).is_err());
    }
}
