//! Product structured data.

use theme_catalog::{ImageResolver, ImageRole, ProductSnapshot};
use theme_core::StoreContext;

use crate::html::strip_tags;
use crate::jsonld::{
    json_ld_script, AggregateRating, Brand, Offer, ProductDocument, IN_STOCK, SCHEMA_CONTEXT,
};

/// Build the `Product` document for a product.
///
/// Optional blocks are omitted rather than emitted empty: `offers` only for
/// salable products, `brand` only with a manufacturer, `aggregateRating`
/// only with published reviews. Salable products are always `InStock`.
pub fn product_document(
    product: &ProductSnapshot,
    store: &StoreContext,
    images: &dyn ImageResolver,
) -> ProductDocument {
    let offers = product.available.then(|| Offer {
        kind: "Offer".to_string(),
        url: product.url.clone(),
        price_currency: store.currency_code.clone(),
        price: product.formatted_price(),
        availability: IN_STOCK.to_string(),
    });

    let brand = product.brand().map(|name| Brand {
        kind: "Brand".to_string(),
        name: name.to_string(),
    });

    let aggregate_rating = product.published_rating().map(|rating| AggregateRating {
        kind: "AggregateRating".to_string(),
        rating_value: rating.five_star_value(),
        review_count: rating.reviews_count,
    });

    ProductDocument {
        context: SCHEMA_CONTEXT.to_string(),
        kind: "Product".to_string(),
        name: product.name.clone(),
        description: strip_tags(product.summary_text().unwrap_or_default()),
        image: images.resolve(product, ImageRole::ProductBase),
        sku: product.sku.clone(),
        offers,
        brand,
        aggregate_rating,
    }
}

/// Render the JSON-LD block for the current product.
///
/// Returns an empty string when there is no current product.
pub fn render_product_structured_data(
    product: Option<&ProductSnapshot>,
    store: &StoreContext,
    images: &dyn ImageResolver,
) -> String {
    product
        .map(|product| json_ld_script(&product_document(product, store, images)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use theme_catalog::{ProductImage, RatingSummary, SnapshotImageResolver};

    fn store() -> StoreContext {
        StoreContext::new("Demo Store", "default", "https://shop.test/").with_currency("EUR")
    }

    fn mug() -> ProductSnapshot {
        ProductSnapshot::new("MUG-1", "Enamel Mug", "https://shop.test/enamel-mug.html")
            .with_price(19.999)
            .with_description("<p>A <em>sturdy</em> mug.</p>")
            .with_image(ProductImage::new(ImageRole::ProductBase, "https://cdn.test/mug.jpg"))
    }

    #[test]
    fn test_absent_product_renders_nothing() {
        let html = render_product_structured_data(None, &store(), &SnapshotImageResolver::new());
        assert_eq!(html, "");
    }

    #[test]
    fn test_full_document() {
        let product = mug()
            .with_manufacturer("Falcon")
            .with_rating(RatingSummary::new(80.0, 10));
        let doc = product_document(&product, &store(), &SnapshotImageResolver::new());

        assert_eq!(doc.description, "A sturdy mug.");
        assert_eq!(doc.image.as_deref(), Some("https://cdn.test/mug.jpg"));
        assert_eq!(
            doc.offers,
            Some(Offer {
                kind: "Offer".to_string(),
                url: "https://shop.test/enamel-mug.html".to_string(),
                price_currency: "EUR".to_string(),
                price: "20.00".to_string(),
                availability: "https://schema.org/InStock".to_string(),
            })
        );
        assert_eq!(doc.brand.map(|b| b.name), Some("Falcon".to_string()));

        let rating = doc.aggregate_rating.unwrap();
        assert_eq!(rating.rating_value, 4.0);
        assert_eq!(rating.review_count, 10);
    }

    #[test]
    fn test_unavailable_product_has_no_offer() {
        let product = mug().with_availability(false);
        let doc = product_document(&product, &store(), &SnapshotImageResolver::new());
        assert!(doc.offers.is_none());

        let html = render_product_structured_data(Some(&product), &store(), &SnapshotImageResolver::new());
        assert!(!html.contains("offers"));
    }

    #[test]
    fn test_optional_blocks_omitted() {
        let product = mug().with_rating(RatingSummary::new(80.0, 0));
        let html = render_product_structured_data(Some(&product), &store(), &SnapshotImageResolver::new());

        assert!(!html.contains("brand"));
        assert!(!html.contains("aggregateRating"));
    }

    #[test]
    fn test_short_description_preferred() {
        let product = mug().with_short_description("<b>Short</b> blurb");
        let doc = product_document(&product, &store(), &SnapshotImageResolver::new());
        assert_eq!(doc.description, "Short blurb");
    }

    #[test]
    fn test_missing_image_is_omitted() {
        let product = ProductSnapshot::new("SKU", "Plain", "https://shop.test/plain.html");
        let html = render_product_structured_data(Some(&product), &store(), &SnapshotImageResolver::new());
        assert!(!html.contains("\"image\""));
        assert!(html.contains(r#""description": """#));
    }

    #[test]
    fn test_whole_number_price() {
        let product = mug().with_price(5.0);
        let doc = product_document(&product, &store(), &SnapshotImageResolver::new());
        assert_eq!(doc.offers.unwrap().price, "5.00");
    }
}
