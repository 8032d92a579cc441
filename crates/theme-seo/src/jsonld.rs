//! schema.org documents and JSON-LD script encoding.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// schema.org vocabulary URL.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Availability literal emitted for salable products.
pub const IN_STOCK: &str = "https://schema.org/InStock";

/// `CollectionPage` document for a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPage {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub breadcrumb: Option<BreadcrumbList>,
}

/// `BreadcrumbList` of a category page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadcrumbList {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "itemListElement")]
    pub item_list_element: Vec<ListItem>,
}

/// One breadcrumb entry. `item` is `null` for categories without a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: String,
    pub position: usize,
    pub name: String,
    pub item: Option<String>,
}

/// `Product` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub offers: Option<Offer>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub brand: Option<Brand>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub aggregate_rating: Option<AggregateRating>,
}

/// `Offer` block of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub kind: String,
    pub url: String,
    pub price_currency: String,
    pub price: String,
    pub availability: String,
}

/// `Brand` block of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
}

/// `AggregateRating` block of a product, on a 0-5 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    #[serde(rename = "@type")]
    pub kind: String,
    pub rating_value: f64,
    pub review_count: u32,
}

/// `WebSite` document for the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSite {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub url: String,
}

/// Serialize `value` as indented JSON that is safe inside a `<script>`
/// element.
///
/// Forward slashes are written as-is. `<` is written as `\u003c` so no
/// string value can close the surrounding script element. Returns `None`
/// when the value cannot be serialized.
pub fn to_script_json<T: Serialize>(value: &T) -> Option<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).ok()?;

    let json = String::from_utf8(buf).ok()?;
    Some(json.replace('<', "\\u003c"))
}

/// Encode a document as a JSON-LD `<script>` block.
///
/// Returns an empty string when the document cannot be serialized.
pub fn json_ld_script<T: Serialize>(document: &T) -> String {
    to_script_json(document)
        .map(|json| format!(r#"<script type="application/ld+json">{}</script>"#, json))
        .unwrap_or_default()
}

/// Extract the JSON payload from a script block produced by
/// [`json_ld_script`].
pub fn script_payload(script: &str) -> Option<&str> {
    script
        .strip_prefix(r#"<script type="application/ld+json">"#)?
        .strip_suffix("</script>")
}
