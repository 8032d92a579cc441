//! Product image roles and resolution.

use serde::{Deserialize, Serialize};

use crate::product::ProductSnapshot;

/// Image role a template asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ImageRole {
    /// Main product image.
    #[default]
    #[serde(rename = "product_base_image")]
    ProductBase,
    /// Listing image.
    #[serde(rename = "product_small_image")]
    ProductSmall,
    /// Thumbnail image.
    #[serde(rename = "product_thumbnail_image")]
    ProductThumbnail,
}

impl ImageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRole::ProductBase => "product_base_image",
            ImageRole::ProductSmall => "product_small_image",
            ImageRole::ProductThumbnail => "product_thumbnail_image",
        }
    }
}

/// A resolved image attached to a product snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Role the image is assigned to.
    pub role: ImageRole,
    /// Absolute image URL.
    pub url: String,
}

impl ProductImage {
    pub fn new(role: ImageRole, url: impl Into<String>) -> Self {
        Self {
            role,
            url: url.into(),
        }
    }
}

/// Resolves the URL of a product image for a role.
///
/// The platform's media service implements this; structured data only
/// needs the final URL.
pub trait ImageResolver {
    /// URL of the image for `role`, or `None` when the product has none.
    fn resolve(&self, product: &ProductSnapshot, role: ImageRole) -> Option<String>;
}

/// Resolver that reads the images carried on the snapshot itself, with an
/// optional placeholder for products that have no image in the role.
#[derive(Debug, Clone, Default)]
pub struct SnapshotImageResolver {
    placeholder: Option<String>,
}

impl SnapshotImageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `url` when a product has no image for the requested role.
    pub fn with_placeholder(mut self, url: impl Into<String>) -> Self {
        self.placeholder = Some(url.into());
        self
    }
}

impl ImageResolver for SnapshotImageResolver {
    fn resolve(&self, product: &ProductSnapshot, role: ImageRole) -> Option<String> {
        product
            .images
            .iter()
            .find(|image| image.role == role && !image.url.is_empty())
            .map(|image| image.url.clone())
            .or_else(|| self.placeholder.clone())
    }
}
