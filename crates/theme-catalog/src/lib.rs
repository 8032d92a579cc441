//! Catalog snapshots for the storefront theme layer.
//!
//! The catalog itself lives in the platform; this crate only models the
//! read-only projection of a category or product that the fallback page
//! renders from:
//!
//! - **Category**: name, description, URL and breadcrumb path
//! - **Product**: SKU, price, availability, brand, rating, images
//! - **Money**: fixed-point price formatting for structured data

pub mod ids;
pub mod money;

pub mod category;
pub mod image;
pub mod product;

pub use category::{CategoryLink, CategorySnapshot};
pub use ids::*;
pub use image::{ImageResolver, ImageRole, ProductImage, SnapshotImageResolver};
pub use money::{format_price, round_half_up};
pub use product::{ProductSnapshot, RatingSummary};
