//! SEO markup for the storefront fallback page.
//!
//! This crate provides:
//! - JSON-LD documents for categories, products and the website
//! - `SeoRenderer` - Structured data gated by the theme configuration
//! - The default fallback page shown when no richer content is registered
//! - The bootstrap payload the client loader reads on the primary path
//!
//! Every render function is total: it returns a string, and an empty
//! string means there is nothing to render.
//!
//! # Example
//!
//! ```
//! use theme_catalog::ProductSnapshot;
//! use theme_core::StoreContext;
//! use theme_seo::render_product_structured_data;
//! use theme_catalog::SnapshotImageResolver;
//!
//! let store = StoreContext::new("Demo Store", "default", "https://shop.test/");
//! let product = ProductSnapshot::new("MUG-1", "Mug", "https://shop.test/mug.html").with_price(12.5);
//!
//! let html = render_product_structured_data(Some(&product), &store, &SnapshotImageResolver::new());
//! assert!(html.contains(r#""price": "12.50""#));
//! ```

mod bootstrap;
mod category;
mod fallback;
mod html;
mod jsonld;
mod page;
mod product;
mod renderer;
mod website;

pub use bootstrap::*;
pub use category::*;
pub use fallback::*;
pub use html::*;
pub use jsonld::*;
pub use page::*;
pub use product::*;
pub use renderer::*;
pub use website::*;
