//! Fallback decision engine for the storefront theme layer.
//!
//! Classifies a request as crawler / no-JS / forced-fallback versus a normal
//! browser that can boot the client application.
//!
//! # Example
//!
//! ```
//! use theme_core::{FeatureConfig, RequestSignals};
//! use theme_detect::should_use_fallback;
//!
//! let config = FeatureConfig::default().with_crawler_detection(true);
//! let signals = RequestSignals::new("Mozilla/5.0 (compatible; Googlebot/2.1)");
//!
//! assert!(should_use_fallback(&signals, &config));
//! ```

mod policy;
mod signatures;

pub use policy::*;
pub use signatures::*;
