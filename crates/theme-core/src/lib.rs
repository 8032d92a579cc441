//! Core abstractions for the storefront theme layer.
//!
//! This crate provides the fundamental types shared by the other crates:
//! - `ConfigKey` / `ConfigAccessor` - Typed, scoped theme settings
//! - `FeatureConfig` - Resolved settings snapshot for one scope
//! - `RequestSignals` - The request inputs the fallback policy looks at
//! - `StoreContext` - Store, locale and currency of the current request
//! - `ThemeError` - Error type for loading files and data assets

mod config;
mod context;
mod error;
mod store;

pub use config::*;
pub use context::*;
pub use error::*;
pub use store::*;
