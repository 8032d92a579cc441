//! Logging for the storefront theme layer.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with request and store context
//! - `DecisionRecord` - The audit line written for every fallback decision

mod decision;
mod logging;

pub use decision::*;
pub use logging::*;

pub use theme_core::RequestId;
