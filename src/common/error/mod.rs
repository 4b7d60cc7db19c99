//! Unified error types for stratdeck.
//!
//! The OPC and PresentationML layers keep their own error enums; this module
//! folds them into the single error type the public API returns.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
