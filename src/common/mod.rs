//! Common types and utilities shared across the crate.
//!
//! Holds the unified error type, XML text helpers used by both the package
//! writer and the outline reader, and EMU length conversions.

// Submodule declarations
pub mod error;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
