//! Unified error type for deck assembly.
//!
//! Malformed strategy text is never an error: the assembler degrades to a
//! smaller deck instead. Errors only come from serialization, image embedding,
//! configuration loading, and provider response parsing.
use thiserror::Error;

/// Main error type for stratdeck operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The package writer could not produce a deck buffer
    #[error("Deck serialization failed: {0}")]
    Serialization(String),

    /// Image bytes in a format that cannot be embedded in a slide
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// Bytes handed to the outline reader are not a readable deck
    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    /// Deck configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),

    /// Generation provider response could not be interpreted
    #[error("Invalid generation response: {0}")]
    InvalidResponse(String),
}

/// Result type for stratdeck operations.
pub type Result<T> = std::result::Result<T, Error>;
