//! Stratdeck - assemble generated strategy text and creative visuals into
//! PowerPoint (.pptx) proposal decks
//!
//! A deck is a title slide, one slide per numbered section of the strategy
//! text, and one captioned slide per visual. Everything happens in memory:
//! the crate produces `.pptx` bytes and leaves storage and transport to the
//! caller.
//!
//! # Features
//!
//! - **Section splitting**: line-anchored `1.`, `2.`, ... markers, tolerant of
//!   unnumbered, empty, or oddly spaced text
//! - **PPTX writer**: a write-only PresentationML/OPC package writer with a
//!   built-in master, three layouts, and a theme
//! - **Outline reader**: read a written deck back to check its structure
//! - **Generation brief and response**: prompt building and provider
//!   response parsing (text parts and base64 inline images)
//! - **Configuration**: strings, slide size, and geometry from YAML or JSON
//!
//! # Example - Assembling a deck
//!
//! ```
//! use stratdeck::{DeckOutline, VisualAsset, assemble};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let png = VisualAsset::from_bytes(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])?;
//! let bytes = assemble(
//!     "1. As-is\nEV demand is growing\n2. To-be\nLead the urban segment",
//!     &[png],
//!     "Acme Motors",
//!     "EV SUV",
//! )?;
//!
//! let outline = DeckOutline::from_bytes(&bytes)?;
//! assert_eq!(outline.slide_count(), 4);
//! assert_eq!(outline.slides[0].title.as_deref(), Some("EV SUV Strategy Proposal"));
//! assert_eq!(outline.slides[3].text_boxes, vec!["Creative concept 1".to_string()]);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - From a provider response
//!
//! ```
//! use stratdeck::{DeckAssembler, GenerationResponse, StrategyBrief};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let brief = StrategyBrief::new("Acme Motors", "EV SUV", "Urban families", "");
//! let _body = brief.request().to_json()?;
//!
//! let response = r#"{"candidates":[{"content":{"parts":[{"text":"1. Tactics\nAR test drives"}]}}]}"#;
//! let outputs = GenerationResponse::from_json(response)?.into_outputs()?;
//!
//! let spec = brief.deck_spec();
//! let bytes = DeckAssembler::new().assemble(
//!     &outputs.strategy_text,
//!     &outputs.images,
//!     &spec.client_name,
//!     &spec.product_name,
//! )?;
//! assert!(bytes.starts_with(b"PK"));
//! # Ok(())
//! # }
//! ```

/// Shared building blocks: errors, XML escaping, and length units
pub mod common;

/// Prompt building and provider response parsing
pub mod generation;

/// OOXML (Office Open XML) package and PresentationML writer
///
/// This module provides the OPC layer (parts, relationships, ZIP container)
/// and the `.pptx` writer and outline reader built on it.
pub mod ooxml;

/// Section splitting, deck planning, and assembly
pub mod strategy;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use generation::{GenerationOutputs, GenerationRequest, GenerationResponse, StrategyBrief};
pub use ooxml::pptx::{DeckOutline, ImageFormat, SlideLayout, SlideOutline};
pub use strategy::{
    Deck, DeckAssembler, DeckConfig, DeckSlide, DeckSpec, Section, SlideKind, VisualAsset,
    assemble, split_sections,
};
