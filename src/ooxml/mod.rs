//! Office Open XML (OOXML) support for writing presentations.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, parts, relationships)
//! 2. **PresentationML** (`pptx`): slides, shapes, templates, and the outline
//!    reader used to inspect a written deck
//!
//! # Example
//!
//! ```rust
//! use stratdeck::ooxml::pptx::{MutablePresentation, SlideLayout};
//!
//! let mut pres = MutablePresentation::new();
//! let slide = pres.add_slide(SlideLayout::TitleAndContent);
//! slide.set_title("1. Market");
//! slide.set_body(["Demand is shifting to EVs"]);
//! let bytes = pres.to_bytes()?;
//! assert!(bytes.starts_with(b"PK"));
//! # Ok::<(), stratdeck::ooxml::error::OoxmlError>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};
