//! Strategy-to-deck assembly.
//!
//! [`split_sections`] cuts generated text into titled sections, [`Deck`]
//! plans the slides, and [`DeckAssembler`] renders the plan through the
//! PPTX writer.

mod assembler;
mod asset;
mod config;
mod deck;
mod section;

pub use assembler::{DeckAssembler, assemble};
pub use asset::VisualAsset;
pub use config::{BoxGeometry, DeckConfig, FontSizes};
pub use deck::{Deck, DeckSlide, DeckSpec, SlideKind};
pub use section::{Section, is_marker_line, split_sections};
