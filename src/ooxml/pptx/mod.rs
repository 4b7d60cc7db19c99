//! PowerPoint (.pptx) presentation writing and inspection.
//!
//! - `writer`: build a presentation slide by slide and serialize it
//! - `template`: the fixed master, layouts, and theme every deck carries
//! - `outline`: read a written deck back into a structural outline
//!
//! # Example
//!
//! ```rust
//! use stratdeck::ooxml::pptx::{DeckOutline, MutablePresentation, SlideLayout};
//!
//! let mut pres = MutablePresentation::new();
//! let slide = pres.add_slide(SlideLayout::Title);
//! slide.set_title("Quarterly Review");
//! slide.set_body(["Client: Acme"]);
//!
//! let outline = DeckOutline::from_bytes(&pres.to_bytes()?)?;
//! assert_eq!(outline.slides[0].title.as_deref(), Some("Quarterly Review"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod format;
pub mod layout;
pub mod outline;
pub mod properties;
pub mod template;
pub mod writer;

pub use format::{ImageFormat, TextFormat};
pub use layout::SlideLayout;
pub use outline::{DeckOutline, PictureOutline, SlideOutline};
pub use properties::DocumentProperties;
pub use writer::{MutablePresentation, MutableShape, MutableSlide};
