//! Slide-by-slide deck builder.
//!
//! [`MutablePresentation`] owns the slides and assembles the package;
//! [`MutableSlide`] holds placeholders and free shapes; [`MutableShape`] is a
//! text box or a picture.

pub mod pres;
mod relmap;
pub mod shape;
pub mod slide;

pub use pres::MutablePresentation;
pub use shape::MutableShape;
pub use slide::MutableSlide;
