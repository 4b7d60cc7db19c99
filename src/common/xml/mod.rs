//! XML text helpers shared by the package writer and the outline reader.

mod escape;

pub use escape::{escape_xml, resolve_entity, unescape_xml};
