//! Image relationships assigned while a presentation package is built.
//!
//! Media parts are created before slide XML is generated, so the package
//! builder records which media part and rId each picture got, and the slide
//! writer looks them up by picture shape id.
use crate::ooxml::opc::PackURI;
use std::collections::HashMap;

/// Picture shape id to image relationship id, for one slide.
#[derive(Debug, Default)]
pub(crate) struct PictureRels {
    by_shape: HashMap<u32, String>,
}

impl PictureRels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shape_id: u32, rel_id: String) {
        self.by_shape.insert(shape_id, rel_id);
    }

    pub fn get(&self, shape_id: u32) -> Option<&str> {
        self.by_shape.get(&shape_id).map(String::as_str)
    }
}

/// Media parts of the whole deck, keyed by content.
///
/// Identical image bytes placed on several slides share one media part.
#[derive(Debug, Default)]
pub(crate) struct MediaStore<'a> {
    parts: HashMap<&'a [u8], PackURI>,
}

impl<'a> MediaStore<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partname already holding these bytes.
    pub fn get(&self, data: &[u8]) -> Option<&PackURI> {
        self.parts.get(data)
    }

    pub fn insert(&mut self, data: &'a [u8], partname: PackURI) {
        self.parts.insert(data, partname);
    }

    /// Number of distinct media parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }
}
