//! A slide under construction: layout placeholders and free shapes.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace as ns;
use crate::ooxml::pptx::layout::SlideLayout;
use std::fmt::Write as FmtWrite;

// Import shared format types
use super::super::format::{ImageFormat, TextFormat};
use super::relmap::PictureRels;
use super::shape::{MutableShape, ShapeType, split_paragraphs, write_paragraphs};

/// Group shape is id 1, title placeholder 2, body placeholder 3.
const FIRST_FREE_SHAPE_ID: u32 = 4;

/// A mutable slide in a presentation.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID (unique identifier)
    pub(crate) slide_id: u32,
    /// Layout the slide is based on
    pub(crate) layout: SlideLayout,
    /// Slide title (stored in title placeholder)
    pub(crate) title: Option<String>,
    /// Run formatting for the title
    pub(crate) title_format: TextFormat,
    /// Paragraphs of the subtitle or body placeholder
    pub(crate) body: Option<Vec<String>>,
    /// Run formatting for the body
    pub(crate) body_format: TextFormat,
    /// Shapes on the slide
    pub(crate) shapes: Vec<MutableShape>,
}

impl MutableSlide {
    /// Create a new empty slide.
    pub(crate) fn new(slide_id: u32, layout: SlideLayout) -> Self {
        Self {
            slide_id,
            layout,
            title: None,
            title_format: TextFormat::default(),
            body: None,
            body_format: TextFormat::default(),
            shapes: Vec::new(),
        }
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Get the slide layout.
    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    /// Set the slide title.
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Get the slide title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set run formatting for the title placeholder.
    pub fn set_title_format(&mut self, format: TextFormat) {
        self.title_format = format;
    }

    /// Set the subtitle (title layout) or body (content layout) paragraphs.
    ///
    /// An empty list still produces a placeholder holding one empty paragraph.
    pub fn set_body<I, S>(&mut self, paragraphs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = Some(paragraphs.into_iter().map(Into::into).collect());
    }

    /// Set the body from text, one paragraph per line.
    pub fn set_body_text(&mut self, text: &str) {
        self.set_body(split_paragraphs(text));
    }

    /// Get the body paragraphs.
    pub fn body(&self) -> Option<&[String]> {
        self.body.as_deref()
    }

    /// Set run formatting for the body placeholder.
    pub fn set_body_format(&mut self, format: TextFormat) {
        self.body_format = format;
    }

    fn next_shape_id(&self) -> u32 {
        FIRST_FREE_SHAPE_ID + self.shapes.len() as u32
    }

    /// Add a text box to the slide and return it for formatting.
    pub fn add_text_box(
        &mut self,
        text: &str,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> &mut MutableShape {
        let shape = MutableShape::new_text_box(self.next_shape_id(), text, x, y, width, height);
        self.push_shape(shape)
    }

    /// Add a picture from raw image bytes, detecting the format.
    ///
    /// Fails with [`OoxmlError::InvalidFormat`] when the bytes are not a
    /// PNG, JPEG, GIF, BMP or TIFF image.
    pub fn add_picture_from_bytes(
        &mut self,
        data: Vec<u8>,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: &str,
    ) -> Result<&mut MutableShape> {
        let format = ImageFormat::detect_from_bytes(&data).ok_or_else(|| {
            OoxmlError::InvalidFormat("unrecognized image data".to_string())
        })?;
        Ok(self.add_picture(data, format, x, y, width, height, description))
    }

    /// Add a picture whose format is already known.
    #[allow(clippy::too_many_arguments)]
    pub fn add_picture(
        &mut self,
        data: Vec<u8>,
        format: ImageFormat,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: &str,
    ) -> &mut MutableShape {
        let shape = MutableShape::new_picture(
            self.next_shape_id(),
            data,
            format,
            x,
            y,
            width,
            height,
            description.to_string(),
        );
        self.push_shape(shape)
    }

    fn push_shape(&mut self, shape: MutableShape) -> &mut MutableShape {
        let index = self.shapes.len();
        self.shapes.push(shape);
        &mut self.shapes[index]
    }

    /// Get the number of free-standing shapes on the slide.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Iterate over the free-standing shapes on the slide.
    pub fn shapes(&self) -> impl Iterator<Item = &MutableShape> {
        self.shapes.iter()
    }

    /// Pictures in shape order, with their shape ids.
    pub(crate) fn collect_images(&self) -> Vec<(u32, &[u8], ImageFormat)> {
        self.shapes
            .iter()
            .filter_map(|shape| {
                shape
                    .get_image_data()
                    .map(|(data, format)| (shape.shape_id(), data, format))
            })
            .collect()
    }

    /// Generate slide XML, taking picture rIds from `picture_rels`.
    pub(crate) fn to_xml_with_rels(&self, picture_rels: &PictureRels) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);

        write!(
            xml,
            r#"<p:sld xmlns:p="{}" xmlns:a="{}" xmlns:r="{}">"#,
            ns::PML_MAIN,
            ns::DML_MAIN,
            ns::OFC_RELATIONSHIPS
        )?;

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        // Write group shape properties (required)
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        if let Some(ref title) = self.title {
            self.write_title_shape(&mut xml, title)?;
        }

        if let Some(ref body) = self.body {
            self.write_body_shape(&mut xml, body)?;
        }

        for shape in &self.shapes {
            let rel_id = match shape.shape_type {
                ShapeType::Picture { .. } => picture_rels.get(shape.shape_id()),
                ShapeType::TextBox { .. } => None,
            };
            shape.to_xml(&mut xml, rel_id)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");

        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }

    /// Write the title placeholder shape.
    fn write_title_shape(&self, xml: &mut String, title: &str) -> Result<()> {
        let ph_type = match self.layout {
            SlideLayout::Title => "ctrTitle",
            SlideLayout::TitleAndContent | SlideLayout::Blank => "title",
        };

        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        xml.push_str(r#"<p:cNvPr id="2" name="Title 1"/>"#);
        xml.push_str("<p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>");
        write!(xml, r#"<p:nvPr><p:ph type="{}"/></p:nvPr>"#, ph_type)
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("</p:nvSpPr>");

        xml.push_str("<p:spPr/>");

        xml.push_str("<p:txBody>");
        xml.push_str("<a:bodyPr/>");
        xml.push_str("<a:lstStyle/>");
        // A title is a single paragraph; line breaks inside it collapse to spaces
        let single_line = title.replace(['\r', '\n'], " ");
        write_paragraphs(xml, &[single_line], &self.title_format)?;
        xml.push_str("</p:txBody>");

        xml.push_str("</p:sp>");

        Ok(())
    }

    /// Write the subtitle or body placeholder shape.
    fn write_body_shape(&self, xml: &mut String, paragraphs: &[String]) -> Result<()> {
        let (name, ph) = match self.layout {
            SlideLayout::Title => ("Subtitle 2", r#"<p:ph type="subTitle" idx="1"/>"#),
            SlideLayout::TitleAndContent | SlideLayout::Blank => {
                ("Content Placeholder 2", r#"<p:ph idx="1"/>"#)
            },
        };

        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(xml, r#"<p:cNvPr id="3" name="{}"/>"#, name)
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("<p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>");
        write!(xml, "<p:nvPr>{}</p:nvPr>", ph).map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("</p:nvSpPr>");

        xml.push_str("<p:spPr/>");

        xml.push_str("<p:txBody>");
        xml.push_str(r#"<a:bodyPr wrap="square"><a:normAutofit/></a:bodyPr>"#);
        xml.push_str("<a:lstStyle/>");
        write_paragraphs(xml, paragraphs, &self.body_format)?;
        xml.push_str("</p:txBody>");

        xml.push_str("</p:sp>");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_title_slide_placeholders() {
        let mut slide = MutableSlide::new(256, SlideLayout::Title);
        slide.set_title("EV Strategy Proposal");
        slide.set_body(["Client: Acme", "Prepared by planning"]);

        let xml = slide.to_xml_with_rels(&PictureRels::new()).unwrap();
        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains(r#"<p:ph type="subTitle" idx="1"/>"#));
        assert!(xml.contains("<a:t>Client: Acme</a:t>"));
        assert!(xml.contains("<a:t>Prepared by planning</a:t>"));
    }

    #[test]
    fn test_empty_body_is_still_emitted() {
        let mut slide = MutableSlide::new(257, SlideLayout::TitleAndContent);
        slide.set_title("3. Concept");
        slide.set_body_text("");

        let xml = slide.to_xml_with_rels(&PictureRels::new()).unwrap();
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains(r#"<p:ph idx="1"/>"#));
        assert!(xml.contains(r#"<a:bodyPr wrap="square">"#));
        assert_eq!(slide.body(), Some(&[String::new()][..]));
    }

    #[test]
    fn test_shape_ids_follow_placeholders() {
        let mut slide = MutableSlide::new(258, SlideLayout::Blank);
        let caption = slide.add_text_box("Creative concept 1", 0, 0, 10, 10);
        assert_eq!(caption.shape_id(), 4);
        let picture = slide
            .add_picture_from_bytes(PNG_MAGIC.to_vec(), 0, 0, 10, 10, "Creative concept 1")
            .unwrap();
        assert_eq!(picture.shape_id(), 5);
        assert_eq!(slide.collect_images().len(), 1);
    }

    #[test]
    fn test_unknown_picture_bytes_rejected() {
        let mut slide = MutableSlide::new(259, SlideLayout::Blank);
        let result = slide.add_picture_from_bytes(b"not an image".to_vec(), 0, 0, 1, 1, "");
        assert!(matches!(result, Err(OoxmlError::InvalidFormat(_))));
        assert_eq!(slide.shape_count(), 0);
    }

    #[test]
    fn test_picture_uses_mapped_rel_id() {
        let mut slide = MutableSlide::new(260, SlideLayout::Blank);
        slide.add_picture(PNG_MAGIC.to_vec(), ImageFormat::Png, 0, 0, 10, 10, "");

        let shape_id = slide.shapes().next().unwrap().shape_id();

        let mut rels = PictureRels::new();
        rels.insert(shape_id, "rId2".to_string());
        let xml = slide.to_xml_with_rels(&rels).unwrap();
        assert!(xml.contains(r#"r:embed="rId2""#));

        assert!(slide.to_xml_with_rels(&PictureRels::new()).is_err());
    }
}
