//! Text boxes and pictures placed on a slide.
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

// Import shared format types
pub use super::super::format::{ImageFormat, TextFormat};

/// A free-standing shape on a slide (text box or picture).
#[derive(Debug, Clone)]
pub struct MutableShape {
    /// Shape ID
    pub(crate) shape_id: u32,
    /// Shape type
    pub(crate) shape_type: ShapeType,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    TextBox {
        paragraphs: Vec<String>,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        format: TextFormat,
    },
    Picture {
        data: Vec<u8>,
        format: ImageFormat,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: String,
    },
}

impl MutableShape {
    /// Create a new text box shape. Each line of `text` becomes a paragraph.
    pub(crate) fn new_text_box(
        shape_id: u32,
        text: &str,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::TextBox {
                paragraphs: split_paragraphs(text),
                x,
                y,
                width,
                height,
                format: TextFormat::default(),
            },
        }
    }

    /// Create a new picture shape.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_picture(
        shape_id: u32,
        data: Vec<u8>,
        format: ImageFormat,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: String,
    ) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::Picture {
                data,
                format,
                x,
                y,
                width,
                height,
                description,
            },
        }
    }

    /// Get the shape ID.
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    /// Check whether this shape is a picture.
    pub fn is_picture(&self) -> bool {
        matches!(self.shape_type, ShapeType::Picture { .. })
    }

    /// Text of a text box, paragraphs joined with `\n`.
    pub fn text(&self) -> Option<String> {
        match &self.shape_type {
            ShapeType::TextBox { paragraphs, .. } => Some(paragraphs.join("\n")),
            ShapeType::Picture { .. } => None,
        }
    }

    /// Position and size as `(x, y, width, height)` in EMUs.
    pub fn bounds(&self) -> (i64, i64, i64, i64) {
        match self.shape_type {
            ShapeType::TextBox {
                x,
                y,
                width,
                height,
                ..
            }
            | ShapeType::Picture {
                x,
                y,
                width,
                height,
                ..
            } => (x, y, width, height),
        }
    }

    /// Set text formatting for this shape (only for text boxes).
    pub fn set_text_format(&mut self, format: TextFormat) -> &mut Self {
        if let ShapeType::TextBox {
            format: ref mut f, ..
        } = self.shape_type
        {
            *f = format;
        }
        self
    }

    /// Builder method: set font.
    pub fn font(&mut self, font: &str) -> &mut Self {
        if let ShapeType::TextBox {
            format: ref mut f, ..
        } = self.shape_type
        {
            f.font = Some(font.to_string());
        }
        self
    }

    /// Builder method: set font size.
    pub fn font_size(&mut self, size: f64) -> &mut Self {
        if let ShapeType::TextBox {
            format: ref mut f, ..
        } = self.shape_type
        {
            f.size = Some(size);
        }
        self
    }

    /// Builder method: set bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        if let ShapeType::TextBox {
            format: ref mut f, ..
        } = self.shape_type
        {
            f.bold = Some(bold);
        }
        self
    }

    /// Builder method: set italic.
    pub fn italic(&mut self, italic: bool) -> &mut Self {
        if let ShapeType::TextBox {
            format: ref mut f, ..
        } = self.shape_type
        {
            f.italic = Some(italic);
        }
        self
    }

    /// Builder method: set text color.
    pub fn color(&mut self, color: &str) -> &mut Self {
        if let ShapeType::TextBox {
            format: ref mut f, ..
        } = self.shape_type
        {
            f.color = Some(color.to_string());
        }
        self
    }

    /// Get image data if this shape is a picture.
    pub(crate) fn get_image_data(&self) -> Option<(&[u8], ImageFormat)> {
        match &self.shape_type {
            ShapeType::Picture { data, format, .. } => Some((data.as_slice(), *format)),
            ShapeType::TextBox { .. } => None,
        }
    }

    /// Generate XML for this shape.
    ///
    /// Pictures need the rId of their image relationship.
    pub(crate) fn to_xml(&self, xml: &mut String, rel_id: Option<&str>) -> Result<()> {
        match &self.shape_type {
            ShapeType::TextBox {
                paragraphs,
                x,
                y,
                width,
                height,
                format,
            } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="TextBox {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("<p:cNvSpPr txBox=\"1\"/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, *x, *y, *width, *height)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("<a:noFill/>");
                xml.push_str("</p:spPr>");

                xml.push_str("<p:txBody>");
                xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0">"#);
                xml.push_str(r#"<a:spAutoFit/>"#);
                xml.push_str("</a:bodyPr>");
                xml.push_str("<a:lstStyle/>");
                write_paragraphs(xml, paragraphs, format)?;
                xml.push_str("</p:txBody>");

                xml.push_str("</p:sp>");
            },
            ShapeType::Picture {
                x,
                y,
                width,
                height,
                description,
                ..
            } => {
                let rid = rel_id.ok_or_else(|| {
                    OoxmlError::Xml(format!(
                        "picture shape {} has no image relationship",
                        self.shape_id
                    ))
                })?;

                xml.push_str("<p:pic>");
                xml.push_str("<p:nvPicPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
                    self.shape_id,
                    self.shape_id - 1,
                    escape_xml(description)
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvPicPr>");

                xml.push_str("<p:blipFill>");
                write!(xml, r#"<a:blip r:embed="{}"/>"#, rid)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
                xml.push_str("</p:blipFill>");

                xml.push_str("<p:spPr>");
                write_xfrm(xml, *x, *y, *width, *height)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr>");
                xml.push_str("</p:pic>");
            },
        }

        Ok(())
    }
}

/// Split text into paragraphs on line breaks, dropping carriage returns.
pub(crate) fn split_paragraphs(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

pub(crate) fn write_xfrm(xml: &mut String, x: i64, y: i64, width: i64, height: i64) -> Result<()> {
    xml.push_str("<a:xfrm>");
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, x, y)
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, width, height)
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    xml.push_str("</a:xfrm>");
    Ok(())
}

/// Write `a:p` elements, one per paragraph.
///
/// Empty paragraphs are kept as `a:p` with only end-of-paragraph properties,
/// so an empty text still produces one paragraph.
pub(crate) fn write_paragraphs(
    xml: &mut String,
    paragraphs: &[String],
    format: &TextFormat,
) -> Result<()> {
    if paragraphs.is_empty() {
        return write_paragraphs(xml, &[String::new()], format);
    }

    for paragraph in paragraphs {
        xml.push_str("<a:p>");
        if paragraph.is_empty() {
            xml.push_str("<a:endParaRPr lang=\"en-US\" dirty=\"0\"");
            write_run_attributes(xml, format)?;
            xml.push_str("/>");
        } else {
            xml.push_str("<a:r>");
            xml.push_str("<a:rPr lang=\"en-US\" dirty=\"0\"");
            write_run_attributes(xml, format)?;
            xml.push('>');

            // Fill comes before fonts in CT_TextCharacterProperties
            if let Some(ref color) = format.color {
                write!(
                    xml,
                    "<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>",
                    escape_xml(color)
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }

            if let Some(ref font) = format.font {
                write!(
                    xml,
                    "<a:latin typeface=\"{0}\"/><a:ea typeface=\"{0}\"/>",
                    escape_xml(font)
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }

            xml.push_str("</a:rPr>");
            write!(xml, "<a:t>{}</a:t>", escape_xml(paragraph))
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            xml.push_str("</a:r>");
        }
        xml.push_str("</a:p>");
    }

    Ok(())
}

fn write_run_attributes(xml: &mut String, format: &TextFormat) -> Result<()> {
    if let Some(size) = format.size {
        write!(xml, " sz=\"{}\"", crate::common::unit::pt_to_centipoints(size))
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }

    if let Some(bold) = format.bold {
        xml.push_str(if bold { " b=\"1\"" } else { " b=\"0\"" });
    }

    if let Some(italic) = format.italic {
        xml.push_str(if italic { " i=\"1\"" } else { " i=\"0\"" });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_box_paragraphs() {
        let mut shape = MutableShape::new_text_box(4, "Line one\r\nLine <two>", 0, 0, 100, 100);
        shape.font_size(20.0).bold(true);

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();

        assert_eq!(xml.matches("<a:p>").count(), 2);
        assert!(xml.contains("<a:t>Line one</a:t>"));
        assert!(xml.contains("<a:t>Line &lt;two&gt;</a:t>"));
        assert!(xml.contains(r#"sz="2000""#));
        assert!(xml.contains(r#"b="1""#));
        assert!(xml.contains(r#"txBox="1""#));
        assert_eq!(shape.text().as_deref(), Some("Line one\nLine <two>"));
    }

    #[test]
    fn test_text_format_replaces_builder_settings() {
        let mut shape = MutableShape::new_text_box(4, "Caption", 0, 0, 100, 100);
        shape.bold(true).set_text_format(TextFormat {
            font: Some("Arial".to_string()),
            italic: Some(true),
            ..TextFormat::default()
        });

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains(r#"<a:latin typeface="Arial"/>"#));
        assert!(xml.contains(r#"i="1""#));
        assert!(!xml.contains(r#"b="1""#));
    }

    #[test]
    fn test_empty_paragraph_has_no_run() {
        let mut xml = String::new();
        write_paragraphs(&mut xml, &[], &TextFormat::default()).unwrap();
        assert_eq!(xml, r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
    }

    #[test]
    fn test_picture_requires_rel_id() {
        let shape = MutableShape::new_picture(
            5,
            vec![0x89, b'P', b'N', b'G'],
            ImageFormat::Png,
            914400,
            1371600,
            7315200,
            5029200,
            "Creative concept 1".to_string(),
        );
        assert!(shape.is_picture());

        let mut xml = String::new();
        assert!(shape.to_xml(&mut xml, None).is_err());

        let mut xml = String::new();
        shape.to_xml(&mut xml, Some("rId2")).unwrap();
        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(xml.contains(r#"<a:off x="914400" y="1371600"/>"#));
        assert!(xml.contains(r#"<a:ext cx="7315200" cy="5029200"/>"#));
        assert!(xml.contains(r#"descr="Creative concept 1""#));
    }
}
