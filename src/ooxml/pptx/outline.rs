//! Read a written deck back into a structural outline.
//!
//! The outline follows the presentation's slide list through its
//! relationships and records, per slide, the layout, placeholder text, free
//! text boxes and pictures. It understands the markup produced by
//! [`MutablePresentation`](super::MutablePresentation); foreign decks are
//! read on a best-effort basis.
use crate::common::xml::{resolve_entity, unescape_xml};
use crate::common::{Error, Result as CrateResult};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::packuri::PACKAGE_URI;
use crate::ooxml::opc::{PackURI, PackageReader, Relationships};
use crate::ooxml::pptx::layout::SlideLayout;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Outline of a whole deck.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckOutline {
    /// Slide width in EMUs
    pub slide_width: i64,
    /// Slide height in EMUs
    pub slide_height: i64,
    /// Title from the core document properties
    pub title: Option<String>,
    /// Slides in presentation order
    pub slides: Vec<SlideOutline>,
}

/// Outline of one slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideOutline {
    /// Layout, when the slide uses one of the known layouts
    pub layout: Option<SlideLayout>,
    /// Text of the title placeholder
    pub title: Option<String>,
    /// Paragraphs of the subtitle or body placeholder
    pub body: Option<Vec<String>>,
    /// Text of each free text box, paragraphs joined with `\n`
    pub text_boxes: Vec<String>,
    /// Pictures in shape order
    pub pictures: Vec<PictureOutline>,
}

/// A picture placed on a slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PictureOutline {
    /// Partname of the embedded media part
    pub media: String,
    /// Bytes of the media part
    pub data: Vec<u8>,
    /// Alternative text
    pub description: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl DeckOutline {
    /// Read an outline from `.pptx` bytes.
    ///
    /// Any failure to read the package is reported as [`Error::InvalidPackage`].
    pub fn from_bytes(data: &[u8]) -> CrateResult<Self> {
        Self::read(data).map_err(|e| Error::InvalidPackage(e.to_string()))
    }

    fn read(data: &[u8]) -> Result<Self> {
        let mut reader = PackageReader::new(data)?;

        let pres_uri = reader.main_document_partname()?;
        let pres_rels = reader.rels_for(&pres_uri)?;
        let pres = parse_presentation(&reader.blob(&pres_uri)?)?;

        let mut slides = Vec::with_capacity(pres.slide_rel_ids.len());
        for r_id in &pres.slide_rel_ids {
            let slide_uri = pres_rels.target_partname(r_id)?;
            slides.push(read_slide(&mut reader, &slide_uri)?);
        }

        Ok(Self {
            slide_width: pres.slide_width,
            slide_height: pres.slide_height,
            title: read_core_title(&mut reader)?,
            slides,
        })
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

impl SlideOutline {
    /// Body paragraphs joined with `\n`.
    pub fn body_text(&self) -> Option<String> {
        self.body.as_ref().map(|paragraphs| paragraphs.join("\n"))
    }

    /// Number of pictures on the slide.
    pub fn picture_count(&self) -> usize {
        self.pictures.len()
    }
}

fn read_slide(reader: &mut PackageReader<'_>, slide_uri: &PackURI) -> Result<SlideOutline> {
    let rels = reader.rels_for(slide_uri)?;
    let layout = layout_of(&rels)?;
    let parsed = parse_slide(&reader.blob(slide_uri)?)?;

    let mut pictures = Vec::with_capacity(parsed.pictures.len());
    for picture in parsed.pictures {
        let media_uri = rels.target_partname(&picture.r_id)?;
        pictures.push(PictureOutline {
            data: reader.blob(&media_uri)?,
            media: media_uri.as_str().to_string(),
            description: picture.description,
            x: picture.x,
            y: picture.y,
            width: picture.width,
            height: picture.height,
        });
    }

    Ok(SlideOutline {
        layout,
        title: parsed.title,
        body: parsed.body,
        text_boxes: parsed.text_boxes,
        pictures,
    })
}

fn layout_of(rels: &Relationships) -> Result<Option<SlideLayout>> {
    match rels.first_of_type(rt::SLIDE_LAYOUT) {
        Some(rel) => {
            let partname = rels.target_partname(rel.r_id())?;
            Ok(SlideLayout::from_partname(&partname))
        },
        None => Ok(None),
    }
}

fn read_core_title(reader: &mut PackageReader<'_>) -> Result<Option<String>> {
    let package_uri = PackURI::new(PACKAGE_URI).map_err(OoxmlError::Other)?;
    let package_rels = reader.rels_for(&package_uri)?;
    let Some(rel) = package_rels.first_of_type(rt::CORE_PROPERTIES) else {
        return Ok(None);
    };
    let core_uri = package_rels.target_partname(rel.r_id())?;
    let xml = reader.blob(&core_uri)?;

    let mut xml_reader = Reader::from_reader(&xml[..]);
    let mut buf = Vec::new();
    let mut in_title = false;
    let mut title: Option<String> = None;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"dc:title" => {
                in_title = true;
                title = Some(String::new());
            },
            Event::End(e) if e.name().as_ref() == b"dc:title" => in_title = false,
            Event::Text(e) if in_title => {
                if let Some(ref mut t) = title {
                    t.push_str(utf8(e.as_ref())?);
                }
            },
            Event::GeneralRef(e) if in_title => {
                if let Some(ref mut t) = title {
                    push_entity(t, utf8(e.as_ref())?);
                }
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(title)
}

struct ParsedPresentation {
    slide_rel_ids: Vec<String>,
    slide_width: i64,
    slide_height: i64,
}

fn parse_presentation(xml: &[u8]) -> Result<ParsedPresentation> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut parsed = ParsedPresentation {
        slide_rel_ids: Vec::new(),
        slide_width: 0,
        slide_height: 0,
    };

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"sldId" => {
                    let r_id = attr_value(&e, b"r:id")?
                        .ok_or_else(|| OoxmlError::Xml("p:sldId without r:id".to_string()))?;
                    parsed.slide_rel_ids.push(r_id);
                },
                b"sldSz" => {
                    parsed.slide_width = emu_attr(&e, b"cx")?;
                    parsed.slide_height = emu_attr(&e, b"cy")?;
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(parsed)
}

#[derive(Default)]
struct ParsedSlide {
    title: Option<String>,
    body: Option<Vec<String>>,
    text_boxes: Vec<String>,
    pictures: Vec<ParsedPicture>,
}

#[derive(Default)]
struct ParsedPicture {
    r_id: String,
    description: String,
    x: i64,
    y: i64,
    width: i64,
    height: i64,
}

/// Text shape being read: its placeholder type (if any) and paragraphs.
#[derive(Default)]
struct ShapeText {
    placeholder: Option<String>,
    paragraphs: Vec<String>,
    current: Option<String>,
}

/// Event-driven state while walking a slide's shape tree.
#[derive(Default)]
struct SlideParser {
    slide: ParsedSlide,
    shape: Option<ShapeText>,
    picture: Option<ParsedPicture>,
    in_text: bool,
}

impl SlideParser {
    fn open(&mut self, e: &BytesStart<'_>, is_empty: bool) -> Result<()> {
        match e.local_name().as_ref() {
            b"sp" if !is_empty => self.shape = Some(ShapeText::default()),
            b"ph" => {
                if let Some(ref mut shape) = self.shape {
                    // A placeholder without a type is a body placeholder
                    let ph_type = attr_value(e, b"type")?.unwrap_or_else(|| "body".to_string());
                    shape.placeholder = Some(ph_type);
                }
            },
            b"p" => {
                if let Some(ref mut shape) = self.shape {
                    if is_empty {
                        shape.paragraphs.push(String::new());
                    } else {
                        shape.current = Some(String::new());
                    }
                }
            },
            b"t" if !is_empty => self.in_text = true,
            b"pic" if !is_empty => self.picture = Some(ParsedPicture::default()),
            b"cNvPr" => {
                if let Some(ref mut picture) = self.picture {
                    picture.description = attr_value(e, b"descr")?.unwrap_or_default();
                }
            },
            b"blip" => {
                if let Some(ref mut picture) = self.picture {
                    picture.r_id = attr_value(e, b"r:embed")?.unwrap_or_default();
                }
            },
            b"off" => {
                if let Some(ref mut picture) = self.picture {
                    picture.x = emu_attr(e, b"x")?;
                    picture.y = emu_attr(e, b"y")?;
                }
            },
            b"ext" => {
                if let Some(ref mut picture) = self.picture {
                    picture.width = emu_attr(e, b"cx")?;
                    picture.height = emu_attr(e, b"cy")?;
                }
            },
            _ => {},
        }
        Ok(())
    }

    fn current_paragraph(&mut self) -> Option<&mut String> {
        if !self.in_text {
            return None;
        }
        self.shape.as_mut().and_then(|shape| shape.current.as_mut())
    }

    fn close(&mut self, local_name: &[u8]) -> Result<()> {
        match local_name {
            b"t" => self.in_text = false,
            b"p" => {
                if let Some(ref mut shape) = self.shape
                    && let Some(paragraph) = shape.current.take()
                {
                    shape.paragraphs.push(paragraph);
                }
            },
            b"sp" => {
                if let Some(shape) = self.shape.take() {
                    self.slide.finish_shape(shape);
                }
            },
            b"pic" => {
                if let Some(picture) = self.picture.take() {
                    if picture.r_id.is_empty() {
                        return Err(OoxmlError::Xml(
                            "p:pic without a:blip r:embed".to_string(),
                        ));
                    }
                    self.slide.pictures.push(picture);
                }
            },
            _ => {},
        }
        Ok(())
    }
}

impl ParsedSlide {
    fn finish_shape(&mut self, shape: ShapeText) {
        match shape.placeholder.as_deref() {
            Some("title") | Some("ctrTitle") => self.title = Some(shape.paragraphs.join("\n")),
            Some(_) => self.body = Some(shape.paragraphs),
            None => self.text_boxes.push(shape.paragraphs.join("\n")),
        }
    }
}

fn parse_slide(xml: &[u8]) -> Result<ParsedSlide> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut parser = SlideParser::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => parser.open(&e, false)?,
            Event::Empty(e) => parser.open(&e, true)?,
            Event::Text(e) => {
                if let Some(paragraph) = parser.current_paragraph() {
                    paragraph.push_str(utf8(e.as_ref())?);
                }
            },
            Event::GeneralRef(e) => {
                if let Some(paragraph) = parser.current_paragraph() {
                    push_entity(paragraph, utf8(e.as_ref())?);
                }
            },
            Event::End(e) => parser.close(e.local_name().as_ref())?,
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(parser.slide)
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| OoxmlError::Xml(e.to_string()))
}

fn push_entity(out: &mut String, name: &str) {
    match resolve_entity(name) {
        Some(c) => out.push(c),
        None => {
            out.push('&');
            out.push_str(name);
            out.push(';');
        },
    }
}

/// Value of the attribute whose qualified name is `key`, unescaped.
fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(unescape_xml(utf8(&attr.value)?)));
        }
    }
    Ok(None)
}

fn emu_attr(e: &BytesStart<'_>, key: &[u8]) -> Result<i64> {
    match attr_value(e, key)? {
        Some(value) => value
            .parse()
            .map_err(|_| OoxmlError::Xml(format!("invalid EMU value '{}'", value))),
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::{MutablePresentation, SlideLayout};

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_outline_of_written_deck() {
        let mut pres = MutablePresentation::new();
        pres.set_title("Widget <Pro> Strategy");

        let title = pres.add_slide(SlideLayout::Title);
        title.set_title("Widget <Pro> Strategy");
        title.set_body(["Client: R&D \"Labs\"", "Planning"]);

        let section = pres.add_slide(SlideLayout::TitleAndContent);
        section.set_title("1. Intro");
        section.set_body_text("Hello\n\nWorld");

        let visual = pres.add_slide(SlideLayout::Blank);
        visual.add_text_box("Creative concept 1", 457200, 274320, 8229600, 731520);
        visual
            .add_picture_from_bytes(PNG_MAGIC.to_vec(), 914400, 1371600, 7315200, 5029200, "v1")
            .unwrap();

        let outline = DeckOutline::from_bytes(&pres.to_bytes().unwrap()).unwrap();
        assert_eq!(outline.slide_count(), 3);
        assert_eq!(outline.slide_width, 9144000);
        assert_eq!(outline.title.as_deref(), Some("Widget <Pro> Strategy"));

        let s0 = &outline.slides[0];
        assert_eq!(s0.layout, Some(SlideLayout::Title));
        assert_eq!(s0.title.as_deref(), Some("Widget <Pro> Strategy"));
        assert_eq!(
            s0.body,
            Some(vec!["Client: R&D \"Labs\"".to_string(), "Planning".to_string()])
        );

        let s1 = &outline.slides[1];
        assert_eq!(s1.layout, Some(SlideLayout::TitleAndContent));
        assert_eq!(s1.body_text().as_deref(), Some("Hello\n\nWorld"));

        let s2 = &outline.slides[2];
        assert_eq!(s2.layout, Some(SlideLayout::Blank));
        assert_eq!(s2.title, None);
        assert_eq!(s2.text_boxes, vec!["Creative concept 1".to_string()]);
        assert_eq!(s2.picture_count(), 1);
        let picture = &s2.pictures[0];
        assert_eq!(picture.data, PNG_MAGIC.to_vec());
        assert_eq!(picture.media, "/ppt/media/image1.png");
        assert_eq!(
            (picture.x, picture.y, picture.width, picture.height),
            (914400, 1371600, 7315200, 5029200)
        );
        assert_eq!(picture.description, "v1");
    }

    #[test]
    fn test_not_a_package() {
        let result = DeckOutline::from_bytes(b"plain text, not a zip");
        assert!(matches!(result, Err(Error::InvalidPackage(_))));
    }

    #[test]
    fn test_parse_slide_entities() {
        let xml = br#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
            <p:sp><p:nvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
            <p:txBody><a:p><a:r><a:t>A &amp; B &#x3042;</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:nvSpPr><p:nvPr/></p:nvSpPr>
            <p:txBody><a:p/><a:p><a:r><a:t>x</a:t></a:r><a:r><a:t>y</a:t></a:r></a:p></p:txBody></p:sp>
            </p:spTree></p:cSld></p:sld>"#;
        let slide = parse_slide(xml).unwrap();
        assert_eq!(slide.title.as_deref(), Some("A & B あ"));
        assert_eq!(slide.text_boxes, vec!["\nxy".to_string()]);
        assert!(slide.body.is_none());
    }
}
