//! Presentation builder: slides in, OPC package out.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, namespace as ns, relationship_type as rt};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{OpcPackage, PackURI, Part};
use crate::ooxml::pptx::layout::SlideLayout;
use crate::ooxml::pptx::properties::DocumentProperties;
use crate::ooxml::pptx::template;
use chrono::{DateTime, Utc};
use std::fmt::Write as FmtWrite;
use std::path::Path;
use tracing::debug;

use super::relmap::{MediaStore, PictureRels};
use super::slide::MutableSlide;

const PRESENTATION_URI: &str = "/ppt/presentation.xml";
const SLIDE_MASTER_URI: &str = "/ppt/slideMasters/slideMaster1.xml";
const THEME_URI: &str = "/ppt/theme/theme1.xml";
const PRES_PROPS_URI: &str = "/ppt/presProps.xml";
const VIEW_PROPS_URI: &str = "/ppt/viewProps.xml";
const TABLE_STYLES_URI: &str = "/ppt/tableStyles.xml";
const CORE_PROPS_URI: &str = "/docProps/core.xml";
const APP_PROPS_URI: &str = "/docProps/app.xml";

/// First slide id PowerPoint accepts in `p:sldId/@id`.
const FIRST_SLIDE_ID: u32 = 256;

fn pack_uri(uri: impl Into<String>) -> Result<PackURI> {
    PackURI::new(uri).map_err(|e| OoxmlError::Opc(OpcError::InvalidPackUri(e)))
}

/// A mutable PowerPoint presentation for writing.
///
/// Provides methods to add slides, set dimensions, and configure document properties.
#[derive(Debug)]
pub struct MutablePresentation {
    /// Slides in the presentation
    pub(crate) slides: Vec<MutableSlide>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
    /// Core document properties
    properties: DocumentProperties,
}

impl MutablePresentation {
    /// Create a new empty presentation with default dimensions.
    ///
    /// Default size is 10" x 7.5" (standard 4:3 aspect ratio).
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_width: 9144000,  // 10 inches
            slide_height: 6858000, // 7.5 inches
            properties: DocumentProperties::default(),
        }
    }

    /// Add a new slide based on `layout` and return it.
    pub fn add_slide(&mut self, layout: SlideLayout) -> &mut MutableSlide {
        let index = self.slides.len();
        let slide_id = FIRST_SLIDE_ID + index as u32;
        self.slides.push(MutableSlide::new(slide_id, layout));
        &mut self.slides[index]
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get a slide by index (0-based).
    pub fn slide(&self, index: usize) -> Option<&MutableSlide> {
        self.slides.get(index)
    }

    /// Get a mutable reference to a slide by index (0-based).
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut MutableSlide> {
        self.slides.get_mut(index)
    }

    /// Iterate over the slides in order.
    pub fn slides(&self) -> impl Iterator<Item = &MutableSlide> {
        self.slides.iter()
    }

    /// Get the slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    /// Set the slide width in EMUs.
    pub fn set_slide_width(&mut self, width: i64) {
        self.slide_width = width;
    }

    /// Get the slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Set the slide height in EMUs.
    pub fn set_slide_height(&mut self, height: i64) {
        self.slide_height = height;
    }

    /// Get the document properties.
    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    /// Set the document title stored in the core properties.
    pub fn set_title(&mut self, title: &str) {
        self.properties.title = Some(title.to_string());
    }

    /// Set the document author stored in the core properties.
    pub fn set_creator(&mut self, creator: &str) {
        self.properties.creator = Some(creator.to_string());
    }

    /// Override the creation timestamp (defaults to the time of construction).
    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.properties.created = created;
    }

    /// Generate presentation.xml content with actual relationship IDs.
    ///
    /// # Arguments
    /// * `master_rel_id` - Relationship ID of the slide master
    /// * `slide_rel_ids` - Relationship IDs for slides, in slide order
    pub(crate) fn generate_presentation_xml_with_rels(
        &self,
        master_rel_id: &str,
        slide_rel_ids: &[String],
    ) -> Result<String> {
        if slide_rel_ids.len() != self.slides.len() {
            return Err(OoxmlError::Xml(format!(
                "expected {} slide relationship IDs, got {}",
                self.slides.len(),
                slide_rel_ids.len()
            )));
        }

        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
            ns::DML_MAIN,
            ns::OFC_RELATIONSHIPS,
            ns::PML_MAIN
        )?;

        // Write slide master ID list
        xml.push_str("<p:sldMasterIdLst>");
        write!(
            xml,
            r#"<p:sldMasterId id="2147483648" r:id="{}"/>"#,
            master_rel_id
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("</p:sldMasterIdLst>");

        // Write slide ID list
        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        // Write slide size
        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        xml.push_str("<p:notesSz cx=\"6858000\" cy=\"9144000\"/>");
        xml.push_str("</p:presentation>");

        Ok(xml)
    }

    /// Build the OPC package for this presentation.
    ///
    /// Parts are added in a fixed order, so identical presentations produce
    /// identically ordered packages.
    pub fn to_package(&self) -> Result<OpcPackage> {
        let mut pkg = OpcPackage::new();

        let pres_uri = pack_uri(PRESENTATION_URI)?;
        let master_uri = pack_uri(SLIDE_MASTER_URI)?;
        let theme_uri = pack_uri(THEME_URI)?;

        // Content is written once every rId is known
        pkg.add_part(Part::new(
            pres_uri.clone(),
            ct::PML_PRESENTATION_MAIN,
            Vec::new(),
        ))?;

        // Master first relates to its layouts (rId1..rId3), then to the theme
        let mut master = Part::xml(
            master_uri.clone(),
            ct::PML_SLIDE_MASTER,
            template::default_slide_master_xml(),
        );
        let mut layout_parts = Vec::with_capacity(SlideLayout::ALL.len());
        for layout in SlideLayout::ALL {
            let layout_uri = pack_uri(layout.partname())?;
            master.relate_to(&layout_uri, rt::SLIDE_LAYOUT);
            let mut part = Part::xml(
                layout_uri,
                ct::PML_SLIDE_LAYOUT,
                template::slide_layout_xml(layout),
            );
            part.relate_to(&master_uri, rt::SLIDE_MASTER);
            layout_parts.push(part);
        }
        master.relate_to(&theme_uri, rt::THEME);
        pkg.add_part(master)?;
        for part in layout_parts {
            pkg.add_part(part)?;
        }
        pkg.add_part(Part::xml(
            theme_uri.clone(),
            ct::OFC_THEME,
            template::default_theme_xml(),
        ))?;

        let master_rel_id = pkg.relate_parts(&pres_uri, &master_uri, rt::SLIDE_MASTER)?;

        // Slides and their media
        let mut media = MediaStore::new();
        let mut slide_rel_ids = Vec::with_capacity(self.slides.len());
        for slide in &self.slides {
            let slide_uri = pkg.next_partname("/ppt/slides/slide%d.xml")?;
            let mut part = Part::new(slide_uri.clone(), ct::PML_SLIDE, Vec::new());
            part.relate_to(&pack_uri(slide.layout().partname())?, rt::SLIDE_LAYOUT);

            let mut picture_rels = PictureRels::new();
            for (shape_id, data, format) in slide.collect_images() {
                let media_uri = match media.get(data) {
                    Some(uri) => uri.clone(),
                    None => {
                        let uri = pack_uri(format!(
                            "/ppt/media/image{}.{}",
                            media.len() + 1,
                            format.extension()
                        ))?;
                        pkg.add_part(Part::new(uri.clone(), format.mime_type(), data.to_vec()))?;
                        media.insert(data, uri.clone());
                        uri
                    },
                };
                picture_rels.insert(shape_id, part.relate_to(&media_uri, rt::IMAGE));
            }

            part.set_blob(slide.to_xml_with_rels(&picture_rels)?.into_bytes());
            pkg.add_part(part)?;
            slide_rel_ids.push(pkg.relate_parts(&pres_uri, &slide_uri, rt::SLIDE)?);
        }

        // Presentation-level property parts
        for (uri, content_type, reltype, xml) in [
            (
                PRES_PROPS_URI,
                ct::PML_PRES_PROPS,
                rt::PRES_PROPS,
                template::default_pres_props_xml(),
            ),
            (
                VIEW_PROPS_URI,
                ct::PML_VIEW_PROPS,
                rt::VIEW_PROPS,
                template::default_view_props_xml(),
            ),
            (
                TABLE_STYLES_URI,
                ct::PML_TABLE_STYLES,
                rt::TABLE_STYLES,
                template::default_table_styles_xml(),
            ),
        ] {
            let part_uri = pack_uri(uri)?;
            pkg.add_part(Part::xml(part_uri.clone(), content_type, xml))?;
            pkg.relate_parts(&pres_uri, &part_uri, reltype)?;
        }
        pkg.relate_parts(&pres_uri, &theme_uri, rt::THEME)?;

        let pres_xml = self.generate_presentation_xml_with_rels(&master_rel_id, &slide_rel_ids)?;
        pkg.get_part_mut(&pres_uri)?.set_blob(pres_xml.into_bytes());

        // Document properties
        let core_uri = pack_uri(CORE_PROPS_URI)?;
        let app_uri = pack_uri(APP_PROPS_URI)?;
        pkg.add_part(Part::xml(
            core_uri.clone(),
            ct::OPC_CORE_PROPERTIES,
            self.properties.to_core_xml()?,
        ))?;
        pkg.add_part(Part::xml(
            app_uri.clone(),
            ct::OFC_EXTENDED_PROPERTIES,
            self.properties.to_app_xml(self.slides.len())?,
        ))?;

        pkg.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);
        pkg.relate_to(&core_uri, rt::CORE_PROPERTIES);
        pkg.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);

        debug!(
            slides = self.slides.len(),
            media = media.len(),
            parts = pkg.part_count(),
            "built presentation package"
        );

        Ok(pkg)
    }

    /// Serialize the presentation to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_package()?.to_bytes()?)
    }

    /// Write the presentation to a `.pptx` file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for MutablePresentation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn member(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_create_presentation() {
        let pres = MutablePresentation::new();
        assert_eq!(pres.slide_count(), 0);
        assert_eq!(pres.slide_width(), 9144000);
        assert_eq!(pres.slide_height(), 6858000);
    }

    #[test]
    fn test_add_slide() {
        let mut pres = MutablePresentation::new();
        let slide = pres.add_slide(SlideLayout::Title);
        assert_eq!(slide.slide_id(), 256);
        assert_eq!(pres.add_slide(SlideLayout::Blank).slide_id(), 257);
        assert_eq!(pres.slide_count(), 2);
    }

    #[test]
    fn test_edit_slide_and_properties() {
        let mut pres = MutablePresentation::new();
        pres.add_slide(SlideLayout::TitleAndContent);
        pres.slide_mut(0).unwrap().set_title("Edited");
        assert!(pres.slide_mut(1).is_none());

        let created = chrono::DateTime::parse_from_rfc3339("2024-05-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        pres.set_creator("Planning");
        pres.set_created(created);

        let bytes = pres.to_bytes().unwrap();
        assert!(member(&bytes, "ppt/slides/slide1.xml").contains("<a:t>Edited</a:t>"));
        let core = member(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:creator>Planning</dc:creator>"));
        assert!(core.contains("2024-05-01T09:30:00Z"));
    }

    #[test]
    fn test_presentation_xml_requires_all_rel_ids() {
        let mut pres = MutablePresentation::new();
        pres.add_slide(SlideLayout::Blank);
        assert!(pres.generate_presentation_xml_with_rels("rId1", &[]).is_err());

        let xml = pres
            .generate_presentation_xml_with_rels("rId1", &["rId2".to_string()])
            .unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
    }

    #[test]
    fn test_package_layout() {
        let mut pres = MutablePresentation::new();
        pres.set_title("Deck");
        pres.add_slide(SlideLayout::Title).set_title("Deck");
        let slide = pres.add_slide(SlideLayout::Blank);
        slide.add_picture_from_bytes(PNG_MAGIC.to_vec(), 0, 0, 10, 10, "").unwrap();

        let pkg = pres.to_package().unwrap();
        let names: Vec<&str> = pkg.iter_parts().map(|p| p.partname().as_str()).collect();
        assert_eq!(
            names,
            vec![
                "/ppt/presentation.xml",
                "/ppt/slideMasters/slideMaster1.xml",
                "/ppt/slideLayouts/slideLayout1.xml",
                "/ppt/slideLayouts/slideLayout2.xml",
                "/ppt/slideLayouts/slideLayout3.xml",
                "/ppt/theme/theme1.xml",
                "/ppt/slides/slide1.xml",
                "/ppt/media/image1.png",
                "/ppt/slides/slide2.xml",
                "/ppt/presProps.xml",
                "/ppt/viewProps.xml",
                "/ppt/tableStyles.xml",
                "/docProps/core.xml",
                "/docProps/app.xml",
            ]
        );

        let slide2 = pkg
            .get_part(&PackURI::new("/ppt/slides/slide2.xml").unwrap())
            .unwrap();
        let layout_rel = slide2.rels().get("rId1").unwrap();
        assert_eq!(layout_rel.target_ref(), "../slideLayouts/slideLayout3.xml");
        assert_eq!(slide2.rels().get("rId2").unwrap().target_ref(), "../media/image1.png");

        let master = pkg.get_part(&PackURI::new(SLIDE_MASTER_URI).unwrap()).unwrap();
        assert_eq!(master.rels().get("rId4").unwrap().target_ref(), "../theme/theme1.xml");
    }

    #[test]
    fn test_identical_images_share_media() {
        let mut pres = MutablePresentation::new();
        for _ in 0..2 {
            pres.add_slide(SlideLayout::Blank)
                .add_picture_from_bytes(PNG_MAGIC.to_vec(), 0, 0, 10, 10, "")
                .unwrap();
        }
        let mut other = PNG_MAGIC.to_vec();
        other.push(0);
        pres.add_slide(SlideLayout::Blank)
            .add_picture_from_bytes(other, 0, 0, 10, 10, "")
            .unwrap();

        let pkg = pres.to_package().unwrap();
        let media: Vec<&str> = pkg
            .iter_parts()
            .map(|p| p.partname().as_str())
            .filter(|name| name.starts_with("/ppt/media/"))
            .collect();
        assert_eq!(media, vec!["/ppt/media/image1.png", "/ppt/media/image2.png"]);

        let slide2 = pkg
            .get_part(&PackURI::new("/ppt/slides/slide2.xml").unwrap())
            .unwrap();
        assert_eq!(slide2.rels().get("rId2").unwrap().target_ref(), "../media/image1.png");
    }

    #[test]
    fn test_to_bytes_members() {
        let mut pres = MutablePresentation::new();
        pres.add_slide(SlideLayout::TitleAndContent).set_title("A & B");

        let bytes = pres.to_bytes().unwrap();
        let pres_xml = member(&bytes, "ppt/presentation.xml");
        assert!(pres_xml.contains(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#));
        assert!(pres_xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));

        let slide_xml = member(&bytes, "ppt/slides/slide1.xml");
        assert!(slide_xml.contains("<a:t>A &amp; B</a:t>"));

        let content_types = member(&bytes, "[Content_Types].xml");
        assert!(content_types.contains(r#"PartName="/ppt/slides/slide1.xml""#));
        assert!(member(&bytes, "docProps/app.xml").contains("<Slides>1</Slides>"));
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");

        let mut pres = MutablePresentation::new();
        pres.add_slide(SlideLayout::Title).set_title("Saved");
        pres.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(member(&bytes, "ppt/slides/slide1.xml").contains("Saved"));
    }
}
