//! Document properties written to `docProps/core.xml` and `docProps/app.xml`.
//!
//! Core properties follow the Dublin Core vocabulary plus the OPC extensions;
//! extended properties carry the application name and slide count.
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as FmtWrite;

/// Name recorded as the producing application.
pub const APPLICATION_NAME: &str = "stratdeck";

/// Core document properties of a presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentProperties {
    /// Document title (`dc:title`)
    pub title: Option<String>,
    /// Author (`dc:creator`)
    pub creator: Option<String>,
    /// Creation and modification timestamp
    pub created: DateTime<Utc>,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            title: None,
            creator: None,
            created: Utc::now(),
        }
    }
}

impl DocumentProperties {
    /// Serialize the core properties part.
    pub fn to_core_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(768);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);

        if let Some(ref title) = self.title {
            write!(xml, "<dc:title>{}</dc:title>", escape_xml(title))?;
        }
        if let Some(ref creator) = self.creator {
            write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(creator))?;
        }
        xml.push_str("<cp:revision>1</cp:revision>");

        let timestamp = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        write!(
            xml,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{0}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{0}</dcterms:modified>"#,
            timestamp
        )?;

        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }

    /// Serialize the extended (application) properties part.
    pub fn to_app_xml(&self, slide_count: usize) -> Result<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
        write!(xml, "<Application>{}</Application>", APPLICATION_NAME)?;
        xml.push_str("<PresentationFormat>On-screen Show (4:3)</PresentationFormat>");
        write!(xml, "<Slides>{}</Slides>", slide_count)?;
        xml.push_str("<Notes>0</Notes>");
        xml.push_str("</Properties>");
        Ok(xml)
    }
}
