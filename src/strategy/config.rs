//! Deck configuration: fixed strings, slide size and the visual slide geometry.
//!
//! All fields have defaults, so a config file only lists what it overrides:
//!
//! ```yaml
//! title_suffix: Go-to-Market Plan
//! caption_prefix: Banner concept
//! picture_box: { x: 457200, y: 1371600, width: 8229600, height: 5029200 }
//! ```
use crate::common::unit::{emu_to_inches, inches_to_emu};
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Position and size of a shape, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl BoxGeometry {
    /// Build a box from inch measurements.
    pub fn from_inches(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: inches_to_emu(x),
            y: inches_to_emu(y),
            width: inches_to_emu(width),
            height: inches_to_emu(height),
        }
    }

    /// Right edge in EMUs.
    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    /// Bottom edge in EMUs.
    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    /// Title slide heading
    pub title: f64,
    /// Section slide heading
    pub heading: f64,
    /// Section slide body
    pub body: f64,
    /// Visual slide caption
    pub caption: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 40.0,
            heading: 28.0,
            body: 16.0,
            caption: 24.0,
        }
    }
}

/// Strings and geometry used when rendering a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Appended to the product name on the title slide
    pub title_suffix: String,
    /// Label before the client name on the title slide
    pub client_label: String,
    /// Second subtitle line on the title slide
    pub attribution: String,
    /// Caption text before the 1-based image number
    pub caption_prefix: String,
    /// Author recorded in the document properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Slide width in EMUs
    pub slide_width: i64,
    /// Slide height in EMUs
    pub slide_height: i64,
    /// Caption text box on visual slides
    pub caption_box: BoxGeometry,
    /// Picture bounding box on visual slides; images are stretched to fill it
    pub picture_box: BoxGeometry,
    /// Font sizes
    pub font_sizes: FontSizes,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            title_suffix: "Strategy Proposal".to_string(),
            client_label: "Client".to_string(),
            attribution: "Strategic Planning & Creative Visualizer".to_string(),
            caption_prefix: "Creative concept".to_string(),
            author: None,
            slide_width: inches_to_emu(10.0),
            slide_height: inches_to_emu(7.5),
            caption_box: BoxGeometry::from_inches(0.5, 0.3, 9.0, 0.8),
            picture_box: BoxGeometry::from_inches(1.0, 1.5, 8.0, 5.5),
            font_sizes: FontSizes::default(),
        }
    }
}

impl DeckConfig {
    /// Parse and validate a YAML config.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Failed to parse JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; `.json` files are read as JSON, anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Serialize to YAML, e.g. to dump the defaults as a starting point.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize YAML: {}", e)))
    }

    /// Check sizes are positive and boxes lie on the slide.
    pub fn validate(&self) -> Result<()> {
        if self.slide_width <= 0 || self.slide_height <= 0 {
            return Err(Error::Config(format!(
                "slide size must be positive, got {}x{}",
                self.slide_width, self.slide_height
            )));
        }

        for (name, bounds) in [
            ("caption_box", &self.caption_box),
            ("picture_box", &self.picture_box),
        ] {
            if bounds.width <= 0 || bounds.height <= 0 {
                return Err(Error::Config(format!("{} must have a positive size", name)));
            }
            if bounds.x < 0
                || bounds.y < 0
                || bounds.right() > self.slide_width
                || bounds.bottom() > self.slide_height
            {
                return Err(Error::Config(format!(
                    "{} extends past the {:.2}\" x {:.2}\" slide",
                    name,
                    emu_to_inches(self.slide_width),
                    emu_to_inches(self.slide_height)
                )));
            }
        }

        let sizes = &self.font_sizes;
        if [sizes.title, sizes.heading, sizes.body, sizes.caption]
            .iter()
            .any(|size| !(size.is_finite() && *size > 0.0))
        {
            return Err(Error::Config("font sizes must be positive".to_string()));
        }

        Ok(())
    }
}
