//! Encoded raster images placed on visual slides.
use crate::common::{Error, Result};
use crate::ooxml::pptx::ImageFormat;

/// An encoded image (PNG, JPEG, GIF, BMP or TIFF) ready to embed in a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualAsset {
    data: Vec<u8>,
    format: ImageFormat,
}

impl VisualAsset {
    /// Wrap encoded image bytes, detecting the format from the magic number.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratdeck::strategy::VisualAsset;
    /// use stratdeck::ooxml::pptx::ImageFormat;
    ///
    /// let asset = VisualAsset::from_bytes(b"GIF89a\x01\x00\x01\x00".to_vec())?;
    /// assert_eq!(asset.format(), ImageFormat::Gif);
    /// assert!(VisualAsset::from_bytes(b"<svg/>".to_vec()).is_err());
    /// # Ok::<(), stratdeck::Error>(())
    /// ```
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = ImageFormat::detect_from_bytes(&data).ok_or_else(|| {
            Error::UnsupportedImage(format!(
                "unrecognized image data ({} bytes)",
                data.len()
            ))
        })?;
        Ok(Self { data, format })
    }

    /// Read and wrap an image file.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data).map_err(|e| match e {
            Error::UnsupportedImage(msg) => {
                Error::UnsupportedImage(format!("{}: {}", path.as_ref().display(), msg))
            },
            other => other,
        })
    }

    /// Encode a decoded image as PNG.
    #[cfg(feature = "imgconv")]
    pub fn from_dynamic_image(image: &image::DynamicImage) -> Result<Self> {
        let mut data = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut data), image::ImageFormat::Png)
            .map_err(|e| Error::UnsupportedImage(e.to_string()))?;
        Ok(Self {
            data,
            format: ImageFormat::Png,
        })
    }

    /// Encoded bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Detected format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Consume the asset and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// File name for exporting the `index`-th (0-based) asset, e.g. `draft_0.png`.
    pub fn file_name(&self, index: usize) -> String {
        format!("draft_{}.{}", index, self.format.extension())
    }
}
