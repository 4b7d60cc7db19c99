//! Provider response model: text parts and inline base64 image parts.
use crate::common::{Error, Result};
use crate::ooxml::pptx::ImageFormat;
use crate::strategy::VisualAsset;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

/// What a response contributes to a deck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutputs {
    /// Text parts concatenated in order
    pub strategy_text: String,
    /// Decoded images in part order
    pub images: Vec<VisualAsset>,
}

impl GenerationResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Split the first candidate into strategy text and images.
    ///
    /// Text parts are concatenated as-is. Inline parts with a non-image MIME
    /// type are skipped; image parts whose bytes are not a supported image
    /// fail with [`Error::UnsupportedImage`].
    pub fn into_outputs(self) -> Result<GenerationOutputs> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("response has no candidates".to_string()))?;

        let mut outputs = GenerationOutputs::default();
        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

        for (index, part) in parts.into_iter().enumerate() {
            if let Some(text) = part.text {
                outputs.strategy_text.push_str(&text);
            } else if let Some(inline) = part.inline_data {
                if !inline.mime_type.starts_with("image/") {
                    warn!(part = index, mime_type = %inline.mime_type, "skipping non-image inline part");
                    continue;
                }

                let bytes = STANDARD.decode(inline.data.trim())?;
                let asset = VisualAsset::from_bytes(bytes)?;
                if ImageFormat::from_mime_type(&inline.mime_type) != Some(asset.format()) {
                    debug!(
                        part = index,
                        declared = %inline.mime_type,
                        detected = asset.format().mime_type(),
                        "image bytes disagree with declared MIME type"
                    );
                }
                outputs.images.push(asset);
            }
        }

        if outputs.strategy_text.is_empty() && outputs.images.is_empty() {
            warn!(finish_reason = ?candidate.finish_reason, "response candidate has no usable parts");
        }

        Ok(outputs)
    }
}
