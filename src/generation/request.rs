//! Request body for a text + image generation call.
//!
//! Only the body is modelled; sending it is the caller's job.
use serde::Serialize;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// A single-turn request asking for both text and images.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![RequestContent {
                role: Some("user".to_string()),
                parts: vec![RequestPart {
                    text: prompt.into(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
                temperature: Some(DEFAULT_TEMPERATURE),
            },
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.generation_config.temperature = temperature;
        self
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> crate::common::Result<String> {
        serde_json::to_string(self)
            .map_err(|e| crate::common::Error::Serialization(e.to_string()))
    }
}
