//! Strategy brief: the form fields a deck is generated from.
use super::request::GenerationRequest;
use crate::strategy::DeckSpec;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Inputs for one strategy + visual generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyBrief {
    pub client_name: String,
    pub product_name: String,
    /// Target persona description
    pub target_audience: String,
    /// Extra direction on tone or emphasis
    #[serde(default)]
    pub notes: String,
}

impl StrategyBrief {
    pub fn new(
        client_name: impl Into<String>,
        product_name: impl Into<String>,
        target_audience: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            product_name: product_name.into(),
            target_audience: target_audience.into(),
            notes: notes.into(),
        }
    }

    /// Build the prompt asking for numbered strategy sections and banner visuals.
    ///
    /// The numbered output structure is what [`split_sections`] expects.
    ///
    /// [`split_sections`]: crate::strategy::split_sections
    pub fn prompt(&self) -> String {
        let mut prompt = String::with_capacity(1024);

        prompt.push_str(
            "You are a senior strategy product manager and creative director.\n\
             Using the information below, write a strategy proposal ready to present to \
             senior management, and generate banner advertisement visuals that embody it.\n\n",
        );

        // Writing to a String cannot fail
        let _ = writeln!(prompt, "Client: {}", self.client_name);
        let _ = writeln!(prompt, "Product: {}", self.product_name);
        let _ = writeln!(prompt, "Target audience: {}", self.target_audience);
        if !self.notes.trim().is_empty() {
            let _ = writeln!(prompt, "Direction: {}", self.notes.trim());
        }

        prompt.push_str(
            "\nOutput structure:\n\
             Strategy section. Start each item on its own line with its number \
             (\"1. \", \"2. \", ...), followed by its details on the next lines:\n\
             1. Current situation (As-is)\n\
             2. Challenges (To-be)\n\
             3. Strategy concept (Why this?)\n\
             4. Tactics\n\
             5. Technical advantage\n\
             6. ROI simulation\n\
             Visual section: generate high-quality banner advertisement concept images \
             that embody the strategy above.\n\n",
        );

        let _ = write!(
            prompt,
            "Keep the strategy logical, and render the images with a premium touch \
             that does not damage the {} brand.",
            self.client_name
        );

        prompt
    }

    /// Request body carrying [`prompt`](Self::prompt) with text and image output enabled.
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new(self.prompt())
    }

    /// Client and product for the deck built from this brief.
    pub fn deck_spec(&self) -> DeckSpec {
        DeckSpec::new(self.client_name.clone(), self.product_name.clone())
    }
}
