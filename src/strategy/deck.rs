//! In-memory deck plan: which slides a strategy produces, before any XML.
use super::asset::VisualAsset;
use super::config::DeckConfig;
use super::section::{Section, split_sections};
use crate::common::Result;
use tracing::debug;

/// Client and product a deck is prepared for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSpec {
    pub client_name: String,
    pub product_name: String,
}

impl DeckSpec {
    pub fn new(client_name: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            product_name: product_name.into(),
        }
    }

    /// Download name: `<client>_<product>_strategy.pptx`.
    ///
    /// Characters that are invalid in file names become `_`, and runs of
    /// whitespace collapse to a single `_`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratdeck::strategy::DeckSpec;
    /// let spec = DeckSpec::new("Acme Motors", "EV/SUV  2030");
    /// assert_eq!(spec.suggested_file_name(), "Acme_Motors_EV_SUV_2030_strategy.pptx");
    /// ```
    pub fn suggested_file_name(&self) -> String {
        format!(
            "{}_{}_strategy.pptx",
            sanitize_file_component(&self.client_name),
            sanitize_file_component(&self.product_name)
        )
    }
}

fn sanitize_file_component(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_gap = false;
    for c in name.trim().chars() {
        if c.is_whitespace() {
            pending_gap = true;
            continue;
        }
        if pending_gap {
            out.push('_');
            pending_gap = false;
        }
        let invalid = c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
        out.push(if invalid { '_' } else { c });
    }
    out
}

/// One planned slide.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckSlide<'a> {
    /// Opening slide with the product heading and client subtitle lines.
    Title { heading: String, subtitle: Vec<String> },
    /// One strategy section.
    Section(Section),
    /// One visual with its caption.
    Image {
        caption: String,
        asset: &'a VisualAsset,
    },
}

/// Slide kind without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideKind {
    Title,
    Section,
    Image,
}

impl DeckSlide<'_> {
    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Title { .. } => SlideKind::Title,
            Self::Section(_) => SlideKind::Section,
            Self::Image { .. } => SlideKind::Image,
        }
    }

    /// Heading text, or the caption for image slides.
    pub fn heading(&self) -> &str {
        match self {
            Self::Title { heading, .. } => heading,
            Self::Section(section) => &section.heading,
            Self::Image { caption, .. } => caption,
        }
    }
}

/// Ordered slides of one deck: title, then sections, then images.
///
/// Borrows the visual assets it places; build a fresh plan per deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck<'a> {
    spec: DeckSpec,
    slides: Vec<DeckSlide<'a>>,
}

impl<'a> Deck<'a> {
    /// Plan a deck. Never fails; malformed text only yields fewer sections.
    pub fn plan(
        strategy_text: &str,
        images: &'a [VisualAsset],
        spec: DeckSpec,
        config: &DeckConfig,
    ) -> Self {
        let sections = split_sections(strategy_text);
        let mut slides = Vec::with_capacity(1 + sections.len() + images.len());

        slides.push(DeckSlide::Title {
            heading: format!("{} {}", spec.product_name, config.title_suffix),
            subtitle: vec![
                format!("{}: {}", config.client_label, spec.client_name),
                config.attribution.clone(),
            ],
        });
        slides.extend(sections.into_iter().map(DeckSlide::Section));
        slides.extend(images.iter().enumerate().map(|(index, asset)| DeckSlide::Image {
            caption: format!("{} {}", config.caption_prefix, index + 1),
            asset,
        }));

        debug!(
            sections = slides.len() - 1 - images.len(),
            images = images.len(),
            "planned deck"
        );

        Self { spec, slides }
    }

    pub fn spec(&self) -> &DeckSpec {
        &self.spec
    }

    pub fn slides(&self) -> &[DeckSlide<'a>] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Number of slides of the given kind.
    pub fn count_of(&self, kind: SlideKind) -> usize {
        self.slides.iter().filter(|slide| slide.kind() == kind).count()
    }

    /// Render the plan to `.pptx` bytes.
    pub fn to_pptx(&self, config: &DeckConfig) -> Result<Vec<u8>> {
        super::assembler::render(self, config)?
            .to_bytes()
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn assets(n: usize) -> Vec<VisualAsset> {
        (0..n)
            .map(|_| VisualAsset::from_bytes(PNG_MAGIC.to_vec()).unwrap())
            .collect()
    }

    #[test]
    fn test_title_slide_only() {
        let deck = Deck::plan("", &[], DeckSpec::new("C", "P"), &DeckConfig::default());
        assert_eq!(deck.slide_count(), 1);
        assert_eq!(
            deck.slides()[0],
            DeckSlide::Title {
                heading: "P Strategy Proposal".to_string(),
                subtitle: vec![
                    "Client: C".to_string(),
                    "Strategic Planning & Creative Visualizer".to_string()
                ],
            }
        );
    }

    #[test]
    fn test_slide_order_and_counts() {
        let images = assets(2);
        let deck = Deck::plan(
            "1. A\nx\n2. B\ny",
            &images,
            DeckSpec::new("C", "P"),
            &DeckConfig::default(),
        );
        let kinds: Vec<SlideKind> = deck.slides().iter().map(DeckSlide::kind).collect();
        assert_eq!(
            kinds,
            vec![
                SlideKind::Title,
                SlideKind::Section,
                SlideKind::Section,
                SlideKind::Image,
                SlideKind::Image
            ]
        );
        assert_eq!(deck.count_of(SlideKind::Section), 2);
        assert_eq!(deck.slides()[3].heading(), "Creative concept 1");
        assert_eq!(deck.slides()[4].heading(), "Creative concept 2");
    }

    #[test]
    fn test_config_strings() {
        let config = DeckConfig {
            title_suffix: "Launch Plan".to_string(),
            client_label: "Account".to_string(),
            caption_prefix: "Banner".to_string(),
            ..DeckConfig::default()
        };
        let images = assets(1);
        let deck = Deck::plan("", &images, DeckSpec::new("Acme", "Rover"), &config);
        assert_eq!(deck.slides()[0].heading(), "Rover Launch Plan");
        match &deck.slides()[0] {
            DeckSlide::Title { subtitle, .. } => assert_eq!(subtitle[0], "Account: Acme"),
            other => panic!("unexpected slide {other:?}"),
        }
        assert_eq!(deck.slides()[1].heading(), "Banner 1");
    }

    #[test]
    fn test_suggested_file_name() {
        assert_eq!(
            DeckSpec::new("大手自動車メーカー", "新型EV SUV").suggested_file_name(),
            "大手自動車メーカー_新型EV_SUV_strategy.pptx"
        );
        assert_eq!(
            DeckSpec::new(" A:B ", "x?y\tz").suggested_file_name(),
            "A_B_x_y_z_strategy.pptx"
        );
    }
}
