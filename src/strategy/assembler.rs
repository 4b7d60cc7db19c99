//! Strategy text and visuals in, `.pptx` bytes out.
use super::asset::VisualAsset;
use super::config::DeckConfig;
use super::deck::{Deck, DeckSlide, DeckSpec};
use crate::common::Result;
use crate::ooxml::pptx::{MutablePresentation, SlideLayout, TextFormat};
use tracing::debug;

/// Assemble a deck with the default configuration.
///
/// The deck holds a title slide, one slide per section of `strategy_text`,
/// and one captioned slide per image, in input order.
///
/// # Examples
///
/// ```
/// let bytes = stratdeck::assemble("1. Intro\nHello\n2. Plan\nWorld", &[], "Acme", "Rover")?;
/// let outline = stratdeck::DeckOutline::from_bytes(&bytes)?;
/// assert_eq!(outline.slide_count(), 3);
/// # Ok::<(), stratdeck::Error>(())
/// ```
pub fn assemble(
    strategy_text: &str,
    images: &[VisualAsset],
    client_name: &str,
    product_name: &str,
) -> Result<Vec<u8>> {
    DeckAssembler::new().assemble(strategy_text, images, client_name, product_name)
}

/// Renders decks with a fixed [`DeckConfig`].
#[derive(Debug, Clone, Default)]
pub struct DeckAssembler {
    config: DeckConfig,
}

impl DeckAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DeckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Plan a deck with this assembler's configuration.
    pub fn plan<'a>(
        &self,
        strategy_text: &str,
        images: &'a [VisualAsset],
        client_name: &str,
        product_name: &str,
    ) -> Deck<'a> {
        Deck::plan(
            strategy_text,
            images,
            DeckSpec::new(client_name, product_name),
            &self.config,
        )
    }

    /// Assemble a deck and serialize it to `.pptx` bytes.
    pub fn assemble(
        &self,
        strategy_text: &str,
        images: &[VisualAsset],
        client_name: &str,
        product_name: &str,
    ) -> Result<Vec<u8>> {
        let deck = self.plan(strategy_text, images, client_name, product_name);
        let bytes = deck.to_pptx(&self.config)?;
        debug!(
            slides = deck.slide_count(),
            bytes = bytes.len(),
            "assembled deck"
        );
        Ok(bytes)
    }

    /// Assemble a deck and write it to `path`.
    pub fn assemble_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
        strategy_text: &str,
        images: &[VisualAsset],
        client_name: &str,
        product_name: &str,
    ) -> Result<()> {
        let deck = self.plan(strategy_text, images, client_name, product_name);
        render(&deck, &self.config)?.save(path)?;
        Ok(())
    }
}

/// Lay out a planned deck on slides.
pub(crate) fn render(deck: &Deck<'_>, config: &DeckConfig) -> Result<MutablePresentation> {
    let sizes = &config.font_sizes;
    let mut pres = MutablePresentation::new();
    pres.set_slide_width(config.slide_width);
    pres.set_slide_height(config.slide_height);
    if let Some(author) = &config.author {
        pres.set_creator(author);
    }

    for planned in deck.slides() {
        match planned {
            DeckSlide::Title { heading, subtitle } => {
                pres.set_title(heading);
                let slide = pres.add_slide(SlideLayout::Title);
                slide.set_title(heading);
                slide.set_title_format(TextFormat::sized(sizes.title));
                slide.set_body(subtitle.iter().cloned());
            },
            DeckSlide::Section(section) => {
                let slide = pres.add_slide(SlideLayout::TitleAndContent);
                slide.set_title(&section.heading);
                slide.set_title_format(TextFormat::sized(sizes.heading));
                slide.set_body(section.body_lines().map(str::to_string));
                slide.set_body_format(TextFormat::sized(sizes.body));
            },
            DeckSlide::Image { caption, asset } => {
                let slide = pres.add_slide(SlideLayout::Blank);
                let caption_box = config.caption_box;
                slide
                    .add_text_box(
                        caption,
                        caption_box.x,
                        caption_box.y,
                        caption_box.width,
                        caption_box.height,
                    )
                    .font_size(sizes.caption)
                    .bold(true);

                let picture_box = config.picture_box;
                slide.add_picture(
                    asset.data().to_vec(),
                    asset.format(),
                    picture_box.x,
                    picture_box.y,
                    picture_box.width,
                    picture_box.height,
                    caption,
                );
            },
        }
    }

    Ok(pres)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::DeckOutline;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_render_layouts() {
        let images = vec![VisualAsset::from_bytes(PNG_MAGIC.to_vec()).unwrap()];
        let assembler = DeckAssembler::new();
        let deck = assembler.plan("1. Intro\nHello", &images, "C", "P");
        let pres = render(&deck, assembler.config()).unwrap();

        let layouts: Vec<SlideLayout> = pres.slides().map(|s| s.layout()).collect();
        assert_eq!(
            layouts,
            vec![
                SlideLayout::Title,
                SlideLayout::TitleAndContent,
                SlideLayout::Blank
            ]
        );
        assert_eq!(pres.properties().title.as_deref(), Some("P Strategy Proposal"));

        let visual = pres.slide(2).unwrap();
        let shapes: Vec<_> = visual.shapes().collect();
        assert_eq!(shapes[0].text().as_deref(), Some("Creative concept 1"));
        assert!(shapes[1].is_picture());
        assert_eq!(shapes[1].bounds(), (914400, 1371600, 7315200, 5029200));
    }

    #[test]
    fn test_author_becomes_creator() {
        let config = DeckConfig {
            author: Some("Planning Team".to_string()),
            ..DeckConfig::default()
        };
        let assembler = DeckAssembler::with_config(config);
        let deck = assembler.plan("", &[], "C", "P");
        let pres = render(&deck, assembler.config()).unwrap();
        assert_eq!(pres.properties().creator.as_deref(), Some("Planning Team"));

        let deck = DeckAssembler::new().plan("", &[], "C", "P");
        let pres = render(&deck, &DeckConfig::default()).unwrap();
        assert_eq!(pres.properties().creator, None);
    }

    #[test]
    fn test_heading_only_section_has_empty_body() {
        let bytes = assemble("1. Heading only", &[], "C", "P").unwrap();
        let outline = DeckOutline::from_bytes(&bytes).unwrap();
        assert_eq!(outline.slides[1].title.as_deref(), Some("1. Heading only"));
        assert_eq!(outline.slides[1].body_text().as_deref(), Some(""));
    }

    #[test]
    fn test_custom_slide_size() {
        let config = DeckConfig {
            slide_width: 12192000,
            slide_height: 6858000,
            ..DeckConfig::default()
        };
        let bytes = DeckAssembler::with_config(config).assemble("", &[], "C", "P").unwrap();
        let outline = DeckOutline::from_bytes(&bytes).unwrap();
        assert_eq!(outline.slide_width, 12192000);
    }

    #[test]
    fn test_assemble_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        DeckAssembler::new()
            .assemble_to_file(&path, "1. A\nb", &[], "C", "P")
            .unwrap();
        let outline = DeckOutline::from_bytes(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(outline.slide_count(), 2);
    }
}
