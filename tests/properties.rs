//! Property tests for section splitting and deck assembly.
use proptest::prelude::*;
use stratdeck::{DeckAssembler, DeckOutline, DeckSpec, SlideKind, VisualAsset, split_sections};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

proptest! {
    #[test]
    fn headings_are_never_empty(text in "[0-9a-z .\t\r\n]{0,200}") {
        for section in split_sections(&text) {
            prop_assert!(!section.heading.is_empty());
            prop_assert!(!section.heading.contains('\n'));
            prop_assert_eq!(section.heading.trim(), section.heading.as_str());
        }
    }

    #[test]
    fn numbered_sections_are_found_in_order(
        items in prop::collection::vec(("[a-z]{1,8}", "[a-z ]{0,20}"), 0..8)
    ) {
        let text: String = items
            .iter()
            .enumerate()
            .map(|(i, (title, body))| format!("{}. {}\n{}\n", i + 1, title, body))
            .collect();

        let sections = split_sections(&text);
        prop_assert_eq!(sections.len(), items.len());
        for (i, (section, (title, body))) in sections.iter().zip(&items).enumerate() {
            prop_assert_eq!(&section.heading, &format!("{}. {}", i + 1, title));
            prop_assert_eq!(section.body.as_str(), body.trim_end());
        }
    }

    #[test]
    fn plan_slide_count_invariant(text in "[0-9a-z .\n]{0,200}", image_count in 0usize..4) {
        let images: Vec<VisualAsset> = (0..image_count)
            .map(|_| VisualAsset::from_bytes(PNG_MAGIC.to_vec()).unwrap())
            .collect();
        let deck = DeckAssembler::new().plan(&text, &images, "C", "P");
        let sections = split_sections(&text).len();

        prop_assert_eq!(deck.slide_count(), 1 + sections + image_count);
        prop_assert_eq!(deck.count_of(SlideKind::Title), 1);
        prop_assert_eq!(deck.count_of(SlideKind::Section), sections);
        prop_assert_eq!(deck.count_of(SlideKind::Image), image_count);
        prop_assert_eq!(deck.spec(), &DeckSpec::new("C", "P"));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn written_deck_matches_plan(text in "[0-9a-zA-Z .\n]{0,120}", image_count in 0usize..3) {
        let images: Vec<VisualAsset> = (0..image_count)
            .map(|_| VisualAsset::from_bytes(PNG_MAGIC.to_vec()).unwrap())
            .collect();
        let assembler = DeckAssembler::new();
        let planned = assembler.plan(&text, &images, "C", "P");
        let bytes = assembler.assemble(&text, &images, "C", "P").unwrap();
        let outline = DeckOutline::from_bytes(&bytes).unwrap();

        prop_assert_eq!(outline.slide_count(), planned.slide_count());
        for (slide, expected) in outline.slides.iter().zip(planned.slides()) {
            if expected.kind() == SlideKind::Image {
                prop_assert_eq!(&slide.text_boxes, &vec![expected.heading().to_string()]);
            } else {
                prop_assert_eq!(slide.title.as_deref(), Some(expected.heading()));
            }
        }
    }
}
