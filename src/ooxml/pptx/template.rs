//! Presentation template module.
//!
//! Provides the fixed parts every generated deck carries: one theme, one slide
//! master, three slide layouts and the presentation-level property parts.
//! The master lists its layouts as `rId1..rId3`, so layouts must be related
//! to the master in [`SlideLayout::ALL`] order before the theme.

use crate::ooxml::pptx::layout::SlideLayout;

/// Office theme referenced by the master and the presentation.
pub fn default_theme_xml() -> &'static str {
    include_str!("resources/theme1.xml")
}

/// Slide master with title and body placeholders and text styles.
pub fn default_slide_master_xml() -> &'static str {
    include_str!("resources/slideMaster1.xml")
}

/// Slide layout XML for the given layout.
pub fn slide_layout_xml(layout: SlideLayout) -> &'static str {
    match layout {
        SlideLayout::Title => include_str!("resources/slideLayout1.xml"),
        SlideLayout::TitleAndContent => include_str!("resources/slideLayout2.xml"),
        SlideLayout::Blank => include_str!("resources/slideLayout3.xml"),
    }
}

/// Presentation properties (`ppt/presProps.xml`).
pub fn default_pres_props_xml() -> &'static str {
    include_str!("resources/presProps.xml")
}

/// View properties (`ppt/viewProps.xml`).
pub fn default_view_props_xml() -> &'static str {
    include_str!("resources/viewProps.xml")
}

/// Table style list (`ppt/tableStyles.xml`).
pub fn default_table_styles_xml() -> &'static str {
    include_str!("resources/tableStyles.xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_lists_every_layout() {
        let master = default_slide_master_xml();
        for index in 1..=SlideLayout::ALL.len() {
            assert!(master.contains(&format!(r#"r:id="rId{index}""#)));
        }
        assert!(!master.contains(r#"r:id="rId4""#));
    }

    #[test]
    fn test_layout_names() {
        for layout in SlideLayout::ALL {
            let xml = slide_layout_xml(layout);
            assert!(xml.contains(&format!(r#"<p:cSld name="{}">"#, layout.name())));
        }
    }
}
