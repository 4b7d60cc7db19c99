//! Slide layouts available in generated decks.
use crate::ooxml::opc::packuri::PackURI;

/// One of the three layouts shipped with the default slide master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideLayout {
    /// Centered title with a subtitle placeholder.
    Title,
    /// Title with a body placeholder.
    TitleAndContent,
    /// No placeholders.
    Blank,
}

impl SlideLayout {
    /// All layouts, in the order the master lists them.
    pub const ALL: [SlideLayout; 3] = [Self::Title, Self::TitleAndContent, Self::Blank];

    /// 1-based number used in the layout partname.
    pub fn number(&self) -> usize {
        match self {
            Self::Title => 1,
            Self::TitleAndContent => 2,
            Self::Blank => 3,
        }
    }

    /// Display name stored in the layout's `p:cSld/@name`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "Title Slide",
            Self::TitleAndContent => "Title and Content",
            Self::Blank => "Blank",
        }
    }

    /// Partname of the layout, e.g. `/ppt/slideLayouts/slideLayout2.xml`.
    pub fn partname(&self) -> String {
        format!("/ppt/slideLayouts/slideLayout{}.xml", self.number())
    }

    /// Recover the layout from a layout partname.
    pub fn from_partname(partname: &PackURI) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.partname() == partname.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partname_round_trip() {
        for layout in SlideLayout::ALL {
            let partname = PackURI::new(layout.partname()).unwrap();
            assert_eq!(SlideLayout::from_partname(&partname), Some(layout));
        }
        let other = PackURI::new("/ppt/slideLayouts/slideLayout7.xml").unwrap();
        assert_eq!(SlideLayout::from_partname(&other), None);
    }
}
