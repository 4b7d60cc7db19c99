//! Splitting generated strategy text into titled sections.
//!
//! A section starts at a *marker line*: a line that begins (no indentation)
//! with one or more ASCII digits, a `.`, and then whitespace or the end of
//! the line, e.g. `1. Market overview` or `12.`. Numerals elsewhere
//! (`Section 1. is about`, `1.5 million`, `2.Plan`) never start a section.
//!
//! Text before the first marker becomes an implicit leading section.
use memchr::memchr_iter;

/// A titled block of strategy text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// First line of the trimmed section, used verbatim.
    pub heading: String,
    /// Remaining lines joined with `\n`; empty for heading-only sections.
    pub body: String,
}

impl Section {
    /// Build a section from a raw chunk; `None` if it is whitespace only.
    fn from_chunk(chunk: &str) -> Option<Self> {
        let trimmed = chunk.trim();
        if trimmed.is_empty() {
            return None;
        }

        let mut lines = trimmed.lines();
        let heading = lines.next().unwrap_or_default().trim_end().to_string();
        let body = lines
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n");

        Some(Self { heading, body })
    }

    /// Body lines, one per paragraph.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.body.split('\n')
    }
}

/// Check whether `line` (starting at a line start) is a section marker.
///
/// # Examples
///
/// ```
/// use stratdeck::strategy::is_marker_line;
/// assert!(is_marker_line("1. Intro"));
/// assert!(is_marker_line("10.\tPlan"));
/// assert!(is_marker_line("3."));
/// assert!(!is_marker_line("1.5 million units"));
/// assert!(!is_marker_line("2.Plan"));
/// assert!(!is_marker_line("  1. indented"));
/// assert!(!is_marker_line("Section 1. is about"));
/// ```
pub fn is_marker_line(line: &str) -> bool {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return false;
    }

    let rest = &line[digits..];
    let Some(after_dot) = rest.strip_prefix('.') else {
        return false;
    };

    match after_dot.chars().next() {
        None => true,
        Some(c) => c.is_whitespace(),
    }
}

/// Split strategy text into sections in source order.
///
/// A leading byte order mark is ignored. Each section is trimmed;
/// whitespace-only sections are dropped. Never fails: text without
/// markers yields at most one section.
///
/// # Examples
///
/// ```
/// use stratdeck::strategy::split_sections;
/// let sections = split_sections("1. Intro\nHello\n2. Plan\nWorld");
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].heading, "1. Intro");
/// assert_eq!(sections[1].body, "World");
/// ```
pub fn split_sections(text: &str) -> Vec<Section> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut boundaries = vec![0];
    for newline in memchr_iter(b'\n', text.as_bytes()) {
        let line_start = newline + 1;
        if is_marker_line(&text[line_start..]) {
            boundaries.push(line_start);
        }
    }
    boundaries.push(text.len());

    boundaries
        .windows(2)
        .filter_map(|pair| Section::from_chunk(&text[pair[0]..pair[1]]))
        .collect()
}
