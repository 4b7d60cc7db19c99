use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Returns true for characters XML 1.0 does not allow anywhere in a document.
#[inline]
fn is_forbidden_char(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

/// Escape XML special characters for use in text content or attribute values.
///
/// Control characters that XML 1.0 cannot represent are dropped, so any plain
/// text a caller passes in yields a well-formed part.
///
/// # Examples
///
/// ```
/// use stratdeck::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// assert_eq!(escape_xml("bell\u{7}"), "bell");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    let escaped = XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]);
    if escaped.chars().any(is_forbidden_char) {
        escaped.chars().filter(|c| !is_forbidden_char(*c)).collect()
    } else {
        escaped
    }
}

/// Resolve the name of a general entity or character reference to its character.
///
/// `name` is the text between `&` and `;`, e.g. `amp` or `#x41`.
/// Returns `None` for entities that are neither predefined nor numeric.
///
/// # Examples
///
/// ```
/// use stratdeck::common::xml::resolve_entity;
/// assert_eq!(resolve_entity("amp"), Some('&'));
/// assert_eq!(resolve_entity("#65"), Some('A'));
/// assert_eq!(resolve_entity("#x3042"), Some('あ'));
/// assert_eq!(resolve_entity("nbsp"), None);
/// ```
pub fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        },
    }
}

/// Unescape entity and character references in attribute values.
///
/// Unknown references are kept verbatim.
///
/// # Examples
///
/// ```
/// use stratdeck::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("R&amp;D &lt;plan&gt;"), "R&D <plan>");
/// assert_eq!(unescape_xml("&#x3042;&nbsp;"), "あ&nbsp;");
/// ```
pub fn unescape_xml(s: &str) -> String {
    if memchr::memchr(b'&', s.as_bytes()).is_none() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').and_then(|end| Some((end, resolve_entity(&tail[1..end])?))) {
            Some((end, c)) => {
                out.push(c);
                rest = &tail[end + 1..];
            },
            None => {
                out.push('&');
                rest = &tail[1..];
            },
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_leaves_non_ascii_alone() {
        assert_eq!(escape_xml("大手自動車メーカー"), "大手自動車メーカー");
    }

    #[test]
    fn test_escape_keeps_tabs_and_newlines() {
        assert_eq!(escape_xml("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn test_escape_drops_forbidden_controls() {
        assert_eq!(escape_xml("A\u{0}B\u{1B}C & D"), "ABC &amp; D");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let text = "Client: A&B <\"quoted\"> 'x'";
        assert_eq!(unescape_xml(&escape_xml(text)), text);
        assert_eq!(unescape_xml("lone & ampersand"), "lone & ampersand");
    }

    #[test]
    fn test_resolve_invalid_numeric_reference() {
        assert_eq!(resolve_entity("#xD800"), None);
        assert_eq!(resolve_entity("#zz"), None);
    }
}
