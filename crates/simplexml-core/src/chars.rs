//! Character classes used by names and whitespace.
//!
//! The name tables mirror the `NameStartChar` and `NameChar` productions of
//! XML 1.0. Both the parser and the construction API validate names through
//! these predicates, so anything the writer emits as a name is readable again.

/// Check whether `c` may be the first character of a name.
///
/// ```rust
/// use simplexml_core::chars::is_name_start;
///
/// assert!(is_name_start('a'));
/// assert!(is_name_start(':'));
/// assert!(!is_name_start('1'));
/// ```
#[inline]
pub fn is_name_start(c: char) -> bool {
    match c {
        ':' | '_' | 'a'..='z' | 'A'..='Z' => true,
        _ => matches!(
            c as u32,
            0xC0..=0xD6
                | 0xD8..=0xF6
                | 0xF8..=0x2FF
                | 0x370..=0x37D
                | 0x37F..=0x1FFF
                | 0x200C..=0x200D
                | 0x2070..=0x218F
                | 0x2C00..=0x2FEF
                | 0x3001..=0xD7FF
                | 0xF900..=0xFDCF
                | 0xFDF0..=0xFFFD
                | 0x10000..=0xEFFFF
        ),
    }
}

/// Check whether `c` may appear after the first character of a name.
#[inline]
pub fn is_name_char(c: char) -> bool {
    match c {
        '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}' => true,
        _ => is_name_start(c),
    }
}

/// Check whether the whole string is a valid name.
///
/// The empty string is not a name.
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_name_start(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Whitespace as the parser skips it: space, tab, carriage return, line feed.
#[inline(always)]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Check whether the string consists only of whitespace (or is empty).
#[inline]
pub fn is_blank(s: &str) -> bool {
    s.chars().all(is_whitespace)
}

/// Strip leading and trailing whitespace.
#[inline]
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_whitespace)
}
