//! Escaping of reserved characters.
//!
//! Only four ASCII characters are reserved: `"`, `&`, `<` and `>`. Every other
//! code point, including everything at or above U+0080, passes through as is.
//! Both functions borrow the input when nothing needs to change.

use std::borrow::Cow;

use memchr::memchr;

/// The fixed entity table shared by [`encode`] and [`decode`].
const ENTITIES: [(char, &str); 4] = [
    ('"', "&quot;"),
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
];

#[inline(always)]
fn is_reserved(b: u8) -> bool {
    matches!(b, b'"' | b'&' | b'<' | b'>')
}

/// Replace reserved characters with their entities.
///
/// ```rust
/// use simplexml_core::escape::encode;
///
/// assert_eq!(encode("a < b"), "a &lt; b");
/// assert_eq!(encode("Ü"), "Ü");
/// ```
pub fn encode(text: &str) -> Cow<'_, str> {
    // Reserved characters are ASCII, so a byte scan never splits a code point.
    let Some(first) = text.bytes().position(is_reserved) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 8);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Resolve the four fixed entities back to their characters.
///
/// Any other `&` sequence is kept verbatim.
///
/// ```rust
/// use simplexml_core::escape::decode;
///
/// assert_eq!(decode("a &lt; b"), "a < b");
/// assert_eq!(decode("&nbsp;"), "&nbsp;");
/// ```
pub fn decode(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);
    let mut pos = first;

    while pos < text.len() {
        let rest = &text[pos..];
        if let Some((c, entity)) = ENTITIES.iter().find(|(_, e)| rest.starts_with(e)) {
            out.push(*c);
            pos += entity.len();
            continue;
        }

        // Copy up to (and including) this `&`, then look for the next one.
        let next = memchr(b'&', &bytes[pos + 1..]).map_or(text.len(), |off| pos + 1 + off);
        out.push_str(&text[pos..next]);
        pos = next;
    }

    Cow::Owned(out)
}
