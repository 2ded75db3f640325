//! Integration tests for name classification and escaping

use proptest::prelude::*;
use simplexml_core::chars::{is_blank, is_name, is_name_char, is_name_start, trim};
use simplexml_core::escape::{decode, encode};

// ============================================================================
// Name Class Tests
// ============================================================================

#[test]
fn test_name_start_characters() {
    for c in [
        ':', 'A', '_', 'a', 'À', 'Ø', 'ø', 'Ͱ', 'Ϳ', '\u{200D}', '⁰', 'Ⰰ', '、', '豈', 'ﷰ',
        '\u{10000}',
    ] {
        assert!(is_name_start(c), "{c:?} should start a name");
    }
}

#[test]
fn test_name_start_rejects() {
    for c in ['0', '-', '.', '\t', ' ', '·', '\u{0300}', '×', '÷', '\u{F0000}'] {
        assert!(!is_name_start(c), "{c:?} should not start a name");
    }
}

#[test]
fn test_name_characters() {
    for c in ['-', '.', '0', '9', '·', '\u{0300}', '\u{036F}', '‿', '⁀'] {
        assert!(is_name_char(c), "{c:?} should continue a name");
        assert!(!is_name_start(c), "{c:?} should not start a name");
    }
}

#[test]
fn test_name_char_rejects() {
    for c in ['\t', ' ', '<', '>', '"', '=', '/', '&'] {
        assert!(!is_name_char(c), "{c:?} should not continue a name");
    }
}

#[test]
fn test_is_name() {
    assert!(is_name("root"));
    assert!(is_name("a-b.c_d:e1"));
    assert!(!is_name(""));
    assert!(!is_name("\troot"));
    assert!(!is_name("ro ot"));
    assert!(!is_name("9lives"));
}

#[test]
fn test_whitespace_helpers() {
    assert!(is_blank(""));
    assert!(is_blank(" \t\r\n"));
    assert!(!is_blank(" x "));
    assert_eq!(trim("\n  some  text \t"), "some  text");
}

proptest! {
    #[test]
    fn prop_name_start_implies_name_char(c in any::<char>()) {
        if is_name_start(c) {
            prop_assert!(is_name_char(c));
        }
    }
}

// ============================================================================
// Escape Tests
// ============================================================================

#[test]
fn test_encode() {
    let input = "TEXT\"TEXT&TEXT<TEXT>TEXT\"TEXT&TEXT<TEXT>Ü";
    assert_eq!(
        encode(input),
        "TEXT&quot;TEXT&amp;TEXT&lt;TEXT&gt;TEXT&quot;TEXT&amp;TEXT&lt;TEXT&gt;Ü"
    );
}

#[test]
fn test_encode_passes_non_ascii_through() {
    assert_eq!(encode("日本語 – ü"), "日本語 – ü");
}

#[test]
fn test_decode() {
    assert_eq!(
        decode("TEXT&quot;TEXT&amp;TEXT&lt;TEXT&gt;Ü"),
        "TEXT\"TEXT&TEXT<TEXT>Ü"
    );
}

#[test]
fn test_decode_keeps_unknown_entities() {
    assert_eq!(decode("a &nbsp; b & c &amp"), "a &nbsp; b & c &amp");
    assert_eq!(decode("&amp;lt;"), "&lt;");
}

proptest! {
    #[test]
    fn prop_encode_without_reserved_is_identity(s in "[^\"&<>]*") {
        prop_assert_eq!(encode(&s), s.as_str());
    }

    #[test]
    fn prop_encode_leaves_no_reserved(s in any::<String>()) {
        let encoded = encode(&s);
        prop_assert!(!encoded.contains(['"', '<', '>']));
        // Every remaining ampersand starts one of the four entities.
        for (at, _) in encoded.match_indices('&') {
            let rest = &encoded[at..];
            prop_assert!(
                ["&quot;", "&amp;", "&lt;", "&gt;"].iter().any(|e| rest.starts_with(e))
            );
        }
    }

    #[test]
    fn prop_decode_inverts_encode(s in any::<String>()) {
        let encoded = encode(&s);
        prop_assert_eq!(decode(&encoded), s.as_str());
    }
}
