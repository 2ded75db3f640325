//! Integration tests for the document parser

use simplexml_core::{DocumentKind, Element, ParseError, ParseErrorKind, Parser};

const XML: &str = "<?xml version=\"1.0\" ?>\n";
const HTML: &str = "<!DOCTYPE html>\n";

fn parse(input: &str) -> Result<simplexml_core::Document, ParseError> {
    Parser::new().parse(input)
}

fn parse_err(input: &str) -> ParseError {
    parse(input).expect_err("input should be rejected")
}

fn texts(element: &Element) -> Vec<&str> {
    element.child_texts().collect()
}

// ============================================================================
// Well-formed Documents
// ============================================================================

#[test]
fn test_parse_full_document() {
    let input = r#"<?xml version="1.0" ?>
<root rootkey1="rootvalue1" rootkey2 rootkey3="rootvalue3">
  TEXT1
  <child1 />
  <child2 child2key1 child2key2="child2value2" />
  <child3>
    <child4 />
    <child5>TEXT2</child5>
  </child3>
</root>
"#;
    let doc = parse(input).unwrap();
    assert_eq!(doc.kind(), DocumentKind::Xml);

    let root = doc.root().unwrap();
    assert_eq!(root.name(), "root");
    assert_eq!(root.attributes().len(), 3);
    assert_eq!(root.attribute("rootkey1"), Some("rootvalue1"));
    assert_eq!(root.attribute("rootkey2"), Some(""));
    assert_eq!(root.attribute("rootkey3"), Some("rootvalue3"));
    assert_eq!(texts(root), vec!["TEXT1"]);

    let children: Vec<&Element> = root.child_elements().collect();
    assert_eq!(children.len(), 3);

    let child1 = children[0];
    assert_eq!(child1.name(), "child1");
    assert!(child1.attributes().is_empty());
    assert!(child1.children().is_empty());

    let child2 = children[1];
    assert_eq!(child2.name(), "child2");
    assert_eq!(child2.attributes().len(), 2);
    assert_eq!(child2.attribute("child2key1"), Some(""));
    assert_eq!(child2.attribute("child2key2"), Some("child2value2"));
    assert!(child2.children().is_empty());

    let child3 = children[2];
    assert_eq!(child3.name(), "child3");
    assert!(child3.attributes().is_empty());
    assert!(texts(child3).is_empty());

    let grandchildren: Vec<&Element> = child3.child_elements().collect();
    assert_eq!(grandchildren.len(), 2);
    assert_eq!(grandchildren[0].name(), "child4");
    assert!(grandchildren[0].children().is_empty());
    assert_eq!(grandchildren[1].name(), "child5");
    assert_eq!(texts(grandchildren[1]), vec!["TEXT2"]);
    assert_eq!(grandchildren[1].child_elements().count(), 0);
}

#[test]
fn test_parse_compact_element_forms() {
    let doc = parse("<?xml version=\"1.0\" ?><root a=\"1\" b><c/></root>").unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.name(), "root");
    assert_eq!(root.attribute("a"), Some("1"));
    assert_eq!(root.attribute("b"), Some(""));
    assert_eq!(root.attributes().len(), 2);

    let c = root.child_elements().next().unwrap();
    assert_eq!(c.name(), "c");
    assert!(c.attributes().is_empty());
    assert!(c.children().is_empty());
}

#[test]
fn test_parse_self_close_after_bare_attribute() {
    let doc = parse(&format!("{HTML}<input disabled/>")).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.attribute("disabled"), Some(""));
    assert!(root.children().is_empty());
}

#[test]
fn test_parse_html_doctype() {
    let doc = parse("<!DOCTYPE html>\n<html />\n").unwrap();
    assert_eq!(doc.kind(), DocumentKind::Html);
    assert_eq!(doc.root().unwrap().name(), "html");
}

#[test]
fn test_parse_compact_xml_declaration() {
    let doc = parse("<?xml version=\"1.0\"?>\n<root />").unwrap();
    assert_eq!(doc.kind(), DocumentKind::Xml);
}

#[test]
fn test_parse_leading_and_trailing_whitespace() {
    let doc = parse("\n\n  <!DOCTYPE html>\r\n\t<a />\n\n  ").unwrap();
    assert_eq!(doc.root().unwrap().name(), "a");
}

#[test]
fn test_parse_text_is_trimmed_and_decoded() {
    let doc = parse(&format!("{HTML}<p>\n   a &amp; b  &lt;c&gt;  \n</p>")).unwrap();
    assert_eq!(texts(doc.root().unwrap()), vec!["a & b  <c>"]);
}

#[test]
fn test_parse_text_keeps_inner_line_breaks() {
    let doc = parse(&format!("{HTML}<p>one\n  two</p>")).unwrap();
    assert_eq!(texts(doc.root().unwrap()), vec!["one\n  two"]);
}

#[test]
fn test_parse_attribute_value_decoded() {
    let doc = parse(&format!("{XML}<a t=\"x&lt;y &quot;z&quot;\" e=\"\" />")).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.attribute("t"), Some("x<y \"z\""));
    assert_eq!(root.attribute("e"), Some(""));
}

#[test]
fn test_parse_duplicate_attribute_last_wins() {
    let doc = parse(&format!("{XML}<a k=\"1\" k=\"2\" />")).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.attributes().len(), 1);
    assert_eq!(root.attribute("k"), Some("2"));
}

#[test]
fn test_parse_mixed_content_order() {
    let doc = parse(&format!("{HTML}<p>\n  a\n  <br />\n  b\n</p>\n")).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.children().len(), 3);
    assert_eq!(texts(root), vec!["a", "b"]);
    assert_eq!(root.child_elements().next().unwrap().name(), "br");
}

#[test]
fn test_parser_is_reusable() {
    let mut parser = Parser::new();
    assert!(parser.parse(&format!("{XML}<a><b>")).is_err());
    let doc = parser.parse(&format!("{XML}<c />")).unwrap();
    assert_eq!(doc.root().unwrap().name(), "c");
    assert!(doc.root().unwrap().children().is_empty());
}

#[test]
fn test_parse_deep_nesting() {
    const DEPTH: usize = 100_000;
    let input = format!("{XML}{}{}", "<a>".repeat(DEPTH), "</a>".repeat(DEPTH));
    let doc = parse(&input).unwrap();

    let mut depth = 0;
    let mut current = doc.root();
    while let Some(element) = current {
        depth += 1;
        current = element.child_elements().next();
    }
    assert_eq!(depth, DEPTH);

    let copy = doc.clone();
    assert!(copy == doc);
    drop(copy);
    drop(doc);
}

#[test]
fn test_error_deep_unclosed_nesting() {
    let input = format!("{XML}{}", "<a>".repeat(100_000));
    let err = parse_err(&input);
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
}

// ============================================================================
// Declaration Errors
// ============================================================================

#[test]
fn test_error_missing_declaration() {
    let err = parse_err("<root />");
    assert_eq!(err.kind, ParseErrorKind::MissingDeclaration);
    assert_eq!(
        err.to_string(),
        "Error in line 1 at column 2: Missing valid XML declaration or HTML doctype"
    );
}

#[test]
fn test_error_not_starting_with_angle_bracket() {
    let err = parse_err("  x");
    assert_eq!((err.line, err.column), (1, 3));
    assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter);
}

#[test]
fn test_error_wrong_xml_version() {
    let err = parse_err("<?xml version=\"2.0\" ?>\n<root />");
    assert_eq!((err.line, err.column), (1, 16));
    assert_eq!(err.message, "Unexpected character '2' instead of '1'");
}

#[test]
fn test_error_declaration_missing_whitespace() {
    let err = parse_err("<?xmlversion=\"1.0\" ?>");
    assert_eq!((err.line, err.column), (1, 6));
    assert_eq!(err.message, "Unexpected character 'v' instead of ' '");
}

#[test]
fn test_error_lowercase_doctype() {
    let err = parse_err("<!doctype html>\n<html />");
    assert_eq!((err.line, err.column), (1, 3));
}

#[test]
fn test_error_doctype_missing_whitespace() {
    let err = parse_err("<!DOCTYPEhtml>\n<html />");
    assert_eq!((err.line, err.column), (1, 10));
}

#[test]
fn test_error_empty_input() {
    let err = parse_err("");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    assert_eq!((err.line, err.column), (1, 1));
}

#[test]
fn test_error_declaration_only() {
    let err = parse_err(HTML);
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    assert_eq!((err.line, err.column), (2, 1));
}

// ============================================================================
// Element Errors
// ============================================================================

#[test]
fn test_error_mismatched_close_tag() {
    let err = parse_err(&format!("{XML}<a><b></a></b>"));
    assert_eq!(err.kind, ParseErrorKind::MismatchedCloseTag);
    assert_eq!(
        err.to_string(),
        "Error in line 2 at column 9: Unexpected element name 'a' instead of 'b'"
    );
}

#[test]
fn test_error_mismatched_close_after_multiline_text() {
    let err = parse_err(&format!("{HTML}<p>\n  line one\n  line two</q>"));
    assert_eq!(err.kind, ParseErrorKind::MismatchedCloseTag);
    assert_eq!((err.line, err.column), (4, 13));
}

#[test]
fn test_error_column_counts_characters() {
    let err = parse_err(&format!("{HTML}<p>üü</q>"));
    assert_eq!((err.line, err.column), (2, 8));
}

#[test]
fn test_error_content_after_root() {
    let err = parse_err(&format!("{HTML}<a />\nx"));
    assert_eq!(
        err.to_string(),
        "Error in line 3 at column 1: Unexpected character 'x' instead of end of stream"
    );
}

#[test]
fn test_error_second_root() {
    let err = parse_err(&format!("{HTML}<a />\n  <b />"));
    assert_eq!((err.line, err.column), (3, 3));
}

#[test]
fn test_error_unclosed_element() {
    let err = parse_err(&format!("{HTML}<a>"));
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    assert_eq!((err.line, err.column), (2, 4));
}

#[test]
fn test_error_unterminated_text() {
    let err = parse_err(&format!("{HTML}<a>text"));
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    assert_eq!((err.line, err.column), (2, 8));
}

#[test]
fn test_error_invalid_element_name() {
    let err = parse_err(&format!("{HTML}<1a />"));
    assert_eq!(err.message, "Unexpected character '1' instead of a name");
    assert_eq!((err.line, err.column), (2, 2));
}

#[test]
fn test_error_space_in_close_tag() {
    let err = parse_err(&format!("{HTML}<a></a >"));
    assert_eq!((err.line, err.column), (2, 7));
}

#[test]
fn test_error_unquoted_attribute_value() {
    let err = parse_err(&format!("{HTML}<a b=c />"));
    assert_eq!(err.message, "Unexpected character 'c' instead of '\"'");
    assert_eq!((err.line, err.column), (2, 6));
}

#[test]
fn test_error_attributes_without_separator() {
    let err = parse_err(&format!("{HTML}<a b=\"1\"c=\"2\" />"));
    assert_eq!(err.message, "Unexpected character 'c' instead of '>'");
    assert_eq!((err.line, err.column), (2, 9));
}

#[test]
fn test_error_unterminated_attribute_value() {
    let err = parse_err(&format!("{HTML}<a b=\"1 />"));
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
}

#[test]
fn test_error_message_format() {
    let err = ParseError::new("STRING", 1, 2);
    assert_eq!(err.to_string(), "Error in line 1 at column 2: STRING");
}
