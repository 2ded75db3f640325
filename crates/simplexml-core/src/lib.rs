//! # SimpleXML Core
//!
//! Build, write and parse a constrained XML/HTML document tree.
//!
//! The writer and the parser are exact inverses: every tree that can be built
//! through the construction API is written in a form the parser accepts, and
//! parsing that output yields an equivalent tree. In exchange the grammar is
//! small: one declaration or doctype line, a single root element, attributes,
//! nested elements and text. There are no comments, CDATA sections,
//! namespaces or DTDs, and only the four entities `&quot;`, `&amp;`, `&lt;`
//! and `&gt;` are known.
//!
//! ## Quick Start
//!
//! ```rust
//! use simplexml_core::{Document, Element};
//!
//! let root = Element::new("html")
//!     .unwrap()
//!     .with_attribute("lang", "en")
//!     .unwrap()
//!     .with_child(Element::new_with_text("title", "Home").unwrap());
//! let doc = Document::html().with_root(root);
//!
//! assert_eq!(
//!     doc.to_xml_string(),
//!     "<!DOCTYPE html>\n<html lang=\"en\">\n  <title>Home</title>\n</html>\n"
//! );
//! ```
//!
//! ## Parsing
//!
//! ```rust
//! let input = "<?xml version=\"1.0\" ?>\n<root a=\"1\" b><c /></root>\n";
//! let doc = simplexml_core::parse_str(input).unwrap();
//!
//! let root = doc.root().unwrap();
//! assert_eq!(root.attribute("a"), Some("1"));
//! assert_eq!(root.attribute("b"), Some(""));
//! assert_eq!(root.child_elements().count(), 1);
//! ```
//!
//! Malformed input fails with a positioned [`ParseError`]:
//!
//! ```rust
//! let err = simplexml_core::parse_str("<?xml version=\"1.0\" ?>\n<a></b>").unwrap_err();
//! assert_eq!(err.to_string(), "Error in line 2 at column 6: Unexpected element name 'b' instead of 'a'");
//! ```

use std::path::Path;

pub mod ast;
pub mod chars;
pub mod error;
pub mod escape;
pub mod lexer;
pub mod parser;
pub mod render;

pub use ast::{Document, DocumentKind, Element, Node, NodeKind, Text};
pub use error::{Error, InvalidArgument, ParseError, ParseErrorKind};
pub use parser::Parser;

/// Create an empty HTML document.
pub fn create_html() -> Document {
    Document::html()
}

/// Create an empty XML document.
pub fn create_xml() -> Document {
    Document::xml()
}

/// Parse a document from a string.
pub fn parse_str(input: &str) -> Result<Document, ParseError> {
    Parser::new().parse(input)
}

/// Parse a document from a file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document, Error> {
    Parser::new().parse_file(path)
}
