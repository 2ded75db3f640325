//! Strict single-pass document parser.
//!
//! The parser is a hand-written state machine over a [`Cursor`]. It accepts
//! exactly the grammar the writer produces: a declaration or doctype, one
//! root element, attributes as `key` or `key="value"`, self-closing or
//! container elements, and text runs between tags. The first violation aborts
//! the parse; there is no recovery and no partial result.
//!
//! Open elements are kept on an owned stack. An element is attached to its
//! parent (or becomes the root) when it closes, so no back references are
//! needed while the subtree is still being filled.

use std::fs;
use std::path::Path;

use crate::ast::{Document, DocumentKind, Element};
use crate::chars;
use crate::error::{Error, ParseError};
use crate::escape::decode;
use crate::lexer::Cursor;

/// Parser states, in control-flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    DeclarationOrDoctype,
    AfterFirstLine,
    ElementOpenStart,
    ElementOpenName,
    AfterElementOpenName,
    AttributeOrShortClose,
    ElementEnd,
    AfterElement,
    CandidateEnd,
    ElementStartOrText,
    ElementStart,
    ElementCloseName,
    End,
}

/// Reusable document parser.
///
/// A parser handles one document at a time; its nesting stack is cleared at
/// the start of every parse.
#[derive(Debug, Default)]
pub struct Parser {
    /// Elements opened but not yet closed, innermost last.
    stack: Vec<Element>,
}

impl Parser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Read and parse a file.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<Document, Error> {
        let path = path.as_ref();
        log::debug!(target: "simplexml.parser", "reading {}", path.display());
        let input = fs::read_to_string(path)?;
        Ok(self.parse(&input)?)
    }

    /// Parse a complete document.
    ///
    /// ```rust
    /// use simplexml_core::Parser;
    ///
    /// let doc = Parser::new()
    ///     .parse("<!DOCTYPE html>\n<title>Home</title>\n")
    ///     .unwrap();
    /// assert_eq!(doc.root().unwrap().name(), "title");
    /// ```
    pub fn parse(&mut self, input: &str) -> Result<Document, ParseError> {
        self.stack.clear();
        log::debug!(target: "simplexml.parser", "parsing {} bytes", input.len());

        let mut cursor = Cursor::new(input);
        let mut kind = DocumentKind::Xml;
        let mut root = None;
        let mut state = State::Start;

        while state != State::End {
            log::trace!(
                target: "simplexml.parser",
                "{:?} at {}:{}",
                state,
                cursor.line(),
                cursor.column()
            );
            state = match state {
                State::Start => {
                    skip_whitespace(&mut cursor);
                    State::DeclarationOrDoctype
                }
                State::DeclarationOrDoctype => {
                    expect(&mut cursor, '<')?;
                    kind = if parse_declaration(&mut cursor)? {
                        DocumentKind::Xml
                    } else if parse_doctype(&mut cursor)? {
                        DocumentKind::Html
                    } else {
                        return Err(ParseError::missing_declaration(
                            cursor.line(),
                            cursor.column(),
                        ));
                    };
                    expect(&mut cursor, '>')?;
                    State::AfterFirstLine
                }
                State::AfterFirstLine => {
                    skip_whitespace(&mut cursor);
                    State::ElementOpenStart
                }
                State::ElementOpenStart => {
                    expect(&mut cursor, '<')?;
                    State::ElementOpenName
                }
                State::ElementOpenName => {
                    let (line, column) = (cursor.line(), cursor.column());
                    let name = parse_name(&mut cursor)?;
                    let element = Element::new(name)
                        .map_err(|e| ParseError::new(e.to_string(), line, column))?;
                    self.stack.push(element);
                    State::AfterElementOpenName
                }
                State::AfterElementOpenName => {
                    if skip_whitespace(&mut cursor) || cursor.at('/') {
                        State::AttributeOrShortClose
                    } else {
                        State::ElementEnd
                    }
                }
                State::AttributeOrShortClose => {
                    if cursor.eat('/') {
                        self.close(&mut root, &cursor)?;
                        State::ElementEnd
                    } else {
                        self.parse_attribute(&mut cursor)?;
                        State::AfterElementOpenName
                    }
                }
                State::ElementEnd => {
                    expect(&mut cursor, '>')?;
                    State::AfterElement
                }
                State::AfterElement => {
                    skip_whitespace(&mut cursor);
                    if self.stack.is_empty() {
                        State::CandidateEnd
                    } else {
                        State::ElementStartOrText
                    }
                }
                State::CandidateEnd => {
                    if let Some(c) = cursor.current() {
                        return Err(ParseError::unexpected(
                            Some(c),
                            "end of stream",
                            cursor.line(),
                            cursor.column(),
                        ));
                    }
                    State::End
                }
                State::ElementStartOrText => {
                    if !cursor.eat('<') {
                        self.parse_text(&mut cursor)?;
                        expect(&mut cursor, '<')?;
                    }
                    State::ElementStart
                }
                State::ElementStart => {
                    if cursor.eat('/') {
                        State::ElementCloseName
                    } else {
                        State::ElementOpenName
                    }
                }
                State::ElementCloseName => {
                    let (line, column) = (cursor.line(), cursor.column());
                    let name = parse_name(&mut cursor)?;
                    let open = self
                        .stack
                        .last()
                        .ok_or_else(|| ParseError::stack_underflow(line, column))?;
                    if open.name() != name {
                        return Err(ParseError::mismatched_close(
                            name,
                            open.name(),
                            line,
                            column,
                        ));
                    }
                    self.close(&mut root, &cursor)?;
                    State::ElementEnd
                }
                State::End => State::End,
            };
        }

        let mut document = Document::new(kind);
        if let Some(root) = root {
            document.set_root(root);
        }
        log::debug!(target: "simplexml.parser", "parsed {:?} document", kind);
        Ok(document)
    }

    /// Pop the innermost open element and attach it to its parent, or make
    /// it the root if nothing is left open.
    fn close(
        &mut self,
        root: &mut Option<Element>,
        cursor: &Cursor<'_>,
    ) -> Result<(), ParseError> {
        let element = self
            .stack
            .pop()
            .ok_or_else(|| ParseError::stack_underflow(cursor.line(), cursor.column()))?;
        match self.stack.last_mut() {
            Some(parent) => {
                parent.add_child(element);
            }
            None => *root = Some(element),
        }
        Ok(())
    }

    fn top_mut(&mut self, cursor: &Cursor<'_>) -> Result<&mut Element, ParseError> {
        self.stack
            .last_mut()
            .ok_or_else(|| ParseError::stack_underflow(cursor.line(), cursor.column()))
    }

    /// Parse `key` or `key="value"` onto the innermost open element.
    fn parse_attribute(&mut self, cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
        let (line, column) = (cursor.line(), cursor.column());
        let key = parse_name(cursor)?;
        let value = if cursor.eat('=') {
            expect(cursor, '"')?;
            let raw = cursor.take_until(b'"').ok_or_else(|| {
                ParseError::unexpected_eof("'\"'", cursor.line(), cursor.column())
            })?;
            expect(cursor, '"')?;
            decode(raw).into_owned()
        } else {
            String::new()
        };
        self.top_mut(cursor)?
            .add_attribute(key, value)
            .map_err(|e| ParseError::new(e.to_string(), line, column))?;
        Ok(())
    }

    /// Parse a text run up to (not including) the next `<`.
    fn parse_text(&mut self, cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
        let (line, column) = (cursor.line(), cursor.column());
        let raw = cursor
            .take_until(b'<')
            .ok_or_else(|| ParseError::unexpected_eof("'<'", cursor.line(), cursor.column()))?;
        let text = decode(chars::trim(raw));
        self.top_mut(cursor)?
            .add_text(text)
            .map_err(|e| ParseError::new(e.to_string(), line, column))?;
        Ok(())
    }
}

/// Skip whitespace and report whether any was skipped.
fn skip_whitespace(cursor: &mut Cursor<'_>) -> bool {
    !cursor.take_while(chars::is_whitespace).is_empty()
}

fn expect_whitespace(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    if skip_whitespace(cursor) {
        Ok(())
    } else {
        Err(ParseError::unexpected(
            cursor.current(),
            "' '",
            cursor.line(),
            cursor.column(),
        ))
    }
}

fn expect(cursor: &mut Cursor<'_>, c: char) -> Result<(), ParseError> {
    if cursor.eat(c) {
        Ok(())
    } else {
        Err(ParseError::unexpected(
            cursor.current(),
            &format!("'{c}'"),
            cursor.line(),
            cursor.column(),
        ))
    }
}

fn expect_str(cursor: &mut Cursor<'_>, literal: &str) -> Result<(), ParseError> {
    literal.chars().try_for_each(|c| expect(cursor, c))
}

fn parse_name<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str, ParseError> {
    match cursor.current() {
        Some(c) if chars::is_name_start(c) => Ok(cursor.take_while(chars::is_name_char)),
        found => Err(ParseError::unexpected(
            found,
            "a name",
            cursor.line(),
            cursor.column(),
        )),
    }
}

/// `?xml version="1.0" ?` after the opening `<`.
///
/// Returns `Ok(false)` with the cursor unchanged if the input does not start
/// a declaration. Whitespace before the closing `?` is optional.
fn parse_declaration(cursor: &mut Cursor<'_>) -> Result<bool, ParseError> {
    let mark = cursor.mark();
    if !cursor.eat('?') {
        cursor.reset(mark);
        return Ok(false);
    }
    expect_str(cursor, "xml")?;
    expect_whitespace(cursor)?;
    expect_str(cursor, "version=\"1.0\"")?;
    skip_whitespace(cursor);
    expect(cursor, '?')?;
    Ok(true)
}

/// `!DOCTYPE html` after the opening `<`.
fn parse_doctype(cursor: &mut Cursor<'_>) -> Result<bool, ParseError> {
    let mark = cursor.mark();
    if !cursor.eat('!') {
        cursor.reset(mark);
        return Ok(false);
    }
    expect_str(cursor, "DOCTYPE")?;
    expect_whitespace(cursor)?;
    expect_str(cursor, "html")?;
    Ok(true)
}
