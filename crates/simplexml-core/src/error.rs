use std::io;

use thiserror::Error;

/// Error kinds for categorizing parse errors.
///
/// The kind never changes how an error is displayed; every parse error reads
/// `Error in line <L> at column <C>: <message>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character other than the one the grammar expects
    UnexpectedCharacter,
    /// Input ended inside a construct
    UnexpectedEof,
    /// Neither an XML declaration nor an HTML doctype at the start
    MissingDeclaration,
    /// A closing tag naming a different element than the open one
    MismatchedCloseTag,
    /// The nesting stack was empty where an open element was required
    StackUnderflow,
}

/// A positioned syntax or structure violation.
///
/// Lines and columns are 1-based; the column is the position of the character
/// that was just read when the violation was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error in line {line} at column {column}: {message}")]
pub struct ParseError {
    /// Human-readable detail
    pub message: String,
    /// Line of the offending character
    pub line: u32,
    /// Column of the offending character
    pub column: u32,
    /// Error categorization
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            kind: ParseErrorKind::UnexpectedCharacter,
        }
    }

    /// Create an error for a character that does not match the expected one.
    ///
    /// `found` is `None` at end of input.
    pub fn unexpected(found: Option<char>, expected: &str, line: u32, column: u32) -> Self {
        match found {
            Some(c) => Self::new(
                format!("Unexpected character '{c}' instead of {expected}"),
                line,
                column,
            ),
            None => Self::unexpected_eof(expected, line, column),
        }
    }

    /// Create an error for input ending where `expected` was required.
    pub fn unexpected_eof(expected: &str, line: u32, column: u32) -> Self {
        Self::new(
            format!("Unexpected end of stream instead of {expected}"),
            line,
            column,
        )
        .with_kind(ParseErrorKind::UnexpectedEof)
    }

    /// Create an error for a missing declaration or doctype.
    pub fn missing_declaration(line: u32, column: u32) -> Self {
        Self::new("Missing valid XML declaration or HTML doctype", line, column)
            .with_kind(ParseErrorKind::MissingDeclaration)
    }

    /// Create an error for a closing tag that does not match the open element.
    pub fn mismatched_close(found: &str, expected: &str, line: u32, column: u32) -> Self {
        Self::new(
            format!("Unexpected element name '{found}' instead of '{expected}'"),
            line,
            column,
        )
        .with_kind(ParseErrorKind::MismatchedCloseTag)
    }

    /// Create an error for an empty nesting stack.
    pub fn stack_underflow(line: u32, column: u32) -> Self {
        Self::new("No open element at this position", line, column)
            .with_kind(ParseErrorKind::StackUnderflow)
    }

    /// Set the error kind.
    pub fn with_kind(mut self, kind: ParseErrorKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Validation failure raised by the construction API.
///
/// This signals a programming error in the caller, not malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// The element name is empty or contains a character outside the name classes.
    #[error("illegal character in element name '{0}'")]
    ElementName(String),
    /// The attribute key is empty or contains a character outside the name classes.
    #[error("illegal character in attribute key '{0}'")]
    AttributeKey(String),
    /// Text content consisted only of whitespace.
    #[error("text must not be blank")]
    BlankText,
}

/// Errors returned by the file and stream entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// The input was not a valid document.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Reading the source or writing the sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
