//! Character cursor with line and column tracking.
//!
//! The cursor always holds one *current* character, the one most recently
//! read. Lines are 1-based. The column counts characters read since the last
//! line break, so a line break itself sits at column 0 of the next line and
//! the first character after it is at column 1.
//!
//! [`Cursor::mark`] and [`Cursor::reset`] snapshot and restore the whole
//! position for the one-step lookahead the grammar needs.

use memchr::{memchr, memchr_iter};

/// A saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    next: usize,
    current: Option<char>,
    line: u32,
    column: u32,
}

/// Cursor over a complete input string.
pub struct Cursor<'a> {
    /// The complete input text.
    input: &'a str,
    /// Byte offset just past the current character.
    next: usize,
    /// The current character, `None` at end of input.
    current: Option<char>,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned on the first character of `input`.
    pub fn new(input: &'a str) -> Self {
        let mut cursor = Self {
            input,
            next: 0,
            current: None,
            line: 1,
            column: 0,
        };
        cursor.read();
        cursor
    }

    /// The current character, `None` at end of input.
    #[inline(always)]
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Line of the current character.
    #[inline(always)]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Column of the current character.
    #[inline(always)]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Check if all input has been consumed.
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.current.is_none()
    }

    /// Check whether the current character is `c`.
    #[inline(always)]
    pub fn at(&self, c: char) -> bool {
        self.current == Some(c)
    }

    /// Advance to the next character.
    ///
    /// Reading past the end keeps incrementing the column, so errors at end
    /// of input point one past the last character.
    pub fn read(&mut self) {
        self.current = self.input[self.next..].chars().next();
        if let Some(c) = self.current {
            self.next += c.len_utf8();
        }
        self.column += 1;
        if self.current == Some('\n') {
            self.line += 1;
            self.column = 0;
        }
    }

    /// If the current character is `c`, consume it and return `true`.
    #[inline]
    pub fn eat(&mut self, c: char) -> bool {
        if self.at(c) {
            self.read();
            true
        } else {
            false
        }
    }

    /// Snapshot the position.
    #[inline]
    pub fn mark(&self) -> Mark {
        Mark {
            next: self.next,
            current: self.current,
            line: self.line,
            column: self.column,
        }
    }

    /// Restore a position taken with [`Cursor::mark`].
    #[inline]
    pub fn reset(&mut self, mark: Mark) {
        self.next = mark.next;
        self.current = mark.current;
        self.line = mark.line;
        self.column = mark.column;
    }

    /// Byte offset of the current character.
    #[inline(always)]
    fn offset(&self) -> usize {
        self.next - self.current.map_or(0, char::len_utf8)
    }

    /// Consume characters while `pred` holds and return them.
    ///
    /// Position tracking is the same as for repeated [`Cursor::read`] calls.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.offset();
        while let Some(c) = self.current {
            if !pred(c) {
                break;
            }
            self.read();
        }
        &self.input[start..self.offset()]
    }

    /// Consume characters up to the next `stop` byte and return them,
    /// starting with the current character.
    ///
    /// On success the cursor rests on `stop`. If `stop` never occurs the
    /// rest of the input is consumed and `None` is returned with the cursor
    /// at end of input. `stop` must be ASCII.
    pub fn take_until(&mut self, stop: u8) -> Option<&'a str> {
        let start = self.offset();
        let bytes = self.input.as_bytes();

        let Some(pos) = memchr(stop, &bytes[start..]) else {
            while !self.is_eof() {
                self.read();
            }
            return None;
        };
        if pos == 0 {
            return Some("");
        }

        let run = &self.input[start..start + pos];
        // The current character was already counted when it was read.
        let first_len = self.current.map_or(0, char::len_utf8);
        let rest = &run[first_len..];

        let mut newlines = 0u32;
        let mut last_newline = None;
        for at in memchr_iter(b'\n', rest.as_bytes()) {
            newlines += 1;
            last_newline = Some(at);
        }
        match last_newline {
            Some(at) => {
                self.line += newlines;
                self.column = rest[at + 1..].chars().count() as u32;
            }
            None => self.column += rest.chars().count() as u32,
        }

        // Land on the stop character.
        self.next = start + pos + 1;
        self.current = Some(stop as char);
        self.column += 1;
        if stop == b'\n' {
            self.line += 1;
            self.column = 0;
        }
        Some(run)
    }
}
