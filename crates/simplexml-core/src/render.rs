//! Serialization of the document tree.
//!
//! The output grammar is exactly what [`crate::parser::Parser`] accepts:
//! children indent by two spaces per level, an element whose only child is
//! text stays on one line, and a first child attached with
//! [`Element::add_inline_child`] switches its parent to inline rendering.

use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::ast::{Document, Element, Node, Text};
use crate::error::Error;
use crate::escape::encode;

#[inline]
fn indent<W: fmt::Write>(out: &mut W, level: usize) -> fmt::Result {
    for _ in 0..level {
        out.write_str("  ")?;
    }
    Ok(())
}

/// Pending work of the walk in [`Element::render`].
enum Step<'a> {
    Node(&'a Node, usize),
    /// Closing tag; the flag tells whether the children were a block.
    Close(&'a Element, usize, bool),
}

impl Element {
    /// Write this element and its subtree at the given indentation level.
    pub fn render<W: fmt::Write>(&self, out: &mut W, level: usize) -> fmt::Result {
        let mut steps = Vec::new();
        self.render_open(out, level, &mut steps)?;
        while let Some(step) = steps.pop() {
            match step {
                Step::Node(Node::Element(element), level) => {
                    element.render_open(out, level, &mut steps)?
                }
                Step::Node(Node::Text(text), level) => text.render(out, level)?,
                Step::Close(element, level, block) => {
                    if block {
                        indent(out, level)?;
                    }
                    out.write_str("</")?;
                    out.write_str(&encode(element.name()))?;
                    out.write_str(">\n")?;
                }
            }
        }
        Ok(())
    }

    /// Write the opening tag, then queue the children and the closing tag.
    fn render_open<'a, W: fmt::Write>(
        &'a self,
        out: &mut W,
        level: usize,
        steps: &mut Vec<Step<'a>>,
    ) -> fmt::Result {
        if !self.prevent_indent() {
            indent(out, level)?;
        }
        out.write_char('<')?;
        out.write_str(&encode(self.name()))?;
        for (key, value) in self.attributes() {
            out.write_char(' ')?;
            out.write_str(&encode(key))?;
            if !value.is_empty() {
                out.write_str("=\"")?;
                out.write_str(&encode(value))?;
                out.write_char('"')?;
            }
        }

        let children = self.children();
        let Some(first) = children.first() else {
            out.write_str(" />")?;
            if !self.prevent_indent() {
                out.write_char('\n')?;
            }
            return Ok(());
        };

        let inline = match first {
            Node::Text(_) => children.len() == 1,
            Node::Element(element) => element.prevent_indent(),
        };
        let child_level = if inline { 0 } else { level + 1 };

        out.write_char('>')?;
        if child_level != 0 {
            out.write_char('\n')?;
        }
        steps.push(Step::Close(self, level, child_level != 0));
        steps.extend(children.iter().rev().map(|child| Step::Node(child, child_level)));
        Ok(())
    }
}

impl Text {
    /// Write this text node.
    ///
    /// Indented text at a non-zero level gets its own line; otherwise the
    /// text is written with no surrounding whitespace.
    pub fn render<W: fmt::Write>(&self, out: &mut W, level: usize) -> fmt::Result {
        if self.is_indented() && level != 0 {
            indent(out, level)?;
            out.write_str(&encode(self.text()))?;
            out.write_char('\n')
        } else {
            out.write_str(&encode(self.text()))
        }
    }
}

impl Node {
    /// Write this node at the given indentation level.
    #[inline]
    pub fn render<W: fmt::Write>(&self, out: &mut W, level: usize) -> fmt::Result {
        match self {
            Node::Element(element) => element.render(out, level),
            Node::Text(text) => text.render(out, level),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.declaration())?;
        f.write_char('\n')?;
        match self.root() {
            Some(root) => root.render(f, 0),
            None => Ok(()),
        }
    }
}

impl Document {
    /// Render the document into a string.
    ///
    /// ```rust
    /// use simplexml_core::{Document, Element};
    ///
    /// let doc = Document::xml().with_root(Element::new("root").unwrap());
    /// assert_eq!(doc.to_xml_string(), "<?xml version=\"1.0\" ?>\n<root />\n");
    /// ```
    pub fn to_xml_string(&self) -> String {
        self.to_string()
    }

    /// Write the document to a sink and flush it.
    pub fn write_to<W: Write>(&self, mut sink: W) -> io::Result<()> {
        write!(sink, "{self}")?;
        sink.flush()
    }

    /// Write the document to a file, creating or truncating it.
    ///
    /// The file is flushed and closed on every path, also when no root is set.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        log::debug!(
            target: "simplexml.writer",
            "writing {:?} document to {}",
            self.kind(),
            path.display()
        );
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        Ok(())
    }
}
