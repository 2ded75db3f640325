//! Document tree types.
//!
//! The tree is a strict ownership hierarchy: a [`Document`] owns its root
//! [`Element`], and every element owns its attributes and children. There are
//! no parent links; the parser keeps open elements on its own stack instead.
//!
//! Names and attribute keys are validated when they enter the tree, and text
//! must not be blank, so every tree that can be built can also be written and
//! read back.

use std::collections::BTreeMap;
use std::mem;

use crate::chars;
use crate::error::InvalidArgument;

/// Declaration line of an HTML document.
pub const HTML_DOCTYPE: &str = "<!DOCTYPE html>";

/// Declaration line of an XML document.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" ?>";

/// Document mode, fixed when the document is created.
///
/// The mode only determines the declaration line written before the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Starts with `<!DOCTYPE html>`.
    Html,
    /// Starts with `<?xml version="1.0" ?>`.
    Xml,
}

impl DocumentKind {
    /// The declaration line for this mode, without a line break.
    #[inline]
    pub const fn declaration(self) -> &'static str {
        match self {
            DocumentKind::Html => HTML_DOCTYPE,
            DocumentKind::Xml => XML_DECLARATION,
        }
    }
}

/// A document: a fixed declaration and at most one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    kind: DocumentKind,
    root: Option<Element>,
}

impl Document {
    /// Create an empty document of the given kind.
    pub fn new(kind: DocumentKind) -> Self {
        Self { kind, root: None }
    }

    /// Create an empty HTML document.
    pub fn html() -> Self {
        Self::new(DocumentKind::Html)
    }

    /// Create an empty XML document.
    pub fn xml() -> Self {
        Self::new(DocumentKind::Xml)
    }

    /// The document mode.
    #[inline]
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// The declaration line written before the root.
    #[inline]
    pub fn declaration(&self) -> &'static str {
        self.kind.declaration()
    }

    /// The root element, if one was attached.
    #[inline]
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Mutable access to the root element.
    #[inline]
    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.root.as_mut()
    }

    /// Attach the root element, replacing any previous root.
    ///
    /// Returns the replaced root.
    pub fn set_root(&mut self, root: Element) -> Option<Element> {
        self.root.replace(root)
    }

    /// Builder form of [`Document::set_root`].
    pub fn with_root(mut self, root: Element) -> Self {
        self.root = Some(root);
        self
    }

    /// Detach and return the root element.
    pub fn take_root(&mut self) -> Option<Element> {
        self.root.take()
    }
}

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An element node.
    Element,
    /// A text node.
    Text,
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// A run of text.
    Text(Text),
}

impl Node {
    /// The kind of this node.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
        }
    }

    /// The element, if this node is one.
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// The text node, if this node is one.
    #[inline]
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }
}

/// A run of non-blank text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    text: String,
    indented: bool,
}

impl Text {
    /// Create a text node that renders inline.
    ///
    /// Fails if the text is blank.
    pub fn new(text: impl Into<String>) -> Result<Self, InvalidArgument> {
        let text = text.into();
        if chars::is_blank(&text) {
            return Err(InvalidArgument::BlankText);
        }
        Ok(Self {
            text,
            indented: false,
        })
    }

    /// The text content.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the node gets its own indented line when its parent
    /// renders children as a block.
    #[inline]
    pub fn is_indented(&self) -> bool {
        self.indented
    }

    /// Set the indentation flag.
    #[inline]
    pub fn set_indented(&mut self, indented: bool) {
        self.indented = indented;
    }
}

/// An element with a validated name, sorted attributes and ordered children.
///
/// Dropping, cloning, comparing and rendering walk the subtree with an
/// explicit work list, so nesting depth is bounded by memory only.
#[derive(Debug)]
pub struct Element {
    name: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Node>,
    prevent_indent: bool,
}

impl Element {
    /// Create an element with the given name.
    ///
    /// Fails if the name is empty or does not match the name grammar.
    ///
    /// ```rust
    /// use simplexml_core::Element;
    ///
    /// assert!(Element::new("body").is_ok());
    /// assert!(Element::new("\tbody").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidArgument> {
        let name = name.into();
        if !chars::is_name(&name) {
            return Err(InvalidArgument::ElementName(name));
        }
        Ok(Self {
            name,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            prevent_indent: false,
        })
    }

    /// Create an element whose single child is the given text.
    pub fn new_with_text(
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, InvalidArgument> {
        Self::new(name)?.with_text(text)
    }

    /// The element name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attributes in key order.
    #[inline]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// The value of one attribute. Bare attributes have an empty value.
    #[inline]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// All children in insertion order.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in insertion order, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Child text contents in insertion order, skipping elements.
    pub fn child_texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.children
            .iter()
            .filter_map(Node::as_text)
            .map(Text::text)
    }

    /// Whether this element was attached to render inline with its siblings.
    #[inline]
    pub fn prevent_indent(&self) -> bool {
        self.prevent_indent
    }

    /// Add or overwrite an attribute.
    ///
    /// An empty value renders as a bare key.
    pub fn add_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, InvalidArgument> {
        let key = key.into();
        if !chars::is_name(&key) {
            return Err(InvalidArgument::AttributeKey(key));
        }
        self.attributes.insert(key, value.into());
        Ok(self)
    }

    /// Add or overwrite an attribute with an empty value.
    pub fn add_empty_attribute(
        &mut self,
        key: impl Into<String>,
    ) -> Result<&mut Self, InvalidArgument> {
        self.add_attribute(key, String::new())
    }

    /// Append a child element that is indented on its own line.
    pub fn add_child(&mut self, child: Element) -> &mut Self {
        self.attach(child, false)
    }

    /// Append a child element that renders without surrounding whitespace.
    ///
    /// Use this inside running text, where indentation would become content.
    pub fn add_inline_child(&mut self, child: Element) -> &mut Self {
        self.attach(child, true)
    }

    fn attach(&mut self, mut child: Element, prevent_indent: bool) -> &mut Self {
        child.prevent_indent = prevent_indent;
        self.children.push(Node::Element(child));
        self
    }

    /// Append text, merging it into the last child if that is already text.
    ///
    /// Fails if the text is blank.
    pub fn add_text(&mut self, text: impl Into<String>) -> Result<&mut Self, InvalidArgument> {
        let text = text.into();
        if chars::is_blank(&text) {
            return Err(InvalidArgument::BlankText);
        }
        match self.children.last_mut() {
            Some(Node::Text(last)) => last.text.push_str(&text),
            _ => self.children.push(Node::Text(Text {
                text,
                indented: true,
            })),
        }
        Ok(self)
    }

    /// Append an existing text node, keeping its indentation flag.
    ///
    /// If the last child is already text, the content is merged into it and
    /// that node's flag is kept instead.
    pub fn add_text_node(&mut self, text: Text) -> &mut Self {
        match self.children.last_mut() {
            Some(Node::Text(last)) => last.text.push_str(&text.text),
            _ => self.children.push(Node::Text(text)),
        }
        self
    }

    /// Builder form of [`Element::add_attribute`].
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, InvalidArgument> {
        self.add_attribute(key, value)?;
        Ok(self)
    }

    /// Builder form of [`Element::add_empty_attribute`].
    pub fn with_empty_attribute(mut self, key: impl Into<String>) -> Result<Self, InvalidArgument> {
        self.add_empty_attribute(key)?;
        Ok(self)
    }

    /// Builder form of [`Element::add_child`].
    pub fn with_child(mut self, child: Element) -> Self {
        self.add_child(child);
        self
    }

    /// Builder form of [`Element::add_inline_child`].
    pub fn with_inline_child(mut self, child: Element) -> Self {
        self.add_inline_child(child);
        self
    }

    /// Builder form of [`Element::add_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Result<Self, InvalidArgument> {
        self.add_text(text)?;
        Ok(self)
    }

    /// Builder form of [`Element::add_text_node`].
    pub fn with_text_node(mut self, text: Text) -> Self {
        self.add_text_node(text);
        self
    }

    /// Copy of this element without its children.
    fn shallow_clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            children: Vec::with_capacity(self.children.len()),
            prevent_indent: self.prevent_indent,
        }
    }
}

impl Clone for Element {
    fn clone(&self) -> Self {
        let mut open = Vec::new();
        let mut children = self.children.iter();
        let mut copy = self.shallow_clone();
        loop {
            match children.next() {
                Some(Node::Text(text)) => copy.children.push(Node::Text(text.clone())),
                Some(Node::Element(child)) => {
                    let parent = mem::replace(&mut copy, child.shallow_clone());
                    open.push((mem::replace(&mut children, child.children.iter()), parent));
                }
                None => {
                    let Some((rest, parent)) = open.pop() else {
                        return copy;
                    };
                    let done = mem::replace(&mut copy, parent);
                    copy.children.push(Node::Element(done));
                    children = rest;
                }
            }
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.name != b.name
                || a.prevent_indent != b.prevent_indent
                || a.attributes != b.attributes
                || a.children.len() != b.children.len()
            {
                return false;
            }
            for pair in a.children.iter().zip(&b.children) {
                match pair {
                    (Node::Element(x), Node::Element(y)) => pending.push((x, y)),
                    (Node::Text(x), Node::Text(y)) if x == y => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Eq for Element {}

impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}
