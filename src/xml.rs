//! XML element tree and serialization for XOBIS output.
//!
//! Every XOBIS value knows how to render itself as an [`Element`]; this
//! module owns the tiny tree those values build and the `quick-xml` writer
//! that turns a tree into text.
//!
//! # Examples
//!
//! ```
//! use xobis::xml::{self, Element};
//!
//! let mut name = Element::new("name");
//! name.set_attr("lang", "eng");
//! name.push_text("Smith, John");
//!
//! let text = xml::element_to_string(&name).unwrap();
//! assert_eq!(text, r#"<name lang="eng">Smith, John</name>"#);
//! ```

use crate::error::Result;
use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Default namespace of XOBIS documents.
pub const XOBIS_NS: &str = "http://www.xobis.info/ns/2.0/";

/// Namespace bound to the `xlink` prefix.
pub const XLINK_NS: &str = "https://www.w3.org/1999/xlink";

/// A node in an element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Child element
    Element(Element),
    /// Character data
    Text(String),
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified element name
    pub name: String,
    /// Attributes in output order
    pub attributes: IndexMap<String, String>,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create an element holding only text.
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Element::new(name);
        element.push_text(text);
        element
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Set an attribute when a value is present.
    pub fn set_opt_attr<V: AsRef<str>>(&mut self, name: &str, value: Option<V>) {
        if let Some(value) = value {
            self.set_attr(name, value.as_ref());
        }
    }

    /// Builder-style [`Element::set_attr`].
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Append character data.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Builder-style [`Element::push`].
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    /// Append a wrapper element holding `children`, unless there are none.
    pub fn push_list(&mut self, wrapper: &str, children: Vec<Element>) {
        if children.is_empty() {
            return;
        }
        let mut list = Element::new(wrapper);
        for child in children {
            list.push(child);
        }
        self.push(list);
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Child elements in order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// All child elements with the given name.
    #[must_use]
    pub fn children_named(&self, name: &str) -> Vec<&Element> {
        self.elements().filter(|e| e.name == name).collect()
    }

    /// Follow a path of child names, taking the first match at each step.
    #[must_use]
    pub fn path(&self, names: &[&str]) -> Option<&Element> {
        names.iter().try_fold(self, |element, name| element.child(name))
    }

    /// First descendant (depth first, self excluded) with the given name.
    #[must_use]
    pub fn descendant(&self, name: &str) -> Option<&Element> {
        for child in self.elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.descendant(name) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated direct text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

/// Serialize an element (and its subtree) without an XML declaration.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn element_to_string(element: &Element) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_element(&mut writer, element)?;
    Ok(String::from_utf8_lossy(&writer.into_inner().into_inner()).into_owned())
}

/// Serialize a root element as a complete, indented XML document.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn document_to_string(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;
    let mut text = String::from_utf8_lossy(&writer.into_inner().into_inner()).into_owned();
    text.push('\n');
    Ok(text)
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
