use serde::{Deserialize, Serialize};

use crate::style::StyleMap;

/// Elements that never have children or a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

/// Markup node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Element(Element),
    Text { content: String },
    Comment { content: String },
    Doctype { content: String },
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// True for text nodes made only of whitespace
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text { content } if content.trim().is_empty())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Single attribute. `value` is `None` for bare boolean attributes (`<video muted>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// Element node. Attribute order is preserved so serialization is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag_name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn is_void(&self) -> bool {
        is_void_element(&self.tag_name)
    }

    /// Attribute value. Boolean attributes read as the empty string.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_deref().unwrap_or(""))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
    }

    /// Set or overwrite an attribute, keeping its original position
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|attr| attr.name == name)?;
        self.attributes.remove(pos).value.or_else(|| Some(String::new()))
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Parsed inline `style` attribute
    pub fn style(&self) -> StyleMap {
        self.attribute("style")
            .map(StyleMap::parse)
            .unwrap_or_default()
    }

    /// Write a style map back onto the element. An empty map removes the attribute.
    pub fn set_style(&mut self, styles: &StyleMap) {
        if styles.is_empty() {
            self.remove_attribute("style");
        } else {
            self.set_attribute("style", styles.to_string());
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Replace every child with a single text node
    pub fn set_text_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.children.clear();
        if !content.is_empty() {
            self.children.push(Node::Text { content });
        }
    }

    /// Depth-first search over descendant elements (self excluded)
    pub fn find_descendant<F>(&self, predicate: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool + Copy,
    {
        for child in self.child_elements() {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(predicate) {
                return Some(found);
            }
        }
        None
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text { content } => out.push_str(content),
            Node::Element(element) => collect_text(&element.children, out),
            Node::Comment { .. } | Node::Doctype { .. } => {}
        }
    }
}
