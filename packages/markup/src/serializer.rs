use crate::ast::{Element, Node};
use crate::escape::{escape_attribute, escape_text};

/// Serializer output switches
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Indent element-only content, one element per line
    pub pretty: bool,
    /// Indentation string for pretty output
    pub indent: String,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
        }
    }
}

impl SerializeOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

/// Serializer converts a node tree back to markup.
///
/// Compact output matches what a browser reports as outer HTML: attributes in
/// their original order, void elements without a closing tag. Pretty output
/// only breaks lines around element-only content, so text stays byte-for-byte
/// identical after a re-parse.
pub struct Serializer {
    options: SerializeOptions,
    depth: usize,
}

impl Serializer {
    pub fn new(options: SerializeOptions) -> Self {
        Self { options, depth: 0 }
    }

    pub fn serialize_nodes(&mut self, nodes: &[Node]) -> String {
        let mut output = String::new();
        for (i, node) in nodes.iter().enumerate() {
            if self.options.pretty {
                if node.is_blank_text() {
                    continue;
                }
                if i > 0 && !output.is_empty() {
                    output.push('\n');
                }
            }
            self.write_node(node, &mut output);
        }
        output
    }

    pub fn serialize_element(&mut self, element: &Element) -> String {
        let mut output = String::new();
        self.write_element(element, &mut output);
        output
    }

    fn write_node(&mut self, node: &Node, output: &mut String) {
        match node {
            Node::Element(element) => self.write_element(element, output),
            Node::Text { content } => output.push_str(&escape_text(content)),
            Node::Comment { content } => {
                output.push_str("<!--");
                output.push_str(content);
                output.push_str("-->");
            }
            Node::Doctype { content } => {
                output.push_str("<!");
                output.push_str(content);
                output.push('>');
            }
        }
    }

    fn write_element(&mut self, element: &Element, output: &mut String) {
        output.push('<');
        output.push_str(&element.tag_name);

        for attr in &element.attributes {
            output.push(' ');
            output.push_str(&attr.name);
            if let Some(value) = &attr.value {
                output.push_str("=\"");
                output.push_str(&escape_attribute(value));
                output.push('"');
            }
        }
        output.push('>');

        if element.is_void() {
            return;
        }

        if self.options.pretty && is_block_content(&element.children) {
            self.depth += 1;
            for child in element.children.iter().filter(|child| !child.is_blank_text()) {
                output.push('\n');
                self.write_indent(output);
                self.write_node(child, output);
            }
            self.depth -= 1;
            output.push('\n');
            self.write_indent(output);
        } else {
            for child in &element.children {
                self.write_node(child, output);
            }
        }

        output.push_str("</");
        output.push_str(&element.tag_name);
        output.push('>');
    }

    fn write_indent(&self, output: &mut String) {
        for _ in 0..self.depth {
            output.push_str(&self.options.indent);
        }
    }
}

/// Content made only of elements, comments and whitespace can be re-indented
/// without changing its meaning.
fn is_block_content(children: &[Node]) -> bool {
    children.iter().any(|child| matches!(child, Node::Element(_)))
        && children
            .iter()
            .all(|child| !matches!(child, Node::Text { .. }) || child.is_blank_text())
}

/// Compact serialization of a node forest
pub fn serialize(nodes: &[Node]) -> String {
    Serializer::new(SerializeOptions::default()).serialize_nodes(nodes)
}

/// Compact serialization of one element (its outer markup)
pub fn outer_html(element: &Element) -> String {
    Serializer::new(SerializeOptions::default()).serialize_element(element)
}

/// Serialization of an element's children only
pub fn inner_html(element: &Element) -> String {
    serialize(&element.children)
}
