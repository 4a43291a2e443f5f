use crate::ast::{Attribute, Element, Node};
use crate::error::{ParseError, ParseResult};
use crate::escape::decode_entities;
use crate::tokenizer::{tokenize, tokenize_tag, TagToken, Token};
use std::ops::Range;

/// Parser behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject stray or mismatched close tags and unclosed elements instead of
    /// recovering from them the way a browser would.
    pub strict: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Parser for the layout markup subset
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
    options: ParseOptions,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, options: ParseOptions) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            pos: 0,
            options,
        }
    }

    /// Parse the whole source into a node forest
    pub fn parse_document(&mut self) -> ParseResult<Vec<Node>> {
        let mut roots: Vec<Node> = Vec::new();
        let mut stack: Vec<Element> = Vec::new();

        while let Some((token, span)) = self.advance() {
            match token {
                Token::Text(text) => {
                    append(&mut stack, &mut roots, Node::text(decode_entities(text)));
                }
                Token::Lt => {
                    append(&mut stack, &mut roots, Node::text("<"));
                }
                Token::Comment(raw) => {
                    let content = &raw[4..raw.len() - 3];
                    append(
                        &mut stack,
                        &mut roots,
                        Node::Comment {
                            content: content.to_string(),
                        },
                    );
                }
                Token::Doctype(raw) => {
                    let content = raw[2..raw.len() - 1].trim();
                    append(
                        &mut stack,
                        &mut roots,
                        Node::Doctype {
                            content: content.to_string(),
                        },
                    );
                }
                Token::OpenTag(raw) => {
                    let (element, self_closing) = parse_open_tag(raw, span.start)?;
                    if self_closing || element.is_void() {
                        append(&mut stack, &mut roots, Node::Element(element));
                    } else {
                        stack.push(element);
                    }
                }
                Token::CloseTag(raw) => {
                    let name = raw[2..raw.len() - 1].trim().to_ascii_lowercase();
                    self.close_element(&name, span.start, &mut stack, &mut roots)?;
                }
            }
        }

        if let Some(open) = stack.last() {
            if self.options.strict {
                return Err(ParseError::unexpected_eof(
                    self.source.len(),
                    format!("</{}>", open.tag_name),
                ));
            }
        }

        while let Some(element) = stack.pop() {
            append(&mut stack, &mut roots, Node::Element(element));
        }

        Ok(roots)
    }

    fn close_element(
        &self,
        name: &str,
        pos: usize,
        stack: &mut Vec<Element>,
        roots: &mut Vec<Node>,
    ) -> ParseResult<()> {
        let Some(index) = stack.iter().rposition(|open| open.tag_name == name) else {
            if self.options.strict {
                let expected = stack
                    .last()
                    .map(|open| format!("</{}>", open.tag_name))
                    .unwrap_or_else(|| "an open tag or text".to_string());
                return Err(ParseError::unexpected_token(pos, expected, format!("</{}>", name)));
            }
            // Stray close tag
            return Ok(());
        };

        if self.options.strict && index != stack.len() - 1 {
            let top = &stack[stack.len() - 1];
            return Err(ParseError::unexpected_token(
                pos,
                format!("</{}>", top.tag_name),
                format!("</{}>", name),
            ));
        }

        while stack.len() > index {
            if let Some(element) = stack.pop() {
                append(stack, roots, Node::Element(element));
            }
        }

        Ok(())
    }

    fn advance(&mut self) -> Option<(Token<'src>, Range<usize>)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }
}

/// Attach a finished node to the innermost open element, or to the roots.
/// Adjacent text nodes are merged.
fn append(stack: &mut [Element], roots: &mut Vec<Node>, node: Node) {
    let siblings = match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None => roots,
    };

    if let Node::Text { content } = &node {
        if let Some(Node::Text { content: previous }) = siblings.last_mut() {
            previous.push_str(content);
            return;
        }
    }

    siblings.push(node);
}

/// Build an element from a raw open tag such as `<img src="a.png"/>`.
/// Returns the element and whether the tag was self-closing.
fn parse_open_tag(raw: &str, pos: usize) -> ParseResult<(Element, bool)> {
    let inner = &raw[1..raw.len() - 1];
    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(stripped) => (stripped, true),
        None => (inner, false),
    };

    let mut tokens = tokenize_tag(inner).into_iter().peekable();

    let mut element = match tokens.next() {
        Some(TagToken::Word(name)) => Element::new(name),
        _ => return Err(ParseError::invalid_syntax(pos, "Expected tag name")),
    };

    while let Some(token) = tokens.next() {
        let TagToken::Word(name) = token else {
            // Stray `=` or quoted value without a name
            continue;
        };

        let name = name.to_ascii_lowercase();
        let value = if tokens.peek() == Some(&TagToken::Equals) {
            tokens.next();
            match tokens.peek() {
                Some(TagToken::Quoted(value)) | Some(TagToken::Word(value)) => {
                    let value = decode_entities(value);
                    tokens.next();
                    Some(value)
                }
                _ => Some(String::new()),
            }
        } else {
            None
        };

        // First occurrence wins, as in browsers
        if !element.has_attribute(&name) {
            element.attributes.push(Attribute { name, value });
        }
    }

    Ok((element, self_closing))
}

/// Parse markup leniently
pub fn parse(source: &str) -> ParseResult<Vec<Node>> {
    parse_with_options(source, ParseOptions::default())
}

pub fn parse_with_options(source: &str, options: ParseOptions) -> ParseResult<Vec<Node>> {
    Parser::new(source, options).parse_document()
}

/// Parse a serialized fragment and return its first element
pub fn parse_element(source: &str) -> ParseResult<Option<Element>> {
    let nodes = parse(source)?;
    Ok(nodes.into_iter().find_map(|node| match node {
        Node::Element(element) => Some(element),
        _ => None,
    }))
}
