//! # Exhibit Markup
//!
//! The small HTML subset exhibition layouts are persisted in: elements,
//! attributes, inline styles and text. Parsing produces plain data
//! ([`ast::Node`]) that can be edited, compared and serialized back without a
//! browser runtime.

pub mod ast;
pub mod error;
pub mod escape;
pub mod parser;
pub mod serializer;
pub mod style;
pub mod tokenizer;

pub use ast::{Attribute, Element, Node};
pub use error::{ParseError, ParseResult};
pub use parser::{parse, parse_element, parse_with_options, ParseOptions, Parser};
pub use serializer::{inner_html, outer_html, serialize, SerializeOptions, Serializer};
pub use style::StyleMap;
pub use tokenizer::{tokenize, Token};
