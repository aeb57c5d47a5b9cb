//! xmlui_markup: Lexer and raw parser for UEML markup.
//!
//! UEML is an XML dialect: elements with optional namespaces, attributes in
//! three quote styles whose values may hold `{expr}` bindings, comments,
//! CDATA sections and verbatim `<script>` blocks. This crate turns source
//! text into a tree of [`UemlNode`]s; giving the tree meaning is left to the
//! transformer.

pub mod entities;
mod lexer;
mod node;
mod parser;
mod token;

pub use entities::decode_entities;
pub use lexer::{LexerMode, MarkupLexer};
pub use node::{Attribute, ElementNode, QualifiedName, Span, TextContent, UemlNode};
pub use parser::{parse_markup, MarkupParser};
pub use token::{MarkupToken, MarkupTokenKind};
