//! xmlui_parser: Recursive descent parser for XMLUIScript.
//!
//! Consumes tokens from [`xmlui_scanner::Lexer`] and produces the statement
//! and expression trees defined in `xmlui_ast`, together with a
//! [`PositionTable`](xmlui_ast::PositionTable) holding each node's source
//! range.

mod error;
mod parser;
pub mod precedence;
pub mod utilities;

pub use error::{ParseResult, ParserError};
pub use parser::Parser;
