//! xmlui_scanner: Lexer for XMLUIScript source code.
//!
//! Produces tokens with full position metadata from a shared
//! [`InputStream`](xmlui_core::InputStream):
//! - longest-match operators (`>>>=` before `>>>` before `>>=` before `>>`)
//! - decimal, hex, binary, real and exponent numerals with `_` separators
//! - string literals in three quote styles
//! - whitespace and comment trivia, returned only on request
//!
//! Malformed input never panics; it yields an `Unknown` token that the parser
//! reports.

pub mod char_codes;
mod lexer;
pub mod literals;

pub use lexer::Lexer;
pub use xmlui_ast::token::Token;
