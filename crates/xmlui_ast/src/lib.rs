//! xmlui_ast: Abstract syntax tree definitions for XMLUIScript.
//!
//! Defines the token and node kinds, the statement and expression node types,
//! the position side-table that records where each node came from, and a
//! visitor for walking the tree.

pub mod helpers;
pub mod node;
pub mod position;
pub mod syntax_kind;
pub mod token;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use position::{NodePosition, PositionTable};
pub use syntax_kind::SyntaxKind;
pub use token::Token;
pub use types::*;
