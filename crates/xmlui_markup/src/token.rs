//! Tokens produced by the markup lexer.

use serde::Serialize;
use xmlui_core::text::TextPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarkupTokenKind {
    EndOfFile,
    /// Malformed input: a stray character or an unterminated span.
    Unknown,
    /// Whitespace between the parts of a tag.
    Whitespace,
    /// `<`
    OpenNodeStart,
    /// `</`
    CloseNodeStart,
    /// `>`
    NodeEnd,
    /// `/>`
    NodeClose,
    /// `=`
    Equal,
    /// `:`
    Colon,
    Identifier,
    /// A quoted attribute value, quotes included.
    StringLiteral,
    /// Character data between tags.
    Text,
    /// `<!-- ... -->`
    Comment,
    /// `<![CDATA[ ... ]]>`
    CData,
    /// `<script> ... </script>`
    Script,
}

impl MarkupTokenKind {
    pub fn is_trivia(self) -> bool {
        self == MarkupTokenKind::Whitespace
    }
}

/// A scanned markup token. Offsets count characters; lines and columns are
/// 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupToken {
    #[serde(rename = "type")]
    pub kind: MarkupTokenKind,
    pub text: String,
    pub start_position: TextPos,
    pub end_position: TextPos,
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub end_column: u32,
}

impl MarkupToken {
    #[inline]
    pub fn is(&self, kind: MarkupTokenKind) -> bool {
        self.kind == kind
    }
}
