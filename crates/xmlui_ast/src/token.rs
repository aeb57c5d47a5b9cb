//! Tokens produced by the script lexer.

use crate::syntax_kind::SyntaxKind;
use crate::types::TokenFlags;
use serde::Serialize;
use xmlui_core::text::TextPos;

/// A scanned token with its full source location.
///
/// Offsets count characters; lines and columns are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: SyntaxKind,
    /// The exact source text of the token.
    pub text: String,
    pub start_position: TextPos,
    pub end_position: TextPos,
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub end_column: u32,
    #[serde(skip)]
    pub flags: TokenFlags,
}

impl Token {
    /// A zero-length end-of-file token at the given location.
    pub fn eof(position: TextPos, line: u32, column: u32) -> Self {
        Self {
            kind: SyntaxKind::EndOfFileToken,
            text: String::new(),
            start_position: position,
            end_position: position,
            start_line: line,
            end_line: line,
            start_column: column,
            end_column: column,
            flags: TokenFlags::NONE,
        }
    }

    /// The length of this token in characters.
    pub fn len(&self) -> u32 {
        self.end_position - self.start_position
    }

    pub fn is_empty(&self) -> bool {
        self.start_position == self.end_position
    }

    #[inline]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }

    /// Whether there was a line break before this token.
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }
}
