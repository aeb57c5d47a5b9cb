use std::fmt;

use xmlui_ast::token::Token;
use xmlui_ast::syntax_kind::SyntaxKind;
use xmlui_diagnostics::{Diagnostic, DiagnosticMessage};

pub type ParseResult<T> = Result<T, ParserError>;

/// A fatal syntax error. Carries the coded diagnostic and the text of the
/// token the parser stopped at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    pub diagnostic: Diagnostic,
    pub token_text: String,
}

impl ParserError {
    pub fn at_token(message: &DiagnosticMessage, args: &[&str], token: &Token) -> Self {
        Self {
            diagnostic: Diagnostic::at(
                message,
                args,
                token.start_position,
                token.start_line,
                token.start_column,
            ),
            token_text: if token.kind == SyntaxKind::EndOfFileToken {
                String::new()
            } else {
                token.text.clone()
            },
        }
    }

    pub fn code(&self) -> &'static str {
        self.diagnostic.code
    }

    pub fn message(&self) -> &str {
        &self.diagnostic.text
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        self.diagnostic
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}:{}): {}",
            self.diagnostic.code,
            self.diagnostic.line + 1,
            self.diagnostic.column + 1,
            self.diagnostic.text
        )
    }
}

impl std::error::Error for ParserError {}

impl From<ParserError> for Diagnostic {
    fn from(err: ParserError) -> Self {
        err.diagnostic
    }
}
