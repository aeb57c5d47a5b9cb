//! Parser utility functions.

use xmlui_ast::syntax_kind::SyntaxKind;

/// Check if a token kind can start a statement.
pub fn can_start_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenBraceToken
            | SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::SemicolonToken
            | SyntaxKind::ExportKeyword
            | SyntaxKind::ImportKeyword
    ) || can_start_expression(kind)
}

/// Check if a token kind can start an expression.
pub fn can_start_expression(kind: SyntaxKind) -> bool {
    kind.is_identifier_like()
        || matches!(
            kind,
            SyntaxKind::NumericLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::UndefinedKeyword
                | SyntaxKind::InfinityKeyword
                | SyntaxKind::NaNKeyword
                | SyntaxKind::DotDotDotToken
                // The parser reports these as invalid tokens
                | SyntaxKind::Unknown
        )
        || is_unary_operator(kind)
        || is_update_operator(kind)
}

/// Prefix operators producing a `UnaryE`.
pub fn is_unary_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::TypeofKeyword
            | SyntaxKind::DeleteKeyword
    )
}

/// `++` and `--`.
pub fn is_update_operator(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
}

/// Tokens allowed as a property name after `.` or as an object literal key.
pub fn is_property_name(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || kind.is_keyword()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_starts() {
        assert!(can_start_statement(SyntaxKind::VarKeyword));
        assert!(can_start_statement(SyntaxKind::Identifier));
        assert!(can_start_statement(SyntaxKind::OfKeyword));
        assert!(!can_start_statement(SyntaxKind::CloseBraceToken));
        assert!(!can_start_statement(SyntaxKind::EndOfFileToken));
        assert!(!can_start_statement(SyntaxKind::CaseKeyword));
    }

    #[test]
    fn test_property_names_include_keywords() {
        assert!(is_property_name(SyntaxKind::DefaultKeyword));
        assert!(is_property_name(SyntaxKind::Identifier));
        assert!(!is_property_name(SyntaxKind::NumericLiteral));
    }
}
