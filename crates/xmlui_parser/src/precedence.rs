//! Operator precedence for binary operators.

use xmlui_ast::syntax_kind::SyntaxKind;

/// Operator precedence levels, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    NullishCoalescing = 1,
    LogicalOr = 2,
    LogicalAnd = 3,
    BitwiseOr = 4,
    BitwiseXor = 5,
    BitwiseAnd = 6,
    Equality = 7,
    Relational = 8,
    Shift = 9,
    Additive = 10,
    Multiplicative = 11,
    Exponentiation = 12,
    Invalid = 255,
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::BarToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::CaretToken => OperatorPrecedence::BitwiseXor,
        SyntaxKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InKeyword => OperatorPrecedence::Relational,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

/// `**` groups to the right; every other binary operator groups to the left.
pub fn is_right_associative(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::AsteriskAsteriskToken
}

/// The precedence to pass when parsing the right operand of `kind`.
pub fn right_operand_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    let precedence = get_binary_operator_precedence(kind);
    if is_right_associative(kind) {
        // One level lower, so an operator of the same level binds again.
        OperatorPrecedence::Multiplicative
    } else {
        precedence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(
            get_binary_operator_precedence(SyntaxKind::AsteriskToken)
                > get_binary_operator_precedence(SyntaxKind::PlusToken)
        );
        assert!(
            get_binary_operator_precedence(SyntaxKind::BarBarToken)
                > get_binary_operator_precedence(SyntaxKind::QuestionQuestionToken)
        );
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::InKeyword),
            OperatorPrecedence::Relational
        );
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::EqualsToken),
            OperatorPrecedence::Invalid
        );
    }

    #[test]
    fn test_exponent_is_right_associative() {
        assert!(is_right_associative(SyntaxKind::AsteriskAsteriskToken));
        assert!(
            right_operand_precedence(SyntaxKind::AsteriskAsteriskToken)
                < get_binary_operator_precedence(SyntaxKind::AsteriskAsteriskToken)
        );
        assert_eq!(
            right_operand_precedence(SyntaxKind::MinusToken),
            OperatorPrecedence::Additive
        );
    }
}
