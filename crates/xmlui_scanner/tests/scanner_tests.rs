//! Lexer integration tests.
//!
//! Verifies that the lexer correctly tokenizes XMLUIScript constructs.

use xmlui_ast::syntax_kind::SyntaxKind;
use xmlui_ast::types::TokenFlags;
use xmlui_scanner::{Lexer, Token};

/// Helper: scan all significant tokens from source.
fn scan_tokens(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.get(false);
        if token.kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push(token);
    }
    tokens
}

/// Helper: scan all tokens as (kind, text) pairs.
fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    scan_tokens(source)
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
}

#[test]
fn test_whitespace_only() {
    assert!(scan_all("   \n\t  ").is_empty());
}

#[test]
fn test_numeric_literals_keep_text_and_length() {
    for text in [
        "0", "42", "3.14", ".5", "1.", "1e5", "1E+5", "2.5e-3", "0xFF", "0X1f", "0b1010",
        "1_000_000", "0xFF_FF", "0b10_01", "1_0.2_5e1_0",
    ] {
        let tokens = scan_tokens(text);
        assert_eq!(tokens.len(), 1, "{}", text);
        let token = &tokens[0];
        assert_eq!(token.kind, SyntaxKind::NumericLiteral, "{}", text);
        assert_eq!(token.text, text);
        assert_eq!(token.start_position, 0);
        assert_eq!(token.end_position, token.start_position + text.chars().count() as u32);
    }
}

#[test]
fn test_radix_prefixes_set_flags() {
    let hex = &scan_tokens("0xFF_FF")[0];
    assert!(hex.flags.contains(TokenFlags::HEX_SPECIFIER));
    assert!(!hex.flags.contains(TokenFlags::BINARY_SPECIFIER));
    let binary = &scan_tokens("0b10")[0];
    assert!(binary.flags.contains(TokenFlags::BINARY_SPECIFIER));
}

#[test]
fn test_incomplete_numerals_are_unknown() {
    for text in ["0x", "0b", "1e", "1e+", "1_", "0x_1"] {
        let kinds = scan_kinds(text);
        assert_eq!(kinds[0], SyntaxKind::Unknown, "{}", text);
    }
}

#[test]
fn test_string_literals_keep_raw_text() {
    let tokens = scan_all(r#""hello" 'world' `tick`"#);
    assert_eq!(
        tokens,
        vec![
            (SyntaxKind::StringLiteral, "\"hello\"".to_string()),
            (SyntaxKind::StringLiteral, "'world'".to_string()),
            (SyntaxKind::StringLiteral, "`tick`".to_string()),
        ]
    );
    let tokens = scan_all(r#""a\"b""#);
    assert_eq!(tokens[0].1, r#""a\"b""#);
}

#[test]
fn test_unterminated_strings_are_unknown() {
    assert_eq!(scan_kinds("'abc"), vec![SyntaxKind::Unknown]);
    assert_eq!(scan_kinds("\"ab\ncd\"")[0], SyntaxKind::Unknown);
    assert_eq!(scan_kinds("`multi\nline`"), vec![SyntaxKind::StringLiteral]);
}

#[test]
fn test_longest_match_operators() {
    assert_eq!(
        scan_kinds(">>>= >>> >>= >> >= >"),
        vec![
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken,
            SyntaxKind::GreaterThanGreaterThanEqualsToken,
            SyntaxKind::GreaterThanGreaterThanToken,
            SyntaxKind::GreaterThanEqualsToken,
            SyntaxKind::GreaterThanToken,
        ]
    );
    assert_eq!(
        scan_kinds("a>>>=b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_punctuation_and_optional_chaining() {
    assert_eq!(
        scan_kinds("a?.b ?? c ??= d ... ?.[0]"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::CloseBracketToken,
        ]
    );
    // `?.5` is a conditional followed by a number
    assert_eq!(
        scan_kinds("x?.5:1"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::NumericLiteral,
        ]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        scan_kinds("var let const function typeof Infinity NaN foo $bar _baz"),
        vec![
            SyntaxKind::VarKeyword,
            SyntaxKind::LetKeyword,
            SyntaxKind::ConstKeyword,
            SyntaxKind::FunctionKeyword,
            SyntaxKind::TypeofKeyword,
            SyntaxKind::InfinityKeyword,
            SyntaxKind::NaNKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_trivia_on_request() {
    let mut lexer = Lexer::new("a // note\n/* block */b");
    let mut kinds = Vec::new();
    loop {
        let token = lexer.get(true);
        if token.kind == SyntaxKind::EndOfFileToken {
            break;
        }
        kinds.push(token.kind);
    }
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::WhitespaceTrivia,
            SyntaxKind::SingleLineCommentTrivia,
            SyntaxKind::NewLineTrivia,
            SyntaxKind::MultiLineCommentTrivia,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_unterminated_block_comment() {
    let mut lexer = Lexer::new("/* never closed");
    assert_eq!(lexer.get(true).kind, SyntaxKind::Unknown);
}

#[test]
fn test_token_positions_are_monotonic() {
    let tokens = scan_tokens("let x = a +\n  foo(1, 'two');");
    for pair in tokens.windows(2) {
        assert!(pair[0].end_position <= pair[1].start_position);
    }
    let foo = tokens.iter().find(|t| t.text == "foo").unwrap();
    assert_eq!((foo.start_line, foo.start_column), (1, 2));
    assert_eq!(foo.start_position, 14);
    assert!(foo.has_preceding_line_break());
}

#[test]
fn test_unknown_character() {
    let tokens = scan_all("a # b");
    assert_eq!(tokens[1], (SyntaxKind::Unknown, "#".to_string()));
}

#[test]
fn test_tail_from() {
    let mut lexer = Lexer::new("a + b } rest");
    lexer.get(false);
    let next = lexer.peek(false);
    assert_eq!(lexer.tail_from(next.start_position), "+ b } rest");
}
