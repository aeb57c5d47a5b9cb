//! Splits attribute and text values into literal text and `{...}` bindings.

use memchr::memchr2;
use xmlui_ast::node::Expression;
use xmlui_core::text::{LineAndColumn, LineMap, TextPos};
use xmlui_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use xmlui_parser::Parser;

use crate::component::{PropertyValue, ValuePart};

/// Parse a markup value.
///
/// `\{` stands for a literal `{` and `\\` for one backslash; any other
/// backslash is kept. Each unescaped `{` opens a binding that ends at its
/// matching `}`, skipping braces inside quoted strings.
pub fn parse_property_value(text: &str) -> Result<PropertyValue, Diagnostic> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut next_id = 0;
    let mut pos = 0;

    while let Some(offset) = memchr2(b'{', b'\\', &bytes[pos..]) {
        let at = pos + offset;
        literal.push_str(&text[pos..at]);
        if bytes[at] == b'\\' {
            match bytes.get(at + 1) {
                Some(&escaped @ (b'{' | b'\\')) => {
                    literal.push(escaped as char);
                    pos = at + 2;
                }
                _ => {
                    literal.push('\\');
                    pos = at + 1;
                }
            }
            continue;
        }

        let Some(close) = matching_brace(bytes, at) else {
            return Err(error_at(text, at, &messages::UNCLOSED_EXPRESSION_0, &[&text[at..]]));
        };
        let source = &text[at + 1..close];
        let expression = parse_binding(source, &mut next_id)
            .map_err(|reason| error_at(text, at, &messages::INVALID_EXPRESSION_0_1, &[source, &reason]))?;
        if !literal.is_empty() {
            parts.push(ValuePart::Text(std::mem::take(&mut literal)));
        }
        parts.push(ValuePart::Expression(expression));
        pos = close + 1;
    }
    literal.push_str(&text[pos..]);
    if !literal.is_empty() {
        parts.push(ValuePart::Text(literal));
    }

    let has_expression = parts.iter().any(|p| matches!(p, ValuePart::Expression(_)));
    if !has_expression {
        let value = match parts.pop() {
            Some(ValuePart::Text(text)) => text,
            _ => String::new(),
        };
        return Ok(PropertyValue::Single { value });
    }
    if parts.len() == 1 {
        if let Some(ValuePart::Expression(expression)) = parts.pop() {
            return Ok(PropertyValue::SingleExpression { expression });
        }
    }
    Ok(PropertyValue::Compound { parts })
}

/// Byte offset of the `}` closing the `{` at `open`.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = open;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

/// Parses the text of one binding; the error is the reason text.
fn parse_binding(source: &str, next_id: &mut u32) -> Result<Expression, String> {
    let mut parser = Parser::with_id_base(source, *next_id);
    let expression = match parser.parse_expr() {
        Ok(Some(expression)) => expression,
        Ok(None) => return Err(Diagnostic::new(&messages::EXPRESSION_EXPECTED, &[]).text),
        Err(err) => return Err(err.message().to_string()),
    };
    if !parser.is_eof() {
        let tail = parser.get_tail();
        return Err(Diagnostic::new(&messages::UNEXPECTED_TOKEN_0, &[&tail]).text);
    }
    *next_id = parser.next_node_id();
    Ok(expression)
}

fn error_at(text: &str, byte: usize, message: &DiagnosticMessage, args: &[&str]) -> Diagnostic {
    let position = text[..byte].chars().count() as TextPos;
    let LineAndColumn { line, column } = LineMap::new(text).locate(position);
    Diagnostic::at(message, args, position, line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(text: &str) -> String {
        match parse_property_value(text).unwrap() {
            PropertyValue::Single { value } => value,
            other => panic!("expected a literal, got {:?}", other),
        }
    }

    #[test]
    fn test_matching_brace_skips_strings() {
        let text = "{a ? '}' : \"{\"} tail";
        assert_eq!(matching_brace(text.as_bytes(), 0), Some(14));
        assert_eq!(matching_brace(b"{ {a} ", 0), None);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(literal("hello \\{abs"), "hello {abs");
        assert_eq!(literal("a\\b"), "a\\b");
        assert_eq!(literal(""), "");
    }

    #[test]
    fn test_double_backslash_leaves_brace_open() {
        assert_eq!(literal("a\\\\b"), "a\\b");
        assert_eq!(literal("a\\\\\\{b"), "a\\{b");
        match parse_property_value("x\\\\{y}").unwrap() {
            PropertyValue::Compound { parts } => {
                assert!(matches!(&parts[0], ValuePart::Text(t) if t == "x\\"));
                assert!(matches!(parts[1], ValuePart::Expression(_)));
            }
            other => panic!("expected a compound value, got {:?}", other),
        }
    }

    #[test]
    fn test_error_location() {
        let err = parse_property_value("line\n  {a +").unwrap_err();
        assert_eq!((err.line, err.column, err.position), (1, 2, 7));
    }
}
