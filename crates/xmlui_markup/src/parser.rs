//! Builds the raw UEML tree from markup tokens.

use log::trace;
use xmlui_diagnostics::{messages, Diagnostic, DiagnosticMessage};

use crate::entities::decode_entities;
use crate::lexer::{MarkupLexer, SCRIPT_END, SCRIPT_START};
use crate::node::{Attribute, ElementNode, QualifiedName, Span, TextContent, UemlNode};
use crate::token::{MarkupToken, MarkupTokenKind};

/// Parse markup source into its top-level nodes.
pub fn parse_markup(source: &str) -> Result<Vec<UemlNode>, Diagnostic> {
    MarkupParser::new(source).parse()
}

/// Parses UEML. Open elements are kept on an explicit stack, so nesting
/// depth is bounded by memory rather than by the call stack.
pub struct MarkupParser {
    lexer: MarkupLexer,
}

impl MarkupParser {
    pub fn new(source: &str) -> Self {
        Self {
            lexer: MarkupLexer::new(source),
        }
    }

    pub fn parse(mut self) -> Result<Vec<UemlNode>, Diagnostic> {
        let mut roots = Vec::new();
        let mut open: Vec<ElementNode> = Vec::new();
        loop {
            let token = self.lexer.get(false);
            let node = match token.kind {
                MarkupTokenKind::EndOfFile => {
                    if let Some(element) = open.last() {
                        return Err(span_error(
                            &messages::UNCLOSED_ELEMENT_0,
                            &[&element.name.to_string()],
                            element.span,
                        ));
                    }
                    trace!("parsed {} top-level markup node(s)", roots.len());
                    return Ok(roots);
                }
                MarkupTokenKind::Text => UemlNode::Text(TextContent {
                    text: decode_entities(&token.text).into_owned(),
                    span: span_of(&token, &token),
                }),
                MarkupTokenKind::Comment => {
                    UemlNode::Comment(inner_content(&token, "<!--", "-->"))
                }
                MarkupTokenKind::CData => {
                    UemlNode::HardLiteral(inner_content(&token, "<![CDATA[", "]]>"))
                }
                MarkupTokenKind::Script => {
                    UemlNode::ScriptLiteral(inner_content(&token, SCRIPT_START, SCRIPT_END))
                }
                MarkupTokenKind::OpenNodeStart => {
                    let (element, self_closing) = self.parse_start_tag(&token)?;
                    if !self_closing {
                        open.push(element);
                        continue;
                    }
                    UemlNode::Element(element)
                }
                MarkupTokenKind::CloseNodeStart => {
                    let name = self.parse_tag_name()?;
                    let end = self.expect_tag_end()?;
                    let Some(mut element) = open.pop() else {
                        return Err(token_error(&messages::UNEXPECTED_CHARACTER_0, &[&token.text], &token));
                    };
                    if element.name != name {
                        return Err(token_error(
                            &messages::CLOSING_TAG_MISMATCH_0_1,
                            &[&element.name.to_string(), &name.to_string()],
                            &token,
                        ));
                    }
                    element.span.end = end.end_position;
                    UemlNode::Element(element)
                }
                MarkupTokenKind::Unknown => return Err(unknown_token_error(&token)),
                _ => {
                    return Err(token_error(&messages::UNEXPECTED_CHARACTER_0, &[&token.text], &token))
                }
            };
            match open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => roots.push(node),
            }
        }
    }

    /// Parses a start tag after its `<`. Returns the element and whether the
    /// tag closed itself with `/>`.
    fn parse_start_tag(&mut self, start: &MarkupToken) -> Result<(ElementNode, bool), Diagnostic> {
        let name = self.parse_tag_name()?;
        let mut attributes: Vec<Attribute> = Vec::new();
        loop {
            let token = self.lexer.peek(false);
            match token.kind {
                MarkupTokenKind::NodeEnd | MarkupTokenKind::NodeClose => {
                    self.lexer.get(false);
                    let element = ElementNode {
                        name,
                        attributes,
                        children: Vec::new(),
                        span: span_of(start, &token),
                    };
                    return Ok((element, token.kind == MarkupTokenKind::NodeClose));
                }
                MarkupTokenKind::Identifier => {
                    let attribute = self.parse_attribute()?;
                    if attributes.iter().any(|a| a.name == attribute.name) {
                        return Err(span_error(
                            &messages::DUPLICATE_ATTRIBUTE_0,
                            &[&attribute.name.to_string()],
                            attribute.span,
                        ));
                    }
                    attributes.push(attribute);
                }
                MarkupTokenKind::EndOfFile => {
                    return Err(token_error(&messages::TAG_END_EXPECTED, &[], &token));
                }
                MarkupTokenKind::Unknown => return Err(unknown_token_error(&token)),
                _ => return Err(token_error(&messages::ATTRIBUTE_NAME_EXPECTED, &[], &token)),
            }
        }
    }

    fn parse_attribute(&mut self) -> Result<Attribute, Diagnostic> {
        let start = self.lexer.peek(false);
        let name = self.parse_name(&messages::ATTRIBUTE_NAME_EXPECTED)?;
        if !self.lexer.peek(false).is(MarkupTokenKind::Equal) {
            return Ok(Attribute {
                name,
                value: None,
                span: span_of(&start, &start),
            });
        }
        self.lexer.get(false);
        let token = self.lexer.get(false);
        match token.kind {
            MarkupTokenKind::StringLiteral => {
                let raw = &token.text[1..token.text.len() - 1];
                Ok(Attribute {
                    name,
                    value: Some(decode_entities(raw).into_owned()),
                    span: span_of(&start, &token),
                })
            }
            MarkupTokenKind::Unknown => Err(unknown_token_error(&token)),
            MarkupTokenKind::EndOfFile => Err(token_error(&messages::TAG_END_EXPECTED, &[], &token)),
            _ => Err(token_error(&messages::UNEXPECTED_CHARACTER_0, &[&token.text], &token)),
        }
    }

    /// The name right after `<` or `</`; no whitespace may come between.
    fn parse_tag_name(&mut self) -> Result<QualifiedName, Diagnostic> {
        let next = self.lexer.peek(true);
        if next.kind.is_trivia() {
            return Err(token_error(&messages::TAG_NAME_EXPECTED, &[], &next));
        }
        self.parse_name(&messages::TAG_NAME_EXPECTED)
    }

    /// `name` or `namespace:name`.
    fn parse_name(&mut self, message: &DiagnosticMessage) -> Result<QualifiedName, Diagnostic> {
        let first = self.lexer.get(false);
        if !first.is(MarkupTokenKind::Identifier) {
            return Err(token_error(message, &[], &first));
        }
        if !self.lexer.peek(false).is(MarkupTokenKind::Colon) {
            return Ok(QualifiedName::new(first.text));
        }
        self.lexer.get(false);
        let second = self.lexer.get(false);
        if !second.is(MarkupTokenKind::Identifier) {
            return Err(token_error(message, &[], &second));
        }
        Ok(QualifiedName {
            namespace: Some(first.text),
            name: second.text,
        })
    }

    fn expect_tag_end(&mut self) -> Result<MarkupToken, Diagnostic> {
        let token = self.lexer.get(false);
        match token.kind {
            MarkupTokenKind::NodeEnd => Ok(token),
            MarkupTokenKind::Unknown => Err(unknown_token_error(&token)),
            _ => Err(token_error(&messages::TAG_END_EXPECTED, &[], &token)),
        }
    }
}

fn span_of(start: &MarkupToken, end: &MarkupToken) -> Span {
    Span {
        start: start.start_position,
        end: end.end_position,
        line: start.start_line,
        column: start.start_column,
    }
}

fn inner_content(token: &MarkupToken, open: &str, close: &str) -> TextContent {
    let text = &token.text;
    let end = text.len().saturating_sub(close.len()).max(open.len());
    TextContent {
        text: text.get(open.len()..end).unwrap_or_default().to_string(),
        span: span_of(token, token),
    }
}

fn token_error(message: &DiagnosticMessage, args: &[&str], token: &MarkupToken) -> Diagnostic {
    Diagnostic::at(
        message,
        args,
        token.start_position,
        token.start_line,
        token.start_column,
    )
}

fn span_error(message: &DiagnosticMessage, args: &[&str], span: Span) -> Diagnostic {
    Diagnostic::at(message, args, span.start, span.line, span.column)
}

/// Maps an `Unknown` token to the error for what it started as.
fn unknown_token_error(token: &MarkupToken) -> Diagnostic {
    let text = token.text.as_str();
    if text.starts_with("<!--") {
        token_error(&messages::UNTERMINATED_0, &["comment"], token)
    } else if text.starts_with("<![CDATA[") {
        token_error(&messages::UNTERMINATED_0, &["CDATA section"], token)
    } else if text.starts_with(SCRIPT_START) {
        token_error(&messages::UNTERMINATED_0, &["script"], token)
    } else if text.starts_with(['\'', '"', '`']) {
        token_error(&messages::UNTERMINATED_STRING, &[], token)
    } else {
        token_error(&messages::UNEXPECTED_CHARACTER_0, &[text], token)
    }
}
