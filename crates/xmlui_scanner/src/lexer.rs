//! The XMLUIScript lexer.

use crate::char_codes::*;
use std::collections::VecDeque;
use xmlui_ast::syntax_kind::SyntaxKind;
use xmlui_ast::token::Token;
use xmlui_ast::types::TokenFlags;
use xmlui_core::input::InputStream;
use xmlui_core::text::TextPos;

/// Operators, longest first within each leading character.
const OPERATORS: &[(&str, SyntaxKind)] = &[
    (">>>=", SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
    ("...", SyntaxKind::DotDotDotToken),
    ("===", SyntaxKind::EqualsEqualsEqualsToken),
    ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
    ("**=", SyntaxKind::AsteriskAsteriskEqualsToken),
    ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
    (">>>", SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
    (">>=", SyntaxKind::GreaterThanGreaterThanEqualsToken),
    ("&&=", SyntaxKind::AmpersandAmpersandEqualsToken),
    ("||=", SyntaxKind::BarBarEqualsToken),
    ("??=", SyntaxKind::QuestionQuestionEqualsToken),
    ("=>", SyntaxKind::EqualsGreaterThanToken),
    ("==", SyntaxKind::EqualsEqualsToken),
    ("!=", SyntaxKind::ExclamationEqualsToken),
    ("<=", SyntaxKind::LessThanEqualsToken),
    (">=", SyntaxKind::GreaterThanEqualsToken),
    ("<<", SyntaxKind::LessThanLessThanToken),
    (">>", SyntaxKind::GreaterThanGreaterThanToken),
    ("**", SyntaxKind::AsteriskAsteriskToken),
    ("++", SyntaxKind::PlusPlusToken),
    ("--", SyntaxKind::MinusMinusToken),
    ("&&", SyntaxKind::AmpersandAmpersandToken),
    ("||", SyntaxKind::BarBarToken),
    ("??", SyntaxKind::QuestionQuestionToken),
    ("+=", SyntaxKind::PlusEqualsToken),
    ("-=", SyntaxKind::MinusEqualsToken),
    ("*=", SyntaxKind::AsteriskEqualsToken),
    ("/=", SyntaxKind::SlashEqualsToken),
    ("%=", SyntaxKind::PercentEqualsToken),
    ("&=", SyntaxKind::AmpersandEqualsToken),
    ("|=", SyntaxKind::BarEqualsToken),
    ("^=", SyntaxKind::CaretEqualsToken),
    ("{", SyntaxKind::OpenBraceToken),
    ("}", SyntaxKind::CloseBraceToken),
    ("(", SyntaxKind::OpenParenToken),
    (")", SyntaxKind::CloseParenToken),
    ("[", SyntaxKind::OpenBracketToken),
    ("]", SyntaxKind::CloseBracketToken),
    (";", SyntaxKind::SemicolonToken),
    (",", SyntaxKind::CommaToken),
    (":", SyntaxKind::ColonToken),
    ("~", SyntaxKind::TildeToken),
    (".", SyntaxKind::DotToken),
    ("<", SyntaxKind::LessThanToken),
    (">", SyntaxKind::GreaterThanToken),
    ("=", SyntaxKind::EqualsToken),
    ("!", SyntaxKind::ExclamationToken),
    ("+", SyntaxKind::PlusToken),
    ("-", SyntaxKind::MinusToken),
    ("*", SyntaxKind::AsteriskToken),
    ("/", SyntaxKind::SlashToken),
    ("%", SyntaxKind::PercentToken),
    ("&", SyntaxKind::AmpersandToken),
    ("|", SyntaxKind::BarToken),
    ("^", SyntaxKind::CaretToken),
    ("?", SyntaxKind::QuestionToken),
];

/// Converts script source text into tokens.
///
/// Tokens are scanned on demand; `peek` and `ahead` buffer them so the parser
/// can look ahead without rescanning.
pub struct Lexer {
    input: InputStream,
    /// Scanned but not yet consumed tokens, trivia included.
    buffer: VecDeque<Token>,
    /// A line break was seen since the last significant token.
    pending_line_break: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self::from_input(InputStream::new(source))
    }

    /// Create a lexer over an existing input cursor.
    pub fn from_input(input: InputStream) -> Self {
        Self {
            input,
            buffer: VecDeque::new(),
            pending_line_break: false,
        }
    }

    /// Consume and return the next token. Trivia is skipped unless
    /// `include_trivia` is set.
    pub fn get(&mut self, include_trivia: bool) -> Token {
        loop {
            let token = match self.buffer.pop_front() {
                Some(token) => token,
                None => self.scan(),
            };
            if include_trivia || !token.kind.is_trivia() {
                return token;
            }
        }
    }

    /// The next token, without consuming it.
    pub fn peek(&mut self, include_trivia: bool) -> Token {
        self.ahead(0, include_trivia)
    }

    /// The token `n` positions after the next one, without consuming anything.
    pub fn ahead(&mut self, n: usize, include_trivia: bool) -> Token {
        let mut seen = 0;
        let mut index = 0;
        loop {
            if index == self.buffer.len() {
                let token = self.scan();
                self.buffer.push_back(token);
            }
            let token = &self.buffer[index];
            if token.kind == SyntaxKind::EndOfFileToken {
                return token.clone();
            }
            if include_trivia || !token.kind.is_trivia() {
                if seen == n {
                    return token.clone();
                }
                seen += 1;
            }
            index += 1;
        }
    }

    /// Source text from `position` to the end of the input.
    pub fn tail_from(&self, position: TextPos) -> String {
        self.input.tail(position)
    }

    /// Source text between two offsets.
    pub fn source_text(&self, start: TextPos, end: TextPos) -> String {
        self.input.slice(start, end)
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    fn scan(&mut self) -> Token {
        let start = self.input.position();
        let start_line = self.input.line();
        let start_column = self.input.column();
        let mut flags = TokenFlags::NONE;

        let kind = match self.input.peek() {
            None => SyntaxKind::EndOfFileToken,
            Some(ch) if is_line_break(ch) => {
                while self.input.peek().map_or(false, is_line_break) {
                    self.input.get();
                }
                self.pending_line_break = true;
                SyntaxKind::NewLineTrivia
            }
            Some(ch) if is_white_space_single_line(ch) => {
                while self.input.peek().map_or(false, is_white_space_single_line) {
                    self.input.get();
                }
                SyntaxKind::WhitespaceTrivia
            }
            Some('/') if self.input.ahead(1) == Some('/') => {
                while self.input.peek().map_or(false, |c| !is_line_break(c)) {
                    self.input.get();
                }
                SyntaxKind::SingleLineCommentTrivia
            }
            Some('/') if self.input.ahead(1) == Some('*') => self.scan_block_comment(),
            Some('\'') | Some('"') | Some('`') => self.scan_string_literal(&mut flags),
            Some(ch) if is_digit(ch) => self.scan_number(&mut flags),
            Some('.') if self.input.ahead(1).map_or(false, is_digit) => {
                self.scan_number(&mut flags)
            }
            // `?.` followed by a digit is `?` and a number (`a?.5:b`)
            Some('?')
                if self.input.ahead(1) == Some('.')
                    && self.input.ahead(2).map_or(false, is_digit) =>
            {
                self.input.get();
                SyntaxKind::QuestionToken
            }
            Some('?') if self.input.ahead(1) == Some('.') => {
                self.input.get();
                self.input.get();
                SyntaxKind::QuestionDotToken
            }
            Some(ch) if is_identifier_start(ch) => self.scan_identifier(),
            Some(_) => self.scan_operator(),
        };

        if kind == SyntaxKind::Unknown {
            flags |= TokenFlags::IS_INVALID;
        }
        if !kind.is_trivia() && self.pending_line_break {
            flags |= TokenFlags::PRECEDING_LINE_BREAK;
            self.pending_line_break = false;
        }
        let end = self.input.position();
        Token {
            kind,
            text: self.input.slice(start, end),
            start_position: start,
            end_position: end,
            start_line,
            end_line: self.input.line(),
            start_column,
            end_column: self.input.column(),
            flags,
        }
    }

    fn scan_operator(&mut self) -> SyntaxKind {
        for (text, kind) in OPERATORS {
            if self.input.starts_with(text) {
                for _ in 0..text.len() {
                    self.input.get();
                }
                return *kind;
            }
        }
        self.input.get();
        SyntaxKind::Unknown
    }

    fn scan_block_comment(&mut self) -> SyntaxKind {
        self.input.get();
        self.input.get();
        loop {
            match self.input.get() {
                None => return SyntaxKind::Unknown,
                Some('*') if self.input.peek() == Some('/') => {
                    self.input.get();
                    return SyntaxKind::MultiLineCommentTrivia;
                }
                Some(ch) if is_line_break(ch) => self.pending_line_break = true,
                Some(_) => {}
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let mut text = String::new();
        while let Some(ch) = self.input.peek().filter(|c| is_identifier_part(*c)) {
            text.push(ch);
            self.input.get();
        }
        SyntaxKind::from_keyword(&text).unwrap_or(SyntaxKind::Identifier)
    }

    /// Scans a quoted string. The token keeps the raw text; escapes are
    /// decoded by the parser.
    fn scan_string_literal(&mut self, flags: &mut TokenFlags) -> SyntaxKind {
        let quote = self.input.get();
        loop {
            match self.input.peek() {
                None => {
                    *flags |= TokenFlags::UNTERMINATED;
                    return SyntaxKind::Unknown;
                }
                Some(ch) if Some(ch) == quote => {
                    self.input.get();
                    return SyntaxKind::StringLiteral;
                }
                Some('\\') => {
                    *flags |= TokenFlags::HAS_ESCAPE;
                    self.input.get();
                    if self.input.get().is_none() {
                        *flags |= TokenFlags::UNTERMINATED;
                        return SyntaxKind::Unknown;
                    }
                }
                Some(ch) if is_line_break(ch) && quote != Some('`') => {
                    *flags |= TokenFlags::UNTERMINATED;
                    return SyntaxKind::Unknown;
                }
                Some(_) => {
                    self.input.get();
                }
            }
        }
    }

    fn scan_number(&mut self, flags: &mut TokenFlags) -> SyntaxKind {
        let first = self.input.peek();
        let second = self.input.ahead(1);
        if first == Some('0') && matches!(second, Some('x') | Some('X')) {
            *flags |= TokenFlags::HEX_SPECIFIER;
            self.input.get();
            self.input.get();
            let valid = self.scan_digits(is_hex_digit, flags);
            return self.finish_number(valid);
        }
        if first == Some('0') && matches!(second, Some('b') | Some('B')) {
            *flags |= TokenFlags::BINARY_SPECIFIER;
            self.input.get();
            self.input.get();
            let valid = self.scan_digits(is_binary_digit, flags);
            return self.finish_number(valid);
        }

        // Decimal: an empty integer part is fine for `.5`
        let mut valid = true;
        if first != Some('.') {
            valid = self.scan_digits(is_digit, flags);
        }
        if valid && self.input.peek() == Some('.') {
            self.input.get();
            if self.input.peek().map_or(false, is_digit) {
                valid = self.scan_digits(is_digit, flags);
            }
        }
        if valid && matches!(self.input.peek(), Some('e') | Some('E')) {
            *flags |= TokenFlags::SCIENTIFIC;
            self.input.get();
            if matches!(self.input.peek(), Some('+') | Some('-')) {
                self.input.get();
            }
            valid = self.scan_digits(is_digit, flags);
        }
        self.finish_number(valid)
    }

    fn finish_number(&mut self, valid: bool) -> SyntaxKind {
        if valid {
            SyntaxKind::NumericLiteral
        } else {
            SyntaxKind::Unknown
        }
    }

    /// Scans at least one digit; `_` is accepted only between two digits.
    fn scan_digits(&mut self, is_valid: fn(char) -> bool, flags: &mut TokenFlags) -> bool {
        let mut count = 0;
        loop {
            match self.input.peek() {
                Some(ch) if is_valid(ch) => {
                    self.input.get();
                    count += 1;
                }
                Some('_') => {
                    *flags |= TokenFlags::CONTAINS_SEPARATOR;
                    self.input.get();
                    if count == 0 || !self.input.peek().map_or(false, is_valid) {
                        return false;
                    }
                }
                _ => return count > 0,
            }
        }
    }
}
