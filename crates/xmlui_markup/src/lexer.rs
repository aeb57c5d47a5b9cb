//! The UEML markup lexer.

use std::collections::VecDeque;

use crate::token::{MarkupToken, MarkupTokenKind};
use xmlui_core::input::InputStream;
use xmlui_core::text::TextPos;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";
pub const SCRIPT_START: &str = "<script>";
pub const SCRIPT_END: &str = "</script>";

/// What the lexer is scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerMode {
    /// Character data between tags.
    Content,
    /// The inside of a start or end tag.
    Tag,
}

/// Converts markup source into tokens.
///
/// `<` and `</` push [`LexerMode::Tag`]; `>` and `/>` pop it. Comments,
/// CDATA sections and `<script>` blocks are scanned as single tokens in
/// content mode, so nothing inside them is tokenized.
pub struct MarkupLexer {
    input: InputStream,
    modes: Vec<LexerMode>,
    buffer: VecDeque<MarkupToken>,
}

impl MarkupLexer {
    pub fn new(source: &str) -> Self {
        Self {
            input: InputStream::new(source),
            modes: vec![LexerMode::Content],
            buffer: VecDeque::new(),
        }
    }

    /// The mode the next scanned token is read in.
    pub fn mode(&self) -> LexerMode {
        self.modes.last().copied().unwrap_or(LexerMode::Content)
    }

    /// Consume and return the next token. Whitespace inside tags is skipped
    /// unless `include_trivia` is set.
    pub fn get(&mut self, include_trivia: bool) -> MarkupToken {
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
    pub fn peek(&mut self, include_trivia: bool) -> MarkupToken {
        self.ahead(0, include_trivia)
    }

    /// The token `n` positions after the next one, without consuming anything.
    pub fn ahead(&mut self, n: usize, include_trivia: bool) -> MarkupToken {
        let mut seen = 0;
        let mut index = 0;
        loop {
            if index == self.buffer.len() {
                let token = self.scan();
                self.buffer.push_back(token);
            }
            let token = &self.buffer[index];
            if token.kind == MarkupTokenKind::EndOfFile {
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

    /// Source text between two offsets.
    pub fn source_text(&self, start: TextPos, end: TextPos) -> String {
        self.input.slice(start, end)
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    fn scan(&mut self) -> MarkupToken {
        let start = self.input.position();
        let start_line = self.input.line();
        let start_column = self.input.column();

        let kind = match self.mode() {
            LexerMode::Content => self.scan_content(),
            LexerMode::Tag => self.scan_tag(),
        };

        let end = self.input.position();
        MarkupToken {
            kind,
            text: self.input.slice(start, end),
            start_position: start,
            end_position: end,
            start_line,
            end_line: self.input.line(),
            start_column,
            end_column: self.input.column(),
        }
    }

    fn scan_content(&mut self) -> MarkupTokenKind {
        if self.input.is_eof() {
            return MarkupTokenKind::EndOfFile;
        }
        if self.input.starts_with(COMMENT_START) {
            return self.scan_delimited(COMMENT_START, COMMENT_END, MarkupTokenKind::Comment);
        }
        if self.input.starts_with(CDATA_START) {
            return self.scan_delimited(CDATA_START, CDATA_END, MarkupTokenKind::CData);
        }
        if self.input.starts_with(SCRIPT_START) {
            return self.scan_delimited(SCRIPT_START, SCRIPT_END, MarkupTokenKind::Script);
        }
        if self.input.starts_with("</") {
            self.input.get();
            self.input.get();
            self.modes.push(LexerMode::Tag);
            return MarkupTokenKind::CloseNodeStart;
        }
        if self.input.peek() == Some('<') {
            self.input.get();
            self.modes.push(LexerMode::Tag);
            return MarkupTokenKind::OpenNodeStart;
        }
        self.scan_text()
    }

    /// Scans a span that runs from `open` to the first `close`. Without a
    /// `close` the rest of the input becomes an `Unknown` token.
    fn scan_delimited(&mut self, open: &str, close: &str, kind: MarkupTokenKind) -> MarkupTokenKind {
        for _ in open.chars() {
            self.input.get();
        }
        match self.input.find(close) {
            Some(offset) => {
                self.input.advance_to(offset + close.chars().count());
                kind
            }
            None => {
                self.input.advance_to(self.input.len());
                MarkupTokenKind::Unknown
            }
        }
    }

    /// Text runs to the next `<`, except inside a closed `{...}` binding.
    fn scan_text(&mut self) -> MarkupTokenKind {
        while let Some(ch) = self.input.peek() {
            match ch {
                '<' => break,
                '{' => self.skip_binding(),
                '\\' if matches!(self.input.ahead(1), Some('{' | '\\')) => {
                    self.input.get();
                    self.input.get();
                }
                _ => {
                    self.input.get();
                }
            }
        }
        MarkupTokenKind::Text
    }

    /// Consumes the `{...}` binding at the cursor. An unclosed `{` is
    /// consumed alone, so the enclosing text or value ends where it would
    /// without the brace.
    fn skip_binding(&mut self) {
        let len = self.binding_len().unwrap_or(1);
        for _ in 0..len {
            self.input.get();
        }
    }

    /// Length of the binding at the cursor up to its matching `}`. Braces
    /// inside quoted strings do not count.
    fn binding_len(&self) -> Option<usize> {
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        let mut n = 0;
        while let Some(ch) = self.input.ahead(n) {
            n += 1;
            match quote {
                Some(q) => {
                    if ch == '\\' {
                        n += 1;
                    } else if ch == q {
                        quote = None;
                    }
                }
                None => match ch {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(n);
                        }
                    }
                    '\'' | '"' | '`' => quote = Some(ch),
                    _ => {}
                },
            }
        }
        None
    }

    fn scan_tag(&mut self) -> MarkupTokenKind {
        let Some(ch) = self.input.peek() else {
            return MarkupTokenKind::EndOfFile;
        };
        match ch {
            c if c.is_whitespace() => {
                while self.input.peek().map_or(false, char::is_whitespace) {
                    self.input.get();
                }
                MarkupTokenKind::Whitespace
            }
            '/' if self.input.ahead(1) == Some('>') => {
                self.input.get();
                self.input.get();
                self.pop_mode();
                MarkupTokenKind::NodeClose
            }
            '>' => {
                self.input.get();
                self.pop_mode();
                MarkupTokenKind::NodeEnd
            }
            '=' => {
                self.input.get();
                MarkupTokenKind::Equal
            }
            ':' => {
                self.input.get();
                MarkupTokenKind::Colon
            }
            '\'' | '"' | '`' => self.scan_string(ch),
            c if is_name_start(c) => {
                while self.input.peek().map_or(false, is_name_part) {
                    self.input.get();
                }
                MarkupTokenKind::Identifier
            }
            _ => {
                self.input.get();
                MarkupTokenKind::Unknown
            }
        }
    }

    /// A quoted attribute value. Quotes inside a closed `{...}` binding
    /// belong to the binding and do not close the value.
    fn scan_string(&mut self, quote: char) -> MarkupTokenKind {
        self.input.get();
        loop {
            match self.input.peek() {
                None => return MarkupTokenKind::Unknown,
                Some(ch) if ch == quote => {
                    self.input.get();
                    return MarkupTokenKind::StringLiteral;
                }
                Some('\\') if matches!(self.input.ahead(1), Some('{' | '\\')) => {
                    self.input.get();
                    self.input.get();
                }
                Some('{') => self.skip_binding(),
                Some(_) => {
                    self.input.get();
                }
            }
        }
    }

    fn pop_mode(&mut self) {
        if self.modes.len() > 1 {
            self.modes.pop();
        }
    }
}

#[inline]
pub fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[inline]
pub fn is_name_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-')
}
