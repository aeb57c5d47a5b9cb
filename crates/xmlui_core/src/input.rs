//! Position-tracking character cursor shared by the script and markup lexers.

use crate::text::TextPos;

/// A cursor over source text that tracks the character offset, the 0-based
/// line and the 0-based column of the next character to read.
#[derive(Debug, Clone)]
pub struct InputStream {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl InputStream {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 0,
            column: 0,
        }
    }

    /// The next character, without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// The character `n` positions after the next one (`ahead(0) == peek()`).
    #[inline]
    pub fn ahead(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    /// Consume and return the next character.
    pub fn get(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Whether the remaining input starts with `text`.
    pub fn starts_with(&self, text: &str) -> bool {
        let mut offset = self.pos;
        for ch in text.chars() {
            if self.chars.get(offset) != Some(&ch) {
                return false;
            }
            offset += 1;
        }
        true
    }

    /// Offset of the next occurrence of `text` at or after the cursor.
    pub fn find(&self, text: &str) -> Option<usize> {
        let needle: Vec<char> = text.chars().collect();
        if needle.is_empty() {
            return Some(self.pos);
        }
        self.chars[self.pos..]
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
            .map(|idx| self.pos + idx)
    }

    /// Consume characters up to (not including) `offset`.
    pub fn advance_to(&mut self, offset: usize) {
        while self.pos < offset && self.get().is_some() {}
    }

    #[inline]
    pub fn position(&self) -> TextPos {
        self.pos as TextPos
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Source text between two offsets; out-of-range bounds are clamped.
    pub fn slice(&self, start: TextPos, end: TextPos) -> String {
        let end = (end as usize).min(self.chars.len());
        let start = (start as usize).min(end);
        self.chars[start..end].iter().collect()
    }

    /// Source text from `from` to the end of the input.
    pub fn tail(&self, from: TextPos) -> String {
        self.slice(from, self.chars.len() as TextPos)
    }
}
