//! Source positions.
//!
//! Offsets in this workspace count `char`s, not bytes, so a position reported
//! by the script lexer and one reported by the markup lexer refer to the same
//! place in the document.

/// A position in source text, measured in characters from the start.
pub type TextPos = u32;

/// 0-based line and character column of an offset.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    pub line: u32,
    pub column: u32,
}

/// Start offsets of every line of a text.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.chars()
                .enumerate()
                .filter(|&(_, ch)| ch == '\n')
                .map(|(i, _)| i as TextPos + 1),
        );
        Self { line_starts }
    }

    /// Line and column of `pos`. Offsets past the end land on the last line.
    pub fn locate(&self, pos: TextPos) -> LineAndColumn {
        let line = match self.line_starts.binary_search(&pos) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        LineAndColumn {
            line: line as u32,
            column: pos - self.line_starts[line],
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
