//! Source location tracking
//!
//! Every token carries a span so errors can point at the offending text.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Offset 0, line 1, column 1
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Advance position by one character. Tabs stop every 4 columns. A lone `\r` counts
    /// as a line break; use [`Position::advance_before`] when the next character is known.
    pub fn advance(self, ch: char) -> Self {
        self.advance_before(ch, None)
    }

    /// Advance by `ch` given the character after it, so `\r\n` breaks the line once
    pub fn advance_before(self, ch: char, next: Option<char>) -> Self {
        match ch {
            '\r' if next == Some('\n') => Self {
                offset: self.offset + 1,
                ..self
            },
            '\n' | '\r' => Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            },
            '\t' => Self {
                offset: self.offset + 1,
                line: self.line,
                column: self.column + 4 - ((self.column - 1) % 4),
            },
            _ => Self {
                offset: self.offset + ch.len_utf8(),
                line: self.line,
                column: self.column + 1,
            },
        }
    }

    pub fn advance_str(self, s: &str) -> Self {
        let mut chars = s.chars().peekable();
        let mut pos = self;
        while let Some(ch) = chars.next() {
            pos = pos.advance_before(ch, chars.peek().copied());
        }
        pos
    }

    /// Advance by n bytes of known single-line ASCII
    pub fn advance_bytes(self, n: usize) -> Self {
        Self {
            offset: self.offset + n,
            line: self.line,
            column: self.column + n as u32,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start (inclusive) to end (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Byte length
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Source text covered by this span
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start.offset..self.end.offset]
    }

    /// Placeholder span for values that did not come from source text
    pub fn dummy() -> Self {
        Self {
            start: Position::start(),
            end: Position::start(),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line index over a source text, used to render errors
#[derive(Debug, Clone)]
pub struct SourceMap {
    pub source: String,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .char_indices()
                    .filter(|&(offset, ch)| {
                        ch == '\n' || (ch == '\r' && !source[offset + 1..].starts_with('\n'))
                    })
                    .map(|(offset, _)| offset + 1),
            )
            .collect();

        Self {
            source,
            line_starts,
        }
    }

    /// Line and column for a byte offset
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count();

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Line text by 1-based number, without its terminator
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        let line_idx = (line_num as usize).checked_sub(1)?;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .copied()
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches(['\n', '\r']))
    }

    /// Format an error message with the offending line underlined
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let mut result = format!(
            "Error: {}\n  --> {}:{}\n",
            message, span.start.line, span.start.column
        );

        if let Some(line) = self.get_line(span.start.line) {
            let line_num_str = span.start.line.to_string();
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!("{} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, line));

            let line_width = line.chars().count();
            let lead = (span.start.column as usize).saturating_sub(1);
            let carets = if span.start.line == span.end.line {
                (span.end.column.saturating_sub(span.start.column)) as usize
            } else {
                line_width.saturating_sub(lead)
            };

            result.push_str(&format!(
                "{} | {}{}\n",
                padding,
                " ".repeat(lead),
                "^".repeat(carets.max(1))
            ));
        }

        result
    }
}
