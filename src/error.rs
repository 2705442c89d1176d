use thiserror::Error;

/// The default failure value: a parse did not match, with no further detail
///
/// Grammars that want a richer taxonomy replace it with their own values through
/// `error`, `filter_or` or `map_err`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[error("parse failed")]
pub struct Fail;

/// A failed top-level parse: the failure value plus the cursor offset where it happened
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{error} at offset {index}")]
pub struct Failure<E> {
    pub error: E,
    /// Cursor offset, in codepoints, at the point of failure
    pub index: usize,
}

impl<E> Failure<E> {
    pub fn new(error: E, index: usize) -> Self {
        Failure { error, index }
    }

    /// Line and column of the failure within `input`
    pub fn location(&self, input: &str) -> Location {
        Location::of(input, self.index)
    }

    /// Render the failure with a line/column header and up to two lines of context on
    /// either side, pointing at the failing column
    pub fn report(&self, input: &str) -> String
    where
        E: std::fmt::Display,
    {
        let loc = self.location(input);
        let mut out = format!(
            "{} at line {}, column {} (offset {})\n\n",
            self.error, loc.line, loc.column, self.index
        );
        for line in loc.context_lines(input) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

/// Human readable position: 1-based line, 0-based codepoint column within that line
///
/// Columns count codepoints rather than display cells; tab width and wide characters
/// depend on the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Compute the location of codepoint offset `index` in `input`
    pub fn of(input: &str, index: usize) -> Self {
        let mut line = 1;
        let mut line_start = 0;

        for (i, c) in input.chars().enumerate() {
            if i >= index {
                break;
            }
            if c == '\n' {
                line += 1;
                line_start = i + 1;
            }
        }

        Location {
            line,
            column: index.saturating_sub(line_start),
        }
    }

    fn context_lines(&self, input: &str) -> Vec<String> {
        let first = self.line.saturating_sub(2).max(1);
        let last = self.line + 2;
        let mut lines = Vec::new();

        // `split` rather than `lines` so an offset just past a trailing newline still has
        // an (empty) line to point at
        for (n, content) in input.split('\n').enumerate() {
            let number = n + 1;
            if number < first || number > last {
                continue;
            }
            let prefix = if number == self.line {
                format!("  > {} | ", number)
            } else {
                format!("    {} | ", number)
            };
            lines.push(format!("{}{}", prefix, content));
            if number == self.line {
                let offset = prefix.chars().count() + self.column;
                lines.push(format!("{}^--- here", " ".repeat(offset)));
            }
        }

        lines
    }
}
