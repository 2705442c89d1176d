/// The mutable parse cursor
///
/// A `State` pairs the decoded input (a slice of Unicode scalar values) with a single
/// offset into it. It is created by an entry point for one top-level parse and handed to
/// every parser by `&mut`, so exactly one parse owns it at any time.
///
/// The offset always satisfies `0 <= index <= len`.
#[derive(Debug)]
pub struct State<'input> {
    input: &'input [char],
    index: usize,
}

impl<'input> State<'input> {
    /// Create a state positioned at the start of `input`
    pub fn new(input: &'input [char]) -> Self {
        State { input, index: 0 }
    }

    /// Current cursor offset, counted in codepoints
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the cursor back (or forward) to a previously observed offset
    ///
    /// Used by the rollback combinators. Offsets past the end are clamped to the input length.
    pub fn restore(&mut self, index: usize) {
        debug_assert!(index <= self.input.len(), "restored past end of input");
        self.index = index.min(self.input.len());
    }

    /// Get the codepoint at the cursor without consuming it
    pub fn peek(&self) -> Option<char> {
        self.input.get(self.index).copied()
    }

    /// Consume and return the codepoint at the cursor
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.index += 1;
        Some(c)
    }

    /// Consume `count` codepoints; the caller must have checked they are available
    pub(crate) fn advance_by(&mut self, count: usize) {
        debug_assert!(self.index + count <= self.input.len());
        self.index = (self.index + count).min(self.input.len());
    }

    /// The unconsumed part of the input
    pub fn remaining(&self) -> &'input [char] {
        &self.input[self.index..]
    }

    /// Check if the cursor is at the end of the input
    pub fn is_eof(&self) -> bool {
        self.index >= self.input.len()
    }

    /// Length of the whole input in codepoints
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Check if the input is empty
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Get the whole decoded input
    pub fn source(&self) -> &'input [char] {
        self.input
    }
}
