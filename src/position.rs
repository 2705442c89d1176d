use crate::error::Fail;
use crate::parser::Parser;
use crate::state::State;
use std::ops::Range;

/// A half-open range `[start, end)` of codepoint offsets consumed by a parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Extract the spanned text from the original input string
    pub fn extract(&self, input: &str) -> String {
        input.chars().skip(self.start).take(self.len()).collect()
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.as_range()
    }
}

/// A parser combinator that captures the span of a successful parse
pub struct WithRange<P> {
    parser: P,
}

impl<P> Parser for WithRange<P>
where
    P: Parser,
{
    type Output = (P::Output, Span);
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let start = state.index();
        let output = self.parser.parse(state)?;
        Ok((output, Span::new(start, state.index())))
    }
}

/// Extension trait to add span capture to any parser
pub trait WithRangeExt: Parser + Sized {
    /// Pair the result with the `[start, end)` span it consumed
    fn with_range(self) -> WithRange<Self> {
        WithRange { parser: self }
    }
}

impl<P> WithRangeExt for P where P: Parser {}

/// Convenience function to create a WithRange combinator
pub fn with_range<P: Parser>(parser: P) -> WithRange<P> {
    WithRange { parser }
}

/// Parser that yields the current cursor offset without consuming anything
pub struct Index;

impl Parser for Index {
    type Output = usize;
    type Error = Fail;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        Ok(state.index())
    }
}

pub fn index() -> Index {
    Index
}
