use crate::parser::Parser;
use crate::state::State;

/// Parser combinator that applies a parser exactly `count` times in sequence
pub struct Times<P> {
    parser: P,
    count: usize,
}

impl<P> Times<P> {
    /// Panics if `count` is zero: a grammar asking for no repetitions is malformed, not
    /// an input that fails to parse
    pub fn new(parser: P, count: usize) -> Self {
        assert!(count >= 1, "number of repetitions must be at least 1, got {}", count);
        Times { parser, count }
    }
}

impl<P> Parser for Times<P>
where
    P: Parser,
{
    type Output = Vec<P::Output>;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let mut results = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            results.push(self.parser.parse(state)?);
        }
        Ok(results)
    }
}

/// Convenience function to create a Times parser
pub fn times<P: Parser>(parser: P, count: usize) -> Times<P> {
    Times::new(parser, count)
}

/// Extension trait to add .times() method support for parsers
pub trait TimesExt: Parser + Sized {
    fn times(self, count: usize) -> Times<Self> {
        Times::new(self, count)
    }
}

impl<P> TimesExt for P where P: Parser {}
