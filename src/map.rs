use super::parser::Parser;
use crate::state::State;

/// Parser combinator that transforms the output of a parser using a mapping function
pub struct Map<P, F> {
    parser: P,
    mapper: F,
}

impl<P, F> Map<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        Map { parser, mapper }
    }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    type Output = U;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        self.parser.parse(state).map(&self.mapper)
    }
}

/// Parser combinator that replaces a successful result with a constant
pub struct To<P, T> {
    parser: P,
    value: T,
}

impl<P, T> Parser for To<P, T>
where
    P: Parser,
    T: Clone,
{
    type Output = T;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        self.parser.parse(state)?;
        Ok(self.value.clone())
    }
}

/// Convenience function to create a Map parser
pub fn map<P, F, U>(parser: P, mapper: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    Map::new(parser, mapper)
}

/// Extension trait to add .map() and .to() method support for parsers
pub trait MapExt: Parser + Sized {
    fn map<F, U>(self, mapper: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        Map::new(self, mapper)
    }

    /// Discard the result and yield `value` instead
    fn to<T: Clone>(self, value: T) -> To<Self, T> {
        To {
            parser: self,
            value,
        }
    }
}

/// Implement MapExt for all parsers
impl<P> MapExt for P where P: Parser {}
