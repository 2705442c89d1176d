use super::parser::Parser;
use crate::state::State;

/// Parser combinator that sequences two parsers and returns both results as a tuple
///
/// Equivalent to `p1.bind(|a| p2.map(|b| (a, b)))`. If either side fails, the failure is
/// returned as is and the cursor stays wherever the failing side left it.
///
/// Note: When chaining multiple `.and()` calls, this produces nested tuples like
/// `(((a, b), c), d)` rather than flat tuples like `(a, b, c, d)`. Use `sequence` or
/// `template` when a flat result is wanted.
pub struct And<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> And<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        And { parser1, parser2 }
    }
}

impl<P1, P2> Parser for And<P1, P2>
where
    P1: Parser,
    P2: Parser<Error = P1::Error>,
{
    type Output = (P1::Output, P2::Output);
    type Error = P1::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let result1 = self.parser1.parse(state)?;
        let result2 = self.parser2.parse(state)?;
        Ok((result1, result2))
    }
}

/// Sequence two parsers, keeping only the left result
pub struct Left<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Parser for Left<P1, P2>
where
    P1: Parser,
    P2: Parser<Error = P1::Error>,
{
    type Output = P1::Output;
    type Error = P1::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let result = self.parser1.parse(state)?;
        self.parser2.parse(state)?;
        Ok(result)
    }
}

/// Sequence two parsers, keeping only the right result
pub struct Right<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Parser for Right<P1, P2>
where
    P1: Parser,
    P2: Parser<Error = P1::Error>,
{
    type Output = P2::Output;
    type Error = P1::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        self.parser1.parse(state)?;
        self.parser2.parse(state)
    }
}

/// Convenience function to create an And parser
pub fn and<P1, P2>(parser1: P1, parser2: P2) -> And<P1, P2>
where
    P1: Parser,
    P2: Parser<Error = P1::Error>,
{
    And::new(parser1, parser2)
}

/// Extension trait to add .and(), .left() and .right() method support for parsers
pub trait AndExt: Parser + Sized {
    fn and<P>(self, other: P) -> And<Self, P>
    where
        P: Parser<Error = Self::Error>,
    {
        And::new(self, other)
    }

    fn left<P>(self, other: P) -> Left<Self, P>
    where
        P: Parser<Error = Self::Error>,
    {
        Left {
            parser1: self,
            parser2: other,
        }
    }

    fn right<P>(self, other: P) -> Right<Self, P>
    where
        P: Parser<Error = Self::Error>,
    {
        Right {
            parser1: self,
            parser2: other,
        }
    }
}

/// Implement AndExt for all parsers
impl<P> AndExt for P where P: Parser {}
