use super::parser::Parser;
use crate::pure::{Pure, pure};
use crate::state::State;

/// Parser combinator that tries the first parser, and if it fails, tries the second parser
///
/// This is ordered choice with commit-as-you-go semantics: the second parser starts from
/// wherever the first one left the cursor. Primitives never consume on failure, so a
/// single-primitive alternative is safe, but an alternative that can consume input and then
/// fail must be wrapped in `attempt()` to get backtracking:
///
/// ```
/// use recombine::prelude::*;
/// use recombine::text::{is_char, is_string};
/// use std::borrow::Cow;
///
/// let ab = || is_char('A').and(is_char('B')).to(Cow::Borrowed("AB"));
///
/// let committed = ab().or(is_string("AC"));
/// assert!(committed.eval("AC").is_err());
///
/// let backtracking = ab().attempt().or(is_string("AC"));
/// assert_eq!(backtracking.eval("AC").unwrap(), "AC");
/// ```
///
/// When both fail, the second parser's failure is returned.
pub struct Or<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Or<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Or { parser1, parser2 }
    }
}

impl<P1, P2> Parser for Or<P1, P2>
where
    P1: Parser,
    P2: Parser<Output = P1::Output>,
{
    type Output = P1::Output;
    type Error = P2::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        match self.parser1.parse(state) {
            Ok(result) => Ok(result),
            Err(_) => self.parser2.parse(state),
        }
    }
}

/// Extension trait to add .or() method support for parsers
pub trait OrExt: Parser + Sized {
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        P: Parser<Output = Self::Output>,
    {
        Or::new(self, other)
    }

    /// Fall back to `value` when this parser fails, without rolling back
    fn or_pure(self, value: Self::Output) -> Or<Self, Pure<Self::Output, Self::Error>>
    where
        Self::Output: Clone,
    {
        Or::new(self, pure(value))
    }
}

/// Implement OrExt for all parsers
impl<P> OrExt for P where P: Parser {}

/// Convenience function to create an Or parser
pub fn or<P1, P2>(parser1: P1, parser2: P2) -> Or<P1, P2>
where
    P1: Parser,
    P2: Parser<Output = P1::Output>,
{
    Or::new(parser1, parser2)
}

/// Ordered choice over a list of parsers of the same type
///
/// Behaves like `p0.or(p1).or(p2)...`; an empty list always fails with the default error.
pub struct Choice<P> {
    parsers: Vec<P>,
}

impl<P> Parser for Choice<P>
where
    P: Parser,
    P::Error: Default,
{
    type Output = P::Output;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let mut last_error = None;
        for parser in &self.parsers {
            match parser.parse(state) {
                Ok(result) => return Ok(result),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_default())
    }
}

pub fn choice<P>(parsers: impl IntoIterator<Item = P>) -> Choice<P>
where
    P: Parser,
    P::Error: Default,
{
    Choice {
        parsers: parsers.into_iter().collect(),
    }
}
