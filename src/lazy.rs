use crate::parser::Parser;
use crate::state::State;

/// A lazy parser that defers the construction of the actual parser until parse time.
/// This is useful for breaking mutual recursion between parsers.
///
/// The factory runs once per invocation and its parser is dropped afterwards; nothing is
/// memoized between invocations.
pub struct Lazy<F> {
    factory: F,
}

impl<F> Lazy<F> {
    /// Create a new lazy parser with the given factory function
    pub fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<F, P> Parser for Lazy<F>
where
    F: Fn() -> P,
    P: Parser,
{
    type Output = P::Output;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let parser = (self.factory)();
        parser.parse(state)
    }
}

/// Create a lazy parser from a factory function
///
/// Rules that refer to each other are written as functions returning boxed parsers, with
/// the back-references wrapped in `lazy`:
///
/// ```
/// use recombine::prelude::*;
/// use recombine::text::is_char;
/// use recombine::{BoxedParser, lazy};
///
/// // nested = "(" nested? ")"
/// fn nested() -> BoxedParser<usize> {
///     is_char('(')
///         .right(lazy(nested).optional())
///         .left(is_char(')'))
///         .map(|inner| inner.map_or(1, |depth| depth + 1))
///         .boxed()
/// }
///
/// assert_eq!(nested().eval("((()))"), Ok(3));
/// ```
pub fn lazy<F, P>(factory: F) -> Lazy<F>
where
    F: Fn() -> P,
    P: Parser,
{
    Lazy::new(factory)
}
