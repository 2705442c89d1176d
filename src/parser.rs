use crate::state::State;

/// Core parser trait for parser combinators
///
/// A parser inspects the state, possibly moves the cursor, and returns either a success
/// value or a failure value. Failures are ordinary data: nothing is thrown and nothing is
/// rolled back unless a combinator says so. Primitives leave the cursor where it was when
/// they fail; compound parsers may leave it wherever their failing part stopped.
pub trait Parser {
    type Output;
    type Error;

    /// Attempt to parse at the current cursor position
    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error>;
}

impl<P: Parser + ?Sized> Parser for &P {
    type Output = P::Output;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        (**self).parse(state)
    }
}

/// Parser built from a closure over the state
pub struct FromFn<F> {
    f: F,
}

impl<F, T, E> Parser for FromFn<F>
where
    F: Fn(&mut State<'_>) -> Result<T, E>,
{
    type Output = T;
    type Error = E;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        (self.f)(state)
    }
}

/// Adapt a closure into a parser
///
/// The closure owns the same responsibilities as any other parser: it decides where the
/// cursor is left on failure.
pub fn from_fn<F, T, E>(f: F) -> FromFn<F>
where
    F: Fn(&mut State<'_>) -> Result<T, E>,
{
    FromFn { f }
}
