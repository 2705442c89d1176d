use crate::parser::Parser;
use crate::state::State;

/// Parser combinator that chooses the next parser from the result of the previous one
///
/// This is monadic bind: the first parser runs, its value is handed to `next`, and the
/// parser `next` returns is run from wherever the first one stopped. A failure of the first
/// parser short-circuits without calling `next`.
pub struct Bind<P, G> {
    parser: P,
    next: G,
}

impl<P, G, Q> Parser for Bind<P, G>
where
    P: Parser,
    G: Fn(P::Output) -> Q,
    Q: Parser<Error = P::Error>,
{
    type Output = Q::Output;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let value = self.parser.parse(state)?;
        (self.next)(value).parse(state)
    }
}

/// Convenience function to create a Bind parser
pub fn bind<P, G, Q>(parser: P, next: G) -> Bind<P, G>
where
    P: Parser,
    G: Fn(P::Output) -> Q,
    Q: Parser<Error = P::Error>,
{
    Bind { parser, next }
}

/// Extension trait to add .bind() method support for parsers
pub trait BindExt: Parser + Sized {
    fn bind<G, Q>(self, next: G) -> Bind<Self, G>
    where
        G: Fn(Self::Output) -> Q,
        Q: Parser<Error = Self::Error>,
    {
        Bind { parser: self, next }
    }
}

impl<P> BindExt for P where P: Parser {}
