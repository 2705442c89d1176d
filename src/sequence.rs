use crate::parser::Parser;
use crate::state::State;

/// Parser combinator that runs a list of parsers in order and collects their results
///
/// Any failure fails the whole sequence with that failure. An empty list succeeds with an
/// empty vector.
pub struct Sequence<P> {
    parsers: Vec<P>,
}

impl<P> Parser for Sequence<P>
where
    P: Parser,
{
    type Output = Vec<P::Output>;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        self.parsers.iter().map(|parser| parser.parse(state)).collect()
    }
}

pub fn sequence<P>(parsers: impl IntoIterator<Item = P>) -> Sequence<P>
where
    P: Parser,
{
    Sequence {
        parsers: parsers.into_iter().collect(),
    }
}
