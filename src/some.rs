use super::parser::Parser;
use crate::state::State;

/// Parser combinator that matches one or more occurrences of the given parser
///
/// Runs like `many` and then requires a non-empty result. With zero repetitions it fails
/// with the inner parser's own failure value, leaving the cursor where that attempt did.
pub struct AtLeastOne<P> {
    parser: P,
}

impl<P> AtLeastOne<P> {
    pub fn new(parser: P) -> Self {
        AtLeastOne { parser }
    }
}

impl<P> Parser for AtLeastOne<P>
where
    P: Parser,
{
    type Output = Vec<P::Output>;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let mut results = Vec::new();

        loop {
            let before = state.index();
            match self.parser.parse(state) {
                Ok(value) => {
                    results.push(value);
                    if state.index() == before {
                        break;
                    }
                }
                Err(e) if results.is_empty() => return Err(e),
                Err(_) => break,
            }
        }

        Ok(results)
    }
}

/// Convenience function to create an AtLeastOne parser
pub fn some<P>(parser: P) -> AtLeastOne<P>
where
    P: Parser,
{
    AtLeastOne::new(parser)
}

/// Extension trait to add .some() method support for parsers
pub trait SomeExt: Parser + Sized {
    fn some(self) -> AtLeastOne<Self> {
        AtLeastOne::new(self)
    }
}

impl<P> SomeExt for P where P: Parser {}
