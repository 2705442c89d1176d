use crate::parser::Parser;
use crate::state::State;

/// Parser that applies a predicate function to filter the output of another parser
///
/// A failure of the inner parser is passed through untouched. A successful value that the
/// predicate rejects rewinds the cursor to where this parser started and fails with the
/// configured error.
pub struct FilterParser<P, F, E> {
    parser: P,
    predicate: F,
    error: E,
}

impl<P, F, E> Parser for FilterParser<P, F, E>
where
    P: Parser<Error = E>,
    F: Fn(&P::Output) -> bool,
    E: Clone,
{
    type Output = P::Output;
    type Error = E;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let start = state.index();
        let value = self.parser.parse(state)?;

        if (self.predicate)(&value) {
            Ok(value)
        } else {
            state.restore(start);
            Err(self.error.clone())
        }
    }
}

/// Extension trait to add filter methods to all parsers
pub trait FilterExt: Parser + Sized {
    /// Reject values failing `predicate` with the error type's default value
    fn filter<F>(self, predicate: F) -> FilterParser<Self, F, Self::Error>
    where
        F: Fn(&Self::Output) -> bool,
        Self::Error: Clone + Default,
    {
        FilterParser {
            parser: self,
            predicate,
            error: Self::Error::default(),
        }
    }

    /// Reject values failing `predicate` with `error`
    fn filter_or<F>(self, predicate: F, error: Self::Error) -> FilterParser<Self, F, Self::Error>
    where
        F: Fn(&Self::Output) -> bool,
        Self::Error: Clone,
    {
        FilterParser {
            parser: self,
            predicate,
            error,
        }
    }
}

impl<P: Parser> FilterExt for P {}

/// Convenience function to create a filtered parser
pub fn filter<P, F>(parser: P, predicate: F) -> FilterParser<P, F, P::Error>
where
    P: Parser,
    F: Fn(&P::Output) -> bool,
    P::Error: Clone + Default,
{
    parser.filter(predicate)
}
