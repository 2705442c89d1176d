use crate::parser::Parser;
use crate::state::State;

/// Parser combinator that rewinds the cursor when the wrapped parser fails
///
/// This is the explicit opt-in to backtracking: `or`, `many` and `optional` never undo
/// partial consumption on their own.
pub struct Attempt<P> {
    parser: P,
}

impl<P> Parser for Attempt<P>
where
    P: Parser,
{
    type Output = P::Output;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let start = state.index();
        let result = self.parser.parse(state);
        if result.is_err() {
            state.restore(start);
        }
        result
    }
}

pub fn attempt<P: Parser>(parser: P) -> Attempt<P> {
    Attempt { parser }
}

/// Extension trait to add .attempt() method support for parsers
pub trait AttemptExt: Parser + Sized {
    fn attempt(self) -> Attempt<Self> {
        Attempt { parser: self }
    }
}

impl<P> AttemptExt for P where P: Parser {}
