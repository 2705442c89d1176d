use crate::error::Fail;
use crate::parser::Parser;
use crate::state::State;

/// Parser that consumes the longest run of codepoints satisfying a predicate
pub struct SpanWhile<F> {
    predicate: F,
}

impl<F> Parser for SpanWhile<F>
where
    F: Fn(char) -> bool,
{
    type Output = String;
    type Error = Fail;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let mut matched = String::new();
        while let Some(c) = state.peek() {
            if !(self.predicate)(c) {
                break;
            }
            matched.push(c);
            state.advance();
        }
        Ok(matched)
    }
}

/// Consume the maximal run of codepoints matching `predicate`; never fails
pub fn span<F>(predicate: F) -> SpanWhile<F>
where
    F: Fn(char) -> bool,
{
    SpanWhile { predicate }
}
