use crate::parser::Parser;
use crate::state::State;
use std::borrow::Cow;

/// Parser combinator that logs the outcome of the wrapped parser
///
/// Emits a `debug` event tagged with the label and the start and end offsets. The result
/// itself is passed through unchanged.
pub struct Trace<P> {
    parser: P,
    label: Cow<'static, str>,
}

impl<P> Parser for Trace<P>
where
    P: Parser,
{
    type Output = P::Output;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let start = state.index();
        let result = self.parser.parse(state);
        match &result {
            Ok(_) => tracing::debug!(
                label = %self.label,
                start,
                end = state.index(),
                "parser succeeded"
            ),
            Err(_) => tracing::debug!(
                label = %self.label,
                start,
                end = state.index(),
                "parser failed"
            ),
        }
        result
    }
}

/// Extension trait to add .trace() method support for parsers
pub trait TraceExt: Parser + Sized {
    fn trace(self, label: impl Into<Cow<'static, str>>) -> Trace<Self> {
        Trace {
            parser: self,
            label: label.into(),
        }
    }
}

impl<P> TraceExt for P where P: Parser {}
