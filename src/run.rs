use crate::error::Failure;
use crate::parser::Parser;
use crate::state::State;
use std::future::{Ready, ready};

/// Entry points that drive a parser over a whole input string
///
/// Each call decodes the input into codepoints once, starts a fresh cursor at offset zero
/// and runs the parser exactly once. Trailing input is not an error unless the grammar ends
/// with `eof()`.
pub trait RunExt: Parser + Sized {
    /// Parse `input`, returning the value and the final cursor offset, or the failure value
    /// and the offset where the parse stopped
    fn run(&self, input: &str) -> Result<(Self::Output, usize), Failure<Self::Error>> {
        let chars: Vec<char> = input.chars().collect();
        let mut state = State::new(&chars);
        tracing::trace!(len = chars.len(), "parse started");

        match self.parse(&mut state) {
            Ok(value) => {
                tracing::trace!(index = state.index(), "parse succeeded");
                Ok((value, state.index()))
            }
            Err(error) => {
                tracing::trace!(index = state.index(), "parse failed");
                Err(Failure::new(error, state.index()))
            }
        }
    }

    /// Parse `input`, keeping only the value or the failure value
    fn eval(&self, input: &str) -> Result<Self::Output, Self::Error> {
        self.run(input)
            .map(|(value, _)| value)
            .map_err(|failure| failure.error)
    }

    /// `run` as an already-resolved future
    fn run_ready(&self, input: &str) -> Ready<Result<(Self::Output, usize), Failure<Self::Error>>> {
        ready(self.run(input))
    }

    /// `eval` as an already-resolved future
    fn eval_ready(&self, input: &str) -> Ready<Result<Self::Output, Self::Error>> {
        ready(self.eval(input))
    }
}

impl<P> RunExt for P where P: Parser {}
