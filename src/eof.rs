use crate::error::Fail;
use crate::parser::Parser;
use crate::state::State;

/// Parser that succeeds only at the end of input, consuming nothing
pub struct Eof;

impl Parser for Eof {
    type Output = ();
    type Error = Fail;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        if state.is_eof() { Ok(()) } else { Err(Fail) }
    }
}

pub fn eof() -> Eof {
    Eof
}
