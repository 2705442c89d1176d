use crate::error::Fail;
use crate::parser::Parser;
use crate::state::State;

/// Parser that consumes and returns any single codepoint
pub struct One;

impl Parser for One {
    type Output = char;
    type Error = Fail;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        state.advance().ok_or(Fail)
    }
}

/// Consume one codepoint; fails at end of input
pub fn one() -> One {
    One
}

/// Parser that matches a specific codepoint
pub struct IsChar {
    expected: char,
}

impl Parser for IsChar {
    type Output = char;
    type Error = Fail;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        match state.peek() {
            Some(c) if c == self.expected => {
                state.advance();
                Ok(c)
            }
            _ => Err(Fail),
        }
    }
}

/// Match exactly `expected`, leaving the cursor untouched on mismatch
pub fn is_char(expected: char) -> IsChar {
    IsChar { expected }
}

/// Parser that matches any one of a fixed set of codepoints
pub struct AnyCharOf {
    chars: Vec<char>,
}

impl Parser for AnyCharOf {
    type Output = char;
    type Error = Fail;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        match state.peek() {
            Some(c) if self.chars.contains(&c) => {
                state.advance();
                Ok(c)
            }
            _ => Err(Fail),
        }
    }
}

/// Match any codepoint of `chars`
pub fn any_char_of(chars: impl IntoIterator<Item = char>) -> AnyCharOf {
    AnyCharOf {
        chars: chars.into_iter().collect(),
    }
}
