use crate::error::Fail;
use crate::parser::Parser;
use crate::state::State;
use std::borrow::Cow;

/// Parser that matches an exact codepoint sequence
pub struct IsString {
    expected: Cow<'static, str>,
    chars: Vec<char>,
}

impl IsString {
    pub fn new(expected: impl Into<Cow<'static, str>>) -> Self {
        let expected = expected.into();
        let chars = expected.chars().collect();
        IsString { expected, chars }
    }
}

impl Parser for IsString {
    type Output = Cow<'static, str>;
    type Error = Fail;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        if !state.remaining().starts_with(&self.chars) {
            return Err(Fail);
        }
        state.advance_by(self.chars.len());
        Ok(self.expected.clone())
    }
}

/// Match `expected` literally; fails without consuming on mismatch or short input
pub fn is_string(expected: impl Into<Cow<'static, str>>) -> IsString {
    IsString::new(expected)
}

/// Parser that matches the first of several literals, in order
pub struct AnyStringOf {
    candidates: Vec<IsString>,
}

impl Parser for AnyStringOf {
    type Output = Cow<'static, str>;
    type Error = Fail;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        for candidate in &self.candidates {
            if let Ok(matched) = candidate.parse(state) {
                return Ok(matched);
            }
        }
        Err(Fail)
    }
}

/// Match any of `candidates`, preferring earlier ones
pub fn any_string_of<S>(candidates: impl IntoIterator<Item = S>) -> AnyStringOf
where
    S: Into<Cow<'static, str>>,
{
    AnyStringOf {
        candidates: candidates.into_iter().map(IsString::new).collect(),
    }
}
