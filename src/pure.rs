use crate::error::Fail;
use crate::parser::Parser;
use crate::state::State;
use std::marker::PhantomData;

/// Parser that always succeeds with a clone of a constant, consuming nothing
pub struct Pure<T, E = Fail> {
    value: T,
    _error: PhantomData<fn() -> E>,
}

impl<T, E> Parser for Pure<T, E>
where
    T: Clone,
{
    type Output = T;
    type Error = E;

    fn parse(&self, _state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        Ok(self.value.clone())
    }
}

/// Lift a constant into a parser
pub fn pure<T: Clone, E>(value: T) -> Pure<T, E> {
    Pure {
        value,
        _error: PhantomData,
    }
}

/// Parser that always fails with the error type's default value
pub struct Empty<T, E = Fail> {
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<T, E> Parser for Empty<T, E>
where
    E: Default,
{
    type Output = T;
    type Error = E;

    fn parse(&self, _state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        Err(E::default())
    }
}

pub fn empty<T, E: Default>() -> Empty<T, E> {
    Empty {
        _marker: PhantomData,
    }
}

/// Parser that is either the wrapped parser or, when disabled, one that always fails
pub struct When<P> {
    parser: P,
    enabled: bool,
}

impl<P> Parser for When<P>
where
    P: Parser,
    P::Error: Default,
{
    type Output = P::Output;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        if self.enabled {
            self.parser.parse(state)
        } else {
            Err(P::Error::default())
        }
    }
}

/// Extension trait to add .when() method support for parsers
pub trait WhenExt: Parser + Sized {
    /// Keep this parser if `enabled`, otherwise replace it by one that always fails
    fn when(self, enabled: bool) -> When<Self> {
        When {
            parser: self,
            enabled,
        }
    }
}

impl<P> WhenExt for P where P: Parser {}
