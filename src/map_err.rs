use super::parser::Parser;
use crate::state::State;
use std::fmt;

/// Parser combinator that transforms the error of a parser using a mapping function
pub struct MapErr<P, F> {
    parser: P,
    mapper: F,
}

impl<P, F> MapErr<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        MapErr { parser, mapper }
    }
}

impl<P, F> fmt::Debug for MapErr<P, F>
where
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapErr")
            .field("parser", &self.parser)
            .field("mapper", &"<function>")
            .finish()
    }
}

impl<P, F, E2> Parser for MapErr<P, F>
where
    P: Parser,
    F: Fn(P::Error) -> E2,
{
    type Output = P::Output;
    type Error = E2;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        self.parser.parse(state).map_err(&self.mapper)
    }
}

/// Parser combinator that replaces any failure with a fixed, caller-supplied value
///
/// This is how a grammar names its failures ("missing opening brace") instead of
/// reporting the generic `Fail`.
#[derive(Debug)]
pub struct Relabel<P, E> {
    parser: P,
    error: E,
}

impl<P, E> Parser for Relabel<P, E>
where
    P: Parser,
    E: Clone,
{
    type Output = P::Output;
    type Error = E;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        self.parser.parse(state).map_err(|_| self.error.clone())
    }
}

/// Extension trait to add .map_err() and .error() method support for parsers
pub trait MapErrExt: Parser + Sized {
    fn map_err<F, E2>(self, mapper: F) -> MapErr<Self, F>
    where
        F: Fn(Self::Error) -> E2,
    {
        MapErr::new(self, mapper)
    }

    /// Fail with `error` whenever this parser fails
    fn error<E: Clone>(self, error: E) -> Relabel<Self, E> {
        Relabel {
            parser: self,
            error,
        }
    }
}

/// Implement MapErrExt for all parsers
impl<P> MapErrExt for P where P: Parser {}

/// Convenience function to create a MapErr parser
pub fn map_err<P, F, E2>(parser: P, mapper: F) -> MapErr<P, F>
where
    P: Parser,
    F: Fn(P::Error) -> E2,
{
    MapErr::new(parser, mapper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fail;
    use crate::and::AndExt;
    use crate::or::choice;
    use crate::parser::from_fn;
    use crate::run::RunExt;
    use crate::text::is_char;
    use std::fmt;

    #[derive(Debug, Clone, PartialEq, Default)]
    enum CustomError {
        #[default]
        Unknown,
        Simple(String),
        WithCode(u32),
        MissingA,
        MissingB,
        MissingC,
    }

    impl fmt::Display for CustomError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl From<Fail> for CustomError {
        fn from(_: Fail) -> Self {
            CustomError::Unknown
        }
    }

    fn always_fail() -> impl Parser<Output = char, Error = Fail> {
        from_fn(|_: &mut State<'_>| Err(Fail))
    }

    fn always_succeed() -> impl Parser<Output = char, Error = Fail> {
        from_fn(|_: &mut State<'_>| Ok('x'))
    }

    #[test]
    fn test_map_err_transforms_error_on_failure() {
        let parser = always_fail().map_err(|_| CustomError::Simple("mapped error".to_string()));
        assert_eq!(
            parser.eval("test"),
            Err(CustomError::Simple("mapped error".to_string()))
        );
    }

    #[test]
    fn test_map_err_preserves_success() {
        let parser = always_succeed().map_err(|_| CustomError::WithCode(1));
        assert_eq!(parser.eval("test"), Ok('x'));
    }

    #[test]
    fn test_map_err_chain() {
        let parser = always_fail()
            .map_err(|_| CustomError::Simple("first".to_string()))
            .map_err(|_| CustomError::WithCode(500));

        assert_eq!(parser.eval("test"), Err(CustomError::WithCode(500)));
    }

    #[test]
    fn test_map_err_from_conversion() {
        let parser = map_err(always_fail(), CustomError::from);
        assert_eq!(parser.eval("test"), Err(CustomError::Unknown));
    }

    #[test]
    fn test_error_labels_each_step() {
        let parser = is_char('A')
            .error(CustomError::MissingA)
            .and(is_char('B').error(CustomError::MissingB))
            .and(is_char('C').error(CustomError::MissingC));

        assert_eq!(parser.eval(""), Err(CustomError::MissingA));
        assert_eq!(parser.eval("A"), Err(CustomError::MissingB));
        assert_eq!(parser.eval("AB"), Err(CustomError::MissingC));
        assert_eq!(parser.eval("ABC"), Ok((('A', 'B'), 'C')));
    }

    #[test]
    fn test_error_in_choice_reports_last_alternative() {
        let parser = choice([
            is_char('A').error(CustomError::MissingA),
            is_char('B').error(CustomError::MissingB),
            is_char('C').error(CustomError::MissingC),
        ]);

        assert_eq!(parser.eval("D"), Err(CustomError::MissingC));
        assert_eq!(parser.eval("B"), Ok('B'));
    }
}
