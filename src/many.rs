use super::parser::Parser;
use crate::state::State;

/// Parser combinator that matches zero or more occurrences of the given parser
///
/// Never fails. The cursor ends wherever the final, failing attempt left it: discarding a
/// partial match of that attempt is the inner parser's job (wrap it in `attempt()`).
///
/// An iteration that succeeds without consuming anything ends the repetition after its
/// result is kept, so zero-width parsers cannot loop forever.
pub struct Many<P> {
    parser: P,
}

impl<P> Many<P> {
    pub fn new(parser: P) -> Self {
        Many { parser }
    }
}

impl<P> Parser for Many<P>
where
    P: Parser,
{
    type Output = Vec<P::Output>;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        let mut results = Vec::new();

        loop {
            let before = state.index();
            match self.parser.parse(state) {
                Ok(value) => {
                    results.push(value);
                    if state.index() == before {
                        break;
                    }
                }
                // Many matches zero or more, so error is not propagated
                Err(_) => break,
            }
        }

        Ok(results)
    }
}

/// Convenience function to create a Many parser
pub fn many<P>(parser: P) -> Many<P>
where
    P: Parser,
{
    Many::new(parser)
}

/// Extension trait to add .many() method support for parsers
pub trait ManyExt: Parser + Sized {
    fn many(self) -> Many<Self> {
        Many::new(self)
    }
}

impl<P> ManyExt for P where P: Parser {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::and::AndExt;
    use crate::pure::pure;
    use crate::run::RunExt;
    use crate::text::{digit, is_char, one, span};
    use crate::Fail;

    #[test]
    fn test_many_zero_matches() {
        assert_eq!(many(digit()).run("abc"), Ok((vec![], 0)));
    }

    #[test]
    fn test_many_one_match() {
        assert_eq!(many(is_char('a')).run("abc"), Ok((vec!['a'], 1)));
    }

    #[test]
    fn test_many_multiple_matches() {
        assert_eq!(many(is_char('a')).run("aaabcd"), Ok((vec!['a', 'a', 'a'], 3)));
    }

    #[test]
    fn test_many_all_matches() {
        assert_eq!(one().many().run("hello"), Ok((vec!['h', 'e', 'l', 'l', 'o'], 5)));
    }

    #[test]
    fn test_many_empty_input() {
        assert_eq!(many(is_char('a')).run(""), Ok((vec![], 0)));
    }

    #[test]
    fn test_many_keeps_partial_consumption() {
        // The third attempt consumes 'a' and then fails on 'x'
        let pair = is_char('a').and(is_char('b'));
        assert_eq!(many(pair).run("ababax"), Ok((vec![('a', 'b'), ('a', 'b')], 5)));
    }

    #[test]
    fn test_many_zero_width_terminates() {
        assert_eq!(many(pure::<_, Fail>(1)).run("abc"), Ok((vec![1], 0)));
        assert_eq!(many(span(|c| c == 'x')).run("xxy"), Ok((vec!["xx".to_string(), String::new()], 2)));
    }
}
