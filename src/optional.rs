use crate::parser::Parser;
use crate::state::State;

/// Parser combinator that makes the wrapped parser optional
///
/// Yields `Some(value)` on success and `None` when the inner parser fails. It does not
/// restore the cursor after a failed attempt.
pub struct Optional<P> {
    parser: P,
}

impl<P> Parser for Optional<P>
where
    P: Parser,
{
    type Output = Option<P::Output>;
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        Ok(self.parser.parse(state).ok())
    }
}

pub fn optional<P: Parser>(parser: P) -> Optional<P> {
    Optional { parser }
}

/// Extension trait to add .optional() method support for parsers
pub trait OptionalExt: Parser + Sized {
    fn optional(self) -> Optional<Self> {
        Optional { parser: self }
    }
}

impl<P> OptionalExt for P where P: Parser {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::and::AndExt;
    use crate::run::RunExt;
    use crate::text::{is_char, one};

    #[test]
    fn test_optional_present() {
        assert_eq!(optional(one()).run("42"), Ok((Some('4'), 1)));
    }

    #[test]
    fn test_optional_absent() {
        assert_eq!(is_char('x').optional().run("42"), Ok((None, 0)));
    }

    #[test]
    fn test_optional_keeps_partial_consumption() {
        let parser = is_char('a').and(is_char('b')).optional();
        assert_eq!(parser.run("ac"), Ok((None, 1)));
    }
}
