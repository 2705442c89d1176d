use crate::error::Fail;
use crate::parser::Parser;
use crate::state::State;
use crate::text::string::{IsString, is_string};

/// Parser that interleaves fixed literals with value parsers
///
/// `template("(", [(x, ","), (y, ")")])` matches `(`, then `x`, then `,`, then `y`, then
/// `)`, and yields `[x, y]`. A literal that does not match fails with `Fail` converted
/// into the parts' error type.
pub struct Template<P, const N: usize> {
    head: IsString,
    parts: [(P, IsString); N],
}

impl<P, const N: usize> Parser for Template<P, N>
where
    P: Parser,
    P::Error: From<Fail>,
{
    type Output = [P::Output; N];
    type Error = P::Error;

    fn parse(&self, state: &mut State<'_>) -> Result<Self::Output, Self::Error> {
        self.head.parse(state)?;

        let mut values = Vec::with_capacity(N);
        for (parser, literal) in &self.parts {
            values.push(parser.parse(state)?);
            literal.parse(state)?;
        }

        // One value per part, so the length always matches
        values.try_into().map_err(|_| P::Error::from(Fail))
    }
}

pub fn template<P, const N: usize>(
    head: &'static str,
    parts: [(P, &'static str); N],
) -> Template<P, N>
where
    P: Parser,
    P::Error: From<Fail>,
{
    Template {
        head: is_string(head),
        parts: parts.map(|(parser, literal)| (parser, is_string(literal))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::and::AndExt;
    use crate::boxed::{BoxedExt, BoxedParser};
    use crate::eof::eof;
    use crate::filter::FilterExt;
    use crate::map::MapExt;
    use crate::map_err::MapErrExt;
    use crate::run::RunExt;
    use crate::text::digit;
    use crate::times::TimesExt;
    use pretty_assertions::assert_eq;

    fn two_digits(max: u32) -> BoxedParser<u32> {
        digit()
            .times(2)
            .map(|ds| ds.into_iter().collect::<String>().parse().unwrap_or(u32::MAX))
            .filter(move |n| *n < max)
            .boxed()
    }

    fn time_of_day() -> impl Parser<Output = [u32; 3], Error = Fail> {
        template(
            "",
            [(two_digits(24), ":"), (two_digits(60), ":"), (two_digits(60), "")],
        )
        .left(eof())
    }

    #[test]
    fn test_template_time_of_day() {
        assert_eq!(time_of_day().eval("12:34:56"), Ok([12, 34, 56]));
        assert_eq!(time_of_day().eval("00:00:00"), Ok([0, 0, 0]));
        assert_eq!(time_of_day().eval("23:59:59"), Ok([23, 59, 59]));
    }

    #[test]
    fn test_template_rejects_out_of_range() {
        assert!(time_of_day().eval("99:99:99").is_err());
        assert!(time_of_day().eval("24:00:00").is_err());
    }

    #[test]
    fn test_template_rejects_short_fields() {
        assert!(time_of_day().eval("9:9:9").is_err());
    }

    #[test]
    fn test_template_head_and_literals() {
        let point = template("(", [(two_digits(100), ","), (two_digits(100), ")")]);
        assert_eq!(point.run("(10,42)"), Ok(([10, 42], 7)));
        assert_eq!(point.run("[10,42]").unwrap_err().index, 0);
        assert_eq!(point.run("(10;42)").unwrap_err().index, 3);
    }

    #[test]
    fn test_template_part_counts() {
        let bare = template::<BoxedParser<u32>, 0>("v", []);
        assert_eq!(bare.run("v1"), Ok(([], 1)));

        let single = template("#", [(two_digits(100), ";")]);
        assert_eq!(single.run("#07;"), Ok(([7], 4)));
        assert_eq!(single.run("#07").unwrap_err().index, 3);
    }

    #[derive(Debug, Clone, PartialEq)]
    enum DateError {
        Literal,
        Field,
    }

    impl From<Fail> for DateError {
        fn from(_: Fail) -> Self {
            DateError::Literal
        }
    }

    #[test]
    fn test_template_converts_literal_failure() {
        let field = || two_digits(100).map_err(|_| DateError::Field);
        let date = template("", [(field(), "-"), (field(), "")]);

        assert_eq!(date.eval("12-31"), Ok([12, 31]));
        assert_eq!(date.eval("12/31"), Err(DateError::Literal));
        assert_eq!(date.eval("1x-31"), Err(DateError::Field));
    }
}
