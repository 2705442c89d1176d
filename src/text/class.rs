use super::char::{AnyCharOf, IsChar, any_char_of, is_char};

/// ASCII digit `0`-`9`
pub fn digit() -> AnyCharOf {
    any_char_of('0'..='9')
}

/// Hexadecimal digit, either case
pub fn hex_digit() -> AnyCharOf {
    any_char_of(('0'..='9').chain('a'..='f').chain('A'..='F'))
}

/// Uppercase Latin letter without diacritics
pub fn upper() -> AnyCharOf {
    any_char_of('A'..='Z')
}

/// Lowercase Latin letter without diacritics
pub fn lower() -> AnyCharOf {
    any_char_of('a'..='z')
}

/// Latin letter without diacritics
pub fn alpha() -> AnyCharOf {
    any_char_of(('A'..='Z').chain('a'..='z'))
}

pub fn space() -> IsChar {
    is_char(' ')
}

pub fn tab() -> IsChar {
    is_char('\t')
}

pub fn cr() -> IsChar {
    is_char('\r')
}

pub fn lf() -> IsChar {
    is_char('\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fail;
    use crate::run::RunExt;

    #[test]
    fn test_digit() {
        for d in '0'..='9' {
            assert_eq!(digit().eval(&d.to_string()), Ok(d));
        }
        assert_eq!(digit().eval("a"), Err(Fail));
        assert_eq!(digit().eval("٥"), Err(Fail));
    }

    #[test]
    fn test_hex_digit() {
        assert_eq!(hex_digit().eval("f"), Ok('f'));
        assert_eq!(hex_digit().eval("B"), Ok('B'));
        assert_eq!(hex_digit().eval("g"), Err(Fail));
    }

    #[test]
    fn test_letters() {
        assert_eq!(upper().eval("Q"), Ok('Q'));
        assert_eq!(upper().eval("q"), Err(Fail));
        assert_eq!(lower().eval("q"), Ok('q'));
        assert_eq!(alpha().eval("q"), Ok('q'));
        assert_eq!(alpha().eval("ñ"), Err(Fail));
    }

    #[test]
    fn test_whitespace_chars() {
        assert_eq!(space().eval(" "), Ok(' '));
        assert_eq!(tab().eval("\t"), Ok('\t'));
        assert_eq!(cr().eval("\r"), Ok('\r'));
        assert_eq!(lf().eval("\n"), Ok('\n'));
    }
}
