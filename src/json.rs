//! JSON reader built entirely from the public combinators
//!
//! The grammar follows RFC 8259: one value surrounded by optional whitespace, followed by
//! the end of input. Integers without a fraction or exponent stay exact when they fit in 64
//! bits and every other number is an `f64`. Objects keep their keys sorted, so a parsed
//! document serializes the same way `serde_json` serializes its own `Value`.

use crate::error::{Fail, Failure};
use crate::prelude::*;
use crate::text::{any_char_of, digit, hex_digit, is_char, is_string, one, span};
use crate::{empty, from_fn, many, some};
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::iter;
use std::str::FromStr;

/// A JSON number, keeping the integer/float distinction of its lexeme
///
/// `NegInt` always holds a negative value and `Float` always holds a finite one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    PosInt(u64),
    NegInt(i64),
    Float(f64),
}

impl Number {
    /// `None` for NaN and the infinities, which JSON cannot represent
    pub fn from_f64(f: f64) -> Option<Number> {
        f.is_finite().then_some(Number::Float(f))
    }

    pub fn is_f64(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::PosInt(n) => n as f64,
            Number::NegInt(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Number::PosInt(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::PosInt(n) => i64::try_from(n).ok(),
            Number::NegInt(n) => Some(n),
            Number::Float(_) => None,
        }
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::PosInt(n)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        match u64::try_from(n) {
            Ok(n) => Number::PosInt(n),
            Err(_) => Number::NegInt(n),
        }
    }
}

/// Shortest round-trip digits; floats always carry a `.0` or an exponent
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::PosInt(n) => write!(f, "{}", n),
            Number::NegInt(n) => write!(f, "{}", n),
            Number::Float(x) if !x.is_finite() => f.write_str("null"),
            Number::Float(x) => {
                let mut buffer = ryu::Buffer::new();
                let text = buffer.format_finite(x);
                match text.split_once('e') {
                    Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                        write!(f, "{}e+{}", mantissa, exponent)
                    }
                    _ => f.write_str(text),
                }
            }
        }
    }
}

/// A decoded JSON document
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Look up `key` if this is an object
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|members| members.get(key))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Non-finite floats become `Null`
impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            c if c < '\u{20}' => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Compact serialization, byte-compatible with `serde_json::to_string`
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write_string(f, s),
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_char(']')
            }
            Value::Object(members) => {
                f.write_char('{')?;
                for (i, (key, value)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_string(f, key)?;
                    write!(f, ":{}", value)?;
                }
                f.write_char('}')
            }
        }
    }
}

impl FromStr for Value {
    type Err = Failure<Fail>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

fn whitespace() -> impl Parser<Output = String, Error = Fail> {
    span(|c| matches!(c, ' ' | '\n' | '\r' | '\t'))
}

fn digits() -> impl Parser<Output = String, Error = Fail> {
    some(digit()).map(|ds| ds.into_iter().collect())
}

/// Integers stay exact when they fit; `-0` and everything else fall back to `f64`
fn number_from_lexeme(text: &str, integral: bool) -> Option<Number> {
    if integral {
        let exact = if text.starts_with('-') {
            i64::from_str(text).ok().filter(|n| *n < 0).map(Number::NegInt)
        } else {
            u64::from_str(text).ok().map(Number::PosInt)
        };
        if exact.is_some() {
            return exact;
        }
    }
    Number::from_f64(f64::from_str(text).ok()?)
}

fn number() -> impl Parser<Output = Number, Error = Fail> {
    let sign = is_char('-').map(String::from).or_pure(String::new());
    let integer = digits().filter(|ds| !ds.starts_with('0') || ds.len() == 1);
    // A dangling '.' or 'e' must not be swallowed
    let fraction = is_char('.').right(digits()).attempt().optional();
    let exponent = any_char_of(['e', 'E'])
        .and(any_char_of(['+', '-']).optional())
        .and(digits())
        .attempt()
        .optional();

    let literal = sign
        .and(integer)
        .and(fraction)
        .and(exponent)
        .map(|(((sign, integer), fraction), exponent)| {
            let integral = fraction.is_none() && exponent.is_none();
            let mut text = sign + &integer;
            if let Some(fraction) = fraction {
                text.push('.');
                text.push_str(&fraction);
            }
            if let Some(((e, exp_sign), exp_digits)) = exponent {
                text.push(e);
                text.extend(exp_sign);
                text.push_str(&exp_digits);
            }
            (text, integral)
        });

    from_fn(move |state| {
        let (text, integral) = literal.parse(state)?;
        number_from_lexeme(&text, integral).ok_or(Fail)
    })
}

fn hex4() -> impl Parser<Output = u32, Error = Fail> {
    hex_digit()
        .times(4)
        .map(|ds| ds.iter().filter_map(|d| d.to_digit(16)).fold(0, |acc, d| acc * 16 + d))
}

/// `\uXXXX`, joining a UTF-16 surrogate pair into one codepoint
fn unicode_escape() -> impl Parser<Output = char, Error = Fail> {
    is_char('u').right(hex4()).bind(|unit| -> BoxedParser<char> {
        match unit {
            0xD800..=0xDBFF => is_string("\\u")
                .right(hex4())
                .filter(|low| (0xDC00..=0xDFFF).contains(low))
                .map(move |low| {
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
                })
                .boxed(),
            _ => match char::from_u32(unit) {
                Some(c) => pure(c).boxed(),
                None => empty().boxed(),
            },
        }
    })
}

fn escape() -> impl Parser<Output = char, Error = Fail> {
    let simple = |code: char, value: char| is_char(code).to(value).boxed();
    is_char('\\').right(choice([
        simple('"', '"'),
        simple('\\', '\\'),
        simple('/', '/'),
        simple('b', '\u{8}'),
        simple('f', '\u{c}'),
        simple('n', '\n'),
        simple('r', '\r'),
        simple('t', '\t'),
        unicode_escape().boxed(),
    ]))
}

fn string() -> impl Parser<Output = String, Error = Fail> {
    let plain = one().filter(|c| *c != '"' && *c != '\\' && *c >= '\u{20}');
    is_char('"')
        // A rejected escape leaves the cursor on its backslash
        .right(many(plain.or(escape().attempt())))
        .left(is_char('"'))
        .map(|cs| cs.into_iter().collect())
}

fn array() -> BoxedParser<Vec<Value>> {
    let elements = value()
        .and(many(is_char(',').right(value()).attempt()))
        .map(|(first, rest)| iter::once(first).chain(rest).collect::<Vec<_>>())
        .or_pure(Vec::new());

    is_char('[')
        .right(elements)
        .left(whitespace())
        .left(is_char(']'))
        .boxed()
}

fn member() -> impl Parser<Output = (String, Value), Error = Fail> {
    whitespace()
        .right(string())
        .left(whitespace())
        .left(is_char(':'))
        .and(value())
}

fn object() -> BoxedParser<BTreeMap<String, Value>> {
    let members = member()
        .and(many(is_char(',').right(member()).attempt()))
        .map(|(first, rest)| iter::once(first).chain(rest).collect::<BTreeMap<_, _>>())
        .or_pure(BTreeMap::new());

    is_char('{')
        .right(members)
        .left(whitespace())
        .left(is_char('}'))
        .boxed()
}

fn value() -> BoxedParser<Value> {
    // Alternatives that can consume before failing restart from the value's first codepoint
    let alternatives = choice([
        string().attempt().map(Value::String).boxed(),
        number().attempt().map(Value::Number).boxed(),
        is_string("true").to(Value::Bool(true)).boxed(),
        is_string("false").to(Value::Bool(false)).boxed(),
        is_string("null").to(Value::Null).boxed(),
        lazy(object).map(Value::Object).boxed(),
        lazy(array).map(Value::Array).boxed(),
    ]);

    whitespace()
        .right(alternatives)
        .left(whitespace())
        .boxed()
}

/// The whole-document grammar: one value and nothing after it
pub fn parser() -> BoxedParser<Value> {
    value().left(eof()).boxed()
}

/// Decode a complete JSON document
pub fn parse(input: &str) -> Result<Value, Failure<Fail>> {
    parser()
        .run(input)
        .map(|(value, _)| value)
        .inspect_err(|failure| tracing::debug!(index = failure.index, "invalid JSON document"))
}
