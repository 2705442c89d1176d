//! Structural checks over decoded JSON values
//!
//! A validator is a total function from a [`Value`] to either a typed result or a
//! [`TypeError`]. Validators compose like parsers do, but they run over an already-built
//! tree and share no state with the parsing machinery.
//!
//! ```
//! use recombine::json::Value;
//! use recombine::validate::{array, number, object, string, Validator};
//! use std::str::FromStr;
//!
//! let student = object()
//!     .field("name", string())
//!     .field("age", number())
//!     .field("parents", array(string()));
//!
//! let good = Value::from_str(r#"{"name": "Alice", "age": 12, "parents": ["Bob"]}"#).unwrap();
//! assert!(student.validate(&good).is_ok());
//!
//! let bad = Value::from_str(r#"{"name": "Alice", "age": "12", "parents": []}"#).unwrap();
//! assert_eq!(
//!     student.validate(&bad).unwrap_err().to_string(),
//!     r#"Invalid key age: Expected number, got "12""#
//! );
//! ```

use crate::json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypeError {
    #[error("Expected {expected}, got {got}")]
    Expected { expected: &'static str, got: Value },
    #[error("Invalid index {index}: {source}")]
    Index {
        index: usize,
        source: Box<TypeError>,
    },
    #[error("Missing key: {0}")]
    MissingKey(String),
    #[error("Invalid key {key}: {source}")]
    Key {
        key: String,
        source: Box<TypeError>,
    },
    #[error("Expected tuple of length {expected}, got {got}")]
    TupleLength { expected: usize, got: Value },
    #[error("No alternatives matched, got errors: {}", join_messages(.0))]
    NoAlternative(Vec<TypeError>),
    #[error("Failed at step {step}: {source}")]
    Step {
        step: usize,
        source: Box<TypeError>,
    },
    #[error("Expected {expected}, got {got}")]
    NotEqual { expected: Value, got: Value },
    #[error("Value did not satisfy predicate, got {0}")]
    Predicate(Value),
    #[error("{0}")]
    Custom(String),
}

fn join_messages(errors: &[TypeError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn expected(expected: &'static str, got: &Value) -> TypeError {
    TypeError::Expected {
        expected,
        got: got.clone(),
    }
}

/// A check over a decoded value
pub trait Validator {
    type Output;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError>;
}

impl<V: Validator + ?Sized> Validator for &V {
    type Output = V::Output;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        (**self).validate(input)
    }
}

pub struct FromFn<F> {
    f: F,
}

impl<F, T> Validator for FromFn<F>
where
    F: Fn(&Value) -> Result<T, TypeError>,
{
    type Output = T;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        (self.f)(input)
    }
}

/// Adapt a closure into a validator
pub fn from_fn<F, T>(f: F) -> FromFn<F>
where
    F: Fn(&Value) -> Result<T, TypeError>,
{
    FromFn { f }
}

pub struct Str;

impl Validator for Str {
    type Output = String;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        input
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| expected("string", input))
    }
}

pub fn string() -> Str {
    Str
}

pub struct Number;

impl Validator for Number {
    type Output = f64;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        input.as_f64().ok_or_else(|| expected("number", input))
    }
}

pub fn number() -> Number {
    Number
}

pub struct Boolean;

impl Validator for Boolean {
    type Output = bool;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        input.as_bool().ok_or_else(|| expected("boolean", input))
    }
}

pub fn boolean() -> Boolean {
    Boolean
}

pub struct Null;

impl Validator for Null {
    type Output = ();

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        if input.is_null() {
            Ok(())
        } else {
            Err(expected("null", input))
        }
    }
}

pub fn null() -> Null {
    Null
}

/// Every element must pass `inner`
pub struct Array<V> {
    inner: V,
}

impl<V: Validator> Validator for Array<V> {
    type Output = Vec<V::Output>;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        let items = input.as_array().ok_or_else(|| expected("array", input))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.inner
                    .validate(item)
                    .map_err(|source| TypeError::Index {
                        index,
                        source: Box::new(source),
                    })
            })
            .collect()
    }
}

pub fn array<V: Validator>(inner: V) -> Array<V> {
    Array { inner }
}

type Check = Box<dyn Fn(&Value) -> Result<(), TypeError> + Send + Sync>;

fn erase<V>(validator: V) -> Check
where
    V: Validator + Send + Sync + 'static,
{
    Box::new(move |input: &Value| validator.validate(input).map(|_| ()))
}

/// An object with required keys, built field by field
///
/// Keys are checked in the order they were added. Keys not mentioned are allowed.
#[derive(Default)]
pub struct Object {
    fields: Vec<(String, Check)>,
}

impl Object {
    pub fn field<V>(mut self, key: impl Into<String>, validator: V) -> Self
    where
        V: Validator + Send + Sync + 'static,
    {
        self.fields.push((key.into(), erase(validator)));
        self
    }
}

impl Validator for Object {
    type Output = BTreeMap<String, Value>;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        let members = input.as_object().ok_or_else(|| expected("object", input))?;

        for (key, check) in &self.fields {
            let value = members
                .get(key)
                .ok_or_else(|| TypeError::MissingKey(key.clone()))?;
            check(value).map_err(|source| TypeError::Key {
                key: key.clone(),
                source: Box::new(source),
            })?;
        }

        Ok(members.clone())
    }
}

pub fn object() -> Object {
    Object::default()
}

/// A fixed-length array whose positions each have their own validator
#[derive(Default)]
pub struct Tuple {
    items: Vec<Check>,
}

impl Tuple {
    pub fn item<V>(mut self, validator: V) -> Self
    where
        V: Validator + Send + Sync + 'static,
    {
        self.items.push(erase(validator));
        self
    }
}

impl Validator for Tuple {
    type Output = Vec<Value>;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        let items = input.as_array().ok_or_else(|| expected("tuple", input))?;
        if items.len() != self.items.len() {
            return Err(TypeError::TupleLength {
                expected: self.items.len(),
                got: input.clone(),
            });
        }

        for (index, (check, item)) in self.items.iter().zip(items).enumerate() {
            check(item).map_err(|source| TypeError::Index {
                index,
                source: Box::new(source),
            })?;
        }

        Ok(items.to_vec())
    }
}

pub fn tuple() -> Tuple {
    Tuple::default()
}

/// The first alternative that accepts the input wins
pub struct AnyOf<V> {
    alternatives: Vec<V>,
}

impl<V: Validator> Validator for AnyOf<V> {
    type Output = V::Output;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        let mut errors = Vec::with_capacity(self.alternatives.len());
        for alternative in &self.alternatives {
            match alternative.validate(input) {
                Ok(value) => return Ok(value),
                Err(e) => errors.push(e),
            }
        }
        Err(TypeError::NoAlternative(errors))
    }
}

pub fn any_of<V: Validator>(alternatives: impl IntoIterator<Item = V>) -> AnyOf<V> {
    AnyOf {
        alternatives: alternatives.into_iter().collect(),
    }
}

/// Every step must accept the input; yields the input itself
pub struct AllOf<V> {
    steps: Vec<V>,
}

impl<V: Validator> Validator for AllOf<V> {
    type Output = Value;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        for (step, validator) in self.steps.iter().enumerate() {
            validator
                .validate(input)
                .map_err(|source| TypeError::Step {
                    step,
                    source: Box::new(source),
                })?;
        }
        Ok(input.clone())
    }
}

pub fn all_of<V: Validator>(steps: impl IntoIterator<Item = V>) -> AllOf<V> {
    AllOf {
        steps: steps.into_iter().collect(),
    }
}

/// Accept exactly one value
pub struct Equals {
    expected: Value,
}

impl Validator for Equals {
    type Output = Value;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        if *input == self.expected {
            Ok(self.expected.clone())
        } else {
            Err(TypeError::NotEqual {
                expected: self.expected.clone(),
                got: input.clone(),
            })
        }
    }
}

pub fn eq(expected: impl Into<Value>) -> Equals {
    Equals {
        expected: expected.into(),
    }
}

pub struct Map<V, F> {
    validator: V,
    mapper: F,
}

impl<V, F, U> Validator for Map<V, F>
where
    V: Validator,
    F: Fn(V::Output) -> U,
{
    type Output = U;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        self.validator.validate(input).map(&self.mapper)
    }
}

pub struct Filter<V, F> {
    validator: V,
    predicate: F,
    error: Option<TypeError>,
}

impl<V, F> Validator for Filter<V, F>
where
    V: Validator,
    F: Fn(&V::Output) -> bool,
{
    type Output = V::Output;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        let value = self.validator.validate(input)?;
        if (self.predicate)(&value) {
            Ok(value)
        } else {
            Err(self
                .error
                .clone()
                .unwrap_or_else(|| TypeError::Predicate(input.clone())))
        }
    }
}

/// A type-erased, shareable validator
pub struct BoxedValidator<T> {
    inner: Arc<dyn Validator<Output = T> + Send + Sync>,
}

impl<T> Clone for BoxedValidator<T> {
    fn clone(&self) -> Self {
        BoxedValidator {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Validator for BoxedValidator<T> {
    type Output = T;

    fn validate(&self, input: &Value) -> Result<Self::Output, TypeError> {
        self.inner.validate(input)
    }
}

pub trait ValidatorExt: Validator + Sized {
    fn map<F, U>(self, mapper: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        Map {
            validator: self,
            mapper,
        }
    }

    /// Reject values failing `predicate` with a generic predicate error
    fn filter<F>(self, predicate: F) -> Filter<Self, F>
    where
        F: Fn(&Self::Output) -> bool,
    {
        Filter {
            validator: self,
            predicate,
            error: None,
        }
    }

    /// Reject values failing `predicate` with `error`
    fn filter_or<F>(self, predicate: F, error: TypeError) -> Filter<Self, F>
    where
        F: Fn(&Self::Output) -> bool,
    {
        Filter {
            validator: self,
            predicate,
            error: Some(error),
        }
    }

    fn boxed(self) -> BoxedValidator<Self::Output>
    where
        Self: Send + Sync + 'static,
    {
        BoxedValidator {
            inner: Arc::new(self),
        }
    }
}

impl<V: Validator> ValidatorExt for V {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn json(text: &str) -> Value {
        Value::from_str(text).unwrap()
    }

    fn samples() -> Vec<Value> {
        ["42", "2.5", "true", "false", "\"foo\"", "\"\"", "null", "[]", "{}"]
            .into_iter()
            .map(json)
            .collect()
    }

    fn accepted<V: Validator>(validator: V) -> Vec<String> {
        samples()
            .into_iter()
            .filter(|sample| validator.validate(sample).is_ok())
            .map(|sample| sample.to_string())
            .collect()
    }

    #[test]
    fn test_primitive_validators() {
        assert_eq!(accepted(boolean()), vec!["true", "false"]);
        assert_eq!(accepted(number()), vec!["42", "2.5"]);
        assert_eq!(accepted(string()), vec!["\"foo\"", "\"\""]);
        assert_eq!(accepted(null()), vec!["null"]);
    }

    #[test]
    fn test_primitive_messages() {
        assert_eq!(
            string().validate(&json("42")).unwrap_err().to_string(),
            "Expected string, got 42"
        );
        assert_eq!(
            boolean().validate(&json("[1,2]")).unwrap_err().to_string(),
            "Expected boolean, got [1,2]"
        );
        assert_eq!(
            null().validate(&json("{\"a\":\"b\"}")).unwrap_err().to_string(),
            "Expected null, got {\"a\":\"b\"}"
        );
    }

    #[test]
    fn test_array() {
        let numbers = array(number());

        assert_eq!(numbers.validate(&json("[]")), Ok(vec![]));
        assert_eq!(numbers.validate(&json("[-1, 0, 2.5]")), Ok(vec![-1.0, 0.0, 2.5]));
        assert_eq!(
            numbers.validate(&json("[1, 2, \"foo\"]")).unwrap_err().to_string(),
            "Invalid index 2: Expected number, got \"foo\""
        );
        for input in ["[1, 2, null]", "[[1]]", "[{}]", "\"foo\"", "42", "true", "null", "{}"] {
            assert!(numbers.validate(&json(input)).is_err(), "input: {}", input);
        }
    }

    #[test]
    fn test_object() {
        let student = object()
            .field("name", string())
            .field("age", number())
            .field("parents", array(string()));
        let students = array(student);

        let correct = json(
            r#"[{"name": "Alice", "age": 12, "parents": ["Bob", "Carol"]},
                {"name": "David", "age": 10, "parents": ["Eve", "Frank"]}]"#,
        );
        let incorrect = json(
            r#"[{"name": "Alice", "age": 12, "parents": ["Bob", "Carol"]},
                {"name": "David", "age": "10", "parents": ["Eve", "Frank"]}]"#,
        );

        assert!(students.validate(&correct).is_ok());
        assert_eq!(
            students.validate(&incorrect).unwrap_err().to_string(),
            "Invalid index 1: Invalid key age: Expected number, got \"10\""
        );
        for input in ["\"foo\"", "42", "true", "null", "[[]]"] {
            assert!(students.validate(&json(input)).is_err(), "input: {}", input);
        }
    }

    #[test]
    fn test_object_missing_key_and_extra_keys() {
        let point = object().field("x", number()).field("y", number());

        assert_eq!(
            point.validate(&json(r#"{"x": 1}"#)),
            Err(TypeError::MissingKey("y".to_string()))
        );
        let extra = point.validate(&json(r#"{"x": 1, "y": 2, "z": 3}"#)).unwrap();
        assert_eq!(extra.len(), 3);
    }

    #[test]
    fn test_tuple() {
        let row = tuple().item(string()).item(number()).item(array(string()));

        assert!(row.validate(&json(r#"["foo", 42, ["bar", "baz"]]"#)).is_ok());
        assert!(row.validate(&json(r#"[42, 42, ["bar", "baz"]]"#)).is_err());
        assert!(row.validate(&json(r#"["foo", "foo", ["bar", "baz"]]"#)).is_err());
        assert_eq!(
            row.validate(&json(r#"["foo", 42, [42, "baz"]]"#))
                .unwrap_err()
                .to_string(),
            "Invalid index 2: Invalid index 0: Expected string, got 42"
        );
        assert_eq!(
            row.validate(&json(r#"["foo", 42]"#)).unwrap_err().to_string(),
            "Expected tuple of length 3, got [\"foo\",42]"
        );
    }

    #[test]
    fn test_any_of() {
        let scalar = any_of([
            string().map(Value::from).boxed(),
            number().map(Value::from).boxed(),
            null().map(|_| Value::Null).boxed(),
        ]);

        assert_eq!(scalar.validate(&json("\"foo\"")), Ok(Value::from("foo")));
        assert_eq!(scalar.validate(&json("42")), Ok(Value::from(42.0)));
        assert_eq!(scalar.validate(&json("null")), Ok(Value::Null));
        assert!(scalar.validate(&json("[]")).is_err());
        assert!(scalar.validate(&json("{}")).is_err());
        assert_eq!(
            scalar.validate(&json("true")).unwrap_err().to_string(),
            "No alternatives matched, got errors: Expected string, got true; \
             Expected number, got true; Expected null, got true"
        );
    }

    #[test]
    fn test_all_of() {
        let small_even = all_of([
            number().filter(|n| *n < 100.0).boxed(),
            number().filter(|n| n % 2.0 == 0.0).boxed(),
        ]);

        assert_eq!(small_even.validate(&json("42")), Ok(Value::from(42u64)));
        assert_eq!(
            small_even.validate(&json("43")).unwrap_err().to_string(),
            "Failed at step 1: Value did not satisfy predicate, got 43"
        );
    }

    #[test]
    fn test_eq() {
        assert!(eq(42u64).validate(&json("42")).is_ok());
        assert!(eq("foo").validate(&json("\"foo\"")).is_ok());
        assert!(eq(true).validate(&json("true")).is_ok());
        assert!(eq(Value::Null).validate(&json("null")).is_ok());

        assert!(eq(42u64).validate(&json("43")).is_err());
        assert!(eq("foo").validate(&json("\"bar\"")).is_err());
        assert!(eq(true).validate(&json("false")).is_err());
        assert_eq!(
            eq(Value::Null).validate(&json("0")).unwrap_err().to_string(),
            "Expected null, got 0"
        );
    }

    #[test]
    fn test_filter_or_and_from_fn() {
        let port = number().filter_or(
            |n| (1.0..=65535.0).contains(n),
            TypeError::Custom("port out of range".to_string()),
        );
        assert_eq!(port.validate(&json("8080")), Ok(8080.0));
        assert_eq!(
            port.validate(&json("0")),
            Err(TypeError::Custom("port out of range".to_string()))
        );

        let non_empty = from_fn(|input| {
            let s = string().validate(input)?;
            if s.is_empty() {
                Err(TypeError::Custom("empty string".to_string()))
            } else {
                Ok(s)
            }
        });
        assert_eq!(non_empty.validate(&json("\"a\"")), Ok("a".to_string()));
        assert!(non_empty.validate(&json("\"\"")).is_err());
    }
}
