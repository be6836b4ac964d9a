//! Path parts and query parameter values.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Suffix marking a sequence-valued key in serialized form (`tags[]=a`).
pub const ARRAY_KEY_SUFFIX: &str = "[]";

/// Insertion-ordered parameters; iteration order is query serialization order.
pub type ParametersMap = IndexMap<String, ParameterValue>;

/// A single string or number, used both as a path fragment and as a parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => write_number(f, *x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Formats a float the way JavaScript's `String(number)` does: `NaN`,
/// `Infinity`, `0` for negative zero, and exponent form (`1e+21`, `1.5e-7`)
/// outside `1e-6 <= |x| < 1e21`.
fn write_number(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if x == 0.0 {
        return f.write_str("0");
    }
    let magnitude = x.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{}", x);
    }
    let exp = format!("{:e}", x);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{mantissa}e+{power}"),
        _ => f.write_str(&exp),
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Scalar::Text(s.clone())
    }
}

macro_rules! scalar_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Scalar {
            fn from(n: $t) -> Self {
                Scalar::Int(i64::from(n))
            }
        })*
    };
}

scalar_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

/// A path fragment; one segment or several joined by `/`.
pub type PathPart = Scalar;

/// The ordered path fragments handed to [`crate::build_url`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathParts(Vec<PathPart>);

impl PathParts {
    pub fn new(parts: Vec<PathPart>) -> Self {
        Self(parts)
    }

    pub fn push(&mut self, part: impl Into<PathPart>) {
        self.0.push(part.into());
    }

    /// Stringified fragments, in order.
    pub fn into_strings(self) -> Vec<String> {
        self.0
            .into_iter()
            .map(|p| match p {
                Scalar::Text(s) => s,
                other => other.to_string(),
            })
            .collect()
    }
}

impl<T: Into<PathPart>> From<Vec<T>> for PathParts {
    fn from(parts: Vec<T>) -> Self {
        Self(parts.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PathPart>, const N: usize> From<[T; N]> for PathParts {
    fn from(parts: [T; N]) -> Self {
        Self(parts.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<PathPart>> From<&[T]> for PathParts {
    fn from(parts: &[T]) -> Self {
        Self(parts.iter().cloned().map(Into::into).collect())
    }
}

macro_rules! path_parts_from_scalar {
    ($($t:ty),*) => {
        $(impl From<$t> for PathParts {
            fn from(part: $t) -> Self {
                Self(vec![part.into()])
            }
        })*
    };
}

path_parts_from_scalar!(&str, String, &String, i32, i64, u32, f64, Scalar);

/// Value bound to one query parameter key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
    Absent,
}

macro_rules! parameter_value_from_scalar {
    ($($t:ty),*) => {
        $(impl From<$t> for ParameterValue {
            fn from(value: $t) -> Self {
                ParameterValue::Scalar(value.into())
            }
        })*
    };
}

parameter_value_from_scalar!(&str, String, &String, i8, i16, i32, i64, u8, u16, u32, f64, Scalar);

impl<T: Into<Scalar>> From<Vec<T>> for ParameterValue {
    fn from(values: Vec<T>) -> Self {
        ParameterValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for ParameterValue {
    fn from(values: [T; N]) -> Self {
        ParameterValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>> From<Option<T>> for ParameterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParameterValue::Absent, |v| ParameterValue::Scalar(v.into()))
    }
}

/// Error parsing a `KEY=VALUE` assignment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("parameter `{0}` has no `=` separator")]
    MissingSeparator(String),

    #[error("parameter `{0}` has an empty key")]
    EmptyKey(String),

    #[error("cannot append to `{0}[]`: `{0}` already holds a single value")]
    NotASequence(String),
}

/// One parsed `KEY=VALUE` or `KEY[]=VALUE` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
    pub is_array: bool,
}

/// Parses `KEY=VALUE`; the first `=` splits. A `[]` key suffix marks an array element.
pub fn parse_assignment(arg: &str) -> Result<Assignment, ParamError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| ParamError::MissingSeparator(arg.to_string()))?;
    let (key, is_array) = match key.strip_suffix(ARRAY_KEY_SUFFIX) {
        Some(k) => (k, true),
        None => (key, false),
    };
    if key.is_empty() {
        return Err(ParamError::EmptyKey(arg.to_string()));
    }
    Ok(Assignment {
        key: key.to_string(),
        value: value.to_string(),
        is_array,
    })
}

/// Applies an assignment to `params`.
///
/// Scalar assignments replace any previous value (keeping the key's position).
/// Array assignments append; a sequence replaces an absent value, but appending
/// onto a scalar is rejected.
pub fn insert_assignment(params: &mut ParametersMap, arg: &str) -> Result<(), ParamError> {
    let Assignment {
        key,
        value,
        is_array,
    } = parse_assignment(arg)?;

    if !is_array {
        params.insert(key, ParameterValue::Scalar(Scalar::Text(value)));
        return Ok(());
    }

    match params.get_mut(&key) {
        Some(ParameterValue::Sequence(items)) => items.push(Scalar::Text(value)),
        Some(ParameterValue::Scalar(_)) => return Err(ParamError::NotASequence(key)),
        Some(slot @ ParameterValue::Absent) => {
            *slot = ParameterValue::Sequence(vec![Scalar::Text(value)]);
        }
        None => {
            params.insert(key, ParameterValue::Sequence(vec![Scalar::Text(value)]));
        }
    }
    Ok(())
}
