//! Scalar query parameter values

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Flat key → scalar mapping sent as a query string.
///
/// A `BTreeMap` keeps keys sorted, which makes composed URIs reproducible.
pub type Params = BTreeMap<String, ParamValue>;

/// A single scalar query value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Infers the narrowest scalar: bool, then integer, then float, then string.
impl FromStr for ParamValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(b) = s.parse::<bool>() {
            return Ok(ParamValue::Bool(b));
        }
        if let Ok(i) = s.parse::<i64>() {
            return Ok(ParamValue::Int(i));
        }
        // "inf" and "NaN" parse as floats but are meant as text here
        match s.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(ParamValue::Float(x)),
            _ => Ok(ParamValue::Str(s.to_string())),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("true", ParamValue::Bool(true))]
    #[case("false", ParamValue::Bool(false))]
    #[case("42", ParamValue::Int(42))]
    #[case("-7", ParamValue::Int(-7))]
    #[case("1.5", ParamValue::Float(1.5))]
    #[case("ok_button", ParamValue::Str("ok_button".to_string()))]
    #[case("NaN", ParamValue::Str("NaN".to_string()))]
    #[case("", ParamValue::Str(String::new()))]
    fn test_parse_infers_scalar(#[case] input: &str, #[case] expected: ParamValue) {
        assert_eq!(input.parse::<ParamValue>().unwrap(), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(ParamValue::from("a b").to_string(), "a b");
        assert_eq!(ParamValue::from(3).to_string(), "3");
        assert_eq!(ParamValue::from(true).to_string(), "true");
        assert_eq!(ParamValue::from(0.25).to_string(), "0.25");
    }
}
