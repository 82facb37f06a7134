//! Typed reads of schema keywords.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Check that the fragment declares exactly `expected` as its type.
pub(crate) fn check_type(
    fragment: &Map<String, Value>,
    expected: &'static str,
    name: &str,
) -> Result<()> {
    match fragment.get("type") {
        None => Err(Error::MissingType {
            name: name.to_string(),
            fragment: Value::Object(fragment.clone()),
        }),
        Some(Value::String(found)) if found == expected => Ok(()),
        Some(Value::String(found)) => Err(Error::TypeMismatch {
            expected,
            found: found.clone(),
            name: name.to_string(),
        }),
        Some(other) => Err(Error::TypeMismatch {
            expected,
            found: other.to_string(),
            name: name.to_string(),
        }),
    }
}

pub(crate) fn string(keyword: &str, value: &Value, name: &str) -> Result<String> {
    value
        .as_str()
        .map(String::from)
        .ok_or_else(|| Error::invalid_keyword(keyword, "a string", name))
}

pub(crate) fn boolean(keyword: &str, value: &Value, name: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::invalid_keyword(keyword, "a boolean", name))
}

pub(crate) fn unsigned(keyword: &str, value: &Value, name: &str) -> Result<u64> {
    value
        .as_u64()
        .ok_or_else(|| Error::invalid_keyword(keyword, "a non-negative integer", name))
}

pub(crate) fn integer(keyword: &str, value: &Value, name: &str) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| Error::invalid_keyword(keyword, "an integer", name))
}

pub(crate) fn number(keyword: &str, value: &Value, name: &str) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| Error::invalid_keyword(keyword, "a number", name))
}

pub(crate) fn array<'v>(keyword: &str, value: &'v Value, name: &str) -> Result<&'v Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| Error::invalid_keyword(keyword, "an array", name))
}

pub(crate) fn object<'v>(
    keyword: &str,
    value: &'v Value,
    name: &str,
) -> Result<&'v Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::invalid_keyword(keyword, "an object", name))
}

pub(crate) fn string_list(keyword: &str, value: &Value, name: &str) -> Result<Vec<String>> {
    array(keyword, value, name)?
        .iter()
        .map(|item| {
            item.as_str()
                .map(String::from)
                .ok_or_else(|| Error::invalid_keyword(keyword, "an array of strings", name))
        })
        .collect()
}
