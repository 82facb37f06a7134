//! `key:value` validation tokens.

use crate::error::{Error, Result};
use serde_json::{Number, Value};

/// Parse a validation token such as `minLength:1` into its key and a typed value.
///
/// The value is coerced in order: `true`/`false` become booleans, strings whose
/// integer form prints back identically become integers, likewise for floats,
/// and anything else stays a string. `"010"` therefore stays a string.
pub fn parse_validation_token(token: &str) -> Result<(String, Value)> {
    let (key, raw) = token.split_once(':').ok_or_else(|| Error::Parse {
        token: token.to_string(),
    })?;

    Ok((key.to_string(), coerce(raw)))
}

fn coerce(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(int) = raw.parse::<i64>() {
        if int.to_string() == raw {
            return Value::Number(int.into());
        }
    }

    if let Ok(float) = raw.parse::<f64>() {
        if float.to_string() == raw {
            if let Some(number) = Number::from_f64(float) {
                return Value::Number(number);
            }
        }
    }

    Value::String(raw.to_string())
}
