//! Lenient accessors over loosely-typed upstream JSON

use serde_json::Value;

/// Walk a chain of object keys, returning `None` at the first missing or null step.
pub fn path<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(value, |current, key| current.get(*key))
        .filter(|v| !v.is_null())
}

/// Finite numeric value, accepting numbers and numeric strings.
///
/// `"NaN"` and `"inf"` parse as floats but are treated as missing.
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

pub fn number_at(value: &Value, keys: &[&str]) -> Option<f64> {
    path(value, keys).and_then(number)
}

/// Integer id, accepting integers and numeric strings.
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn integer_at(value: &Value, keys: &[&str]) -> Option<i64> {
    path(value, keys).and_then(integer)
}

pub fn count_at(value: &Value, keys: &[&str]) -> Option<u32> {
    integer_at(value, keys).and_then(|n| u32::try_from(n).ok())
}

/// Trimmed non-empty string.
pub fn text_at<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    path(value, keys)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub fn array_at<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    path(value, keys).and_then(Value::as_array)
}
