//! Helpers for reading simulation inputs out of a `serde_json::Value` object.
//!
//! The `param_*` readers never fail: a missing key or a value of the wrong
//! type yields the default, so a front end can send partial updates every
//! frame. [`check_types`] is the strict counterpart, used where a typo in a
//! scene file should be reported instead of silently ignored.

use serde_json::Value;

use crate::error::LabError;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Like [`param_f64`], then clamped to `min..=max`. Slider inputs go through this.
pub fn param_f64_clamped(params: &Value, name: &str, default: f64, min: f64, max: f64) -> f64 {
    let v = param_f64(params, name, default);
    if v.is_finite() {
        v.clamp(min, max)
    } else {
        default
    }
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds if the JSON value is a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Like [`param_usize`], then clamped to `min..=max`.
pub fn param_usize_clamped(
    params: &Value,
    name: &str,
    default: usize,
    min: usize,
    max: usize,
) -> usize {
    param_usize(params, name, default).clamp(min, max)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a string from `params[name]`, returning `default` if missing or wrong type.
pub fn param_str<'a>(params: &'a Value, name: &str, default: &'a str) -> &'a str {
    params.get(name).and_then(Value::as_str).unwrap_or(default)
}

/// JSON type name as used in parameter schemas.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_u64() || n.is_i64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Checks every key of `params` that `schema` describes against the
/// schema's `"type"`.
///
/// Keys the schema does not mention are ignored. An integer satisfies a
/// `"number"` entry; `"choice"` entries expect strings.
pub fn check_types(params: &Value, schema: &Value) -> Result<(), LabError> {
    let Some(entries) = params.as_object() else {
        return Ok(());
    };
    for (name, value) in entries {
        let Some(expected) = schema
            .get(name)
            .and_then(|s| s.get("type"))
            .and_then(Value::as_str)
        else {
            continue;
        };
        let got = json_type_name(value);
        let ok = match expected {
            "number" => got == "number" || got == "integer",
            "choice" => got == "string",
            other => got == other,
        };
        if !ok {
            return Err(LabError::ParamTypeMismatch {
                name: name.clone(),
                expected: expected.to_owned(),
                got: got.to_owned(),
            });
        }
    }
    Ok(())
}
