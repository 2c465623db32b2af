//! Per-field value coercion
//!
//! Records arrive from hand-edited JSON, older saves and form input, so each
//! field is coerced on its own instead of failing the whole record:
//!
//! - numbers accept JSON numbers and numeric strings
//! - strings accept strings, numbers and booleans
//! - lists accept arrays of strings or a single string
//!
//! Anything else reads as "absent". The `parse_*` functions cover text
//! typed by a user.

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Largest integer an f64 holds exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Errors from parsing user-entered field text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("'{input}' is not a number")]
    NotANumber { input: String },

    #[error("{value} must not be negative")]
    Negative { value: f64 },

    #[error("a value is required")]
    Required,
}

/// Parse a required, non-negative amount
pub fn parse_amount(input: &str) -> Result<f64, FieldError> {
    parse_optional_amount(input)?.ok_or(FieldError::Required)
}

/// Parse an optional, non-negative amount
///
/// Blank input and `none` clear the value.
pub fn parse_optional_amount(input: &str) -> Result<Option<f64>, FieldError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FieldError::NotANumber {
            input: input.to_string(),
        })?;

    if value < 0.0 {
        return Err(FieldError::Negative { value });
    }
    Ok(Some(value))
}

/// Parse an optional free-text value; blank input and `none` clear it
pub fn parse_optional_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split comma- or newline-separated text into a list
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn list(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        Value::String(s) => Some(vec![s]),
        _ => None,
    }
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(Value::deserialize(deserializer)?))
}

/// Text-backed enumerations (difficulty, preparation method)
pub(crate) fn optional_text<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Ok(text(Value::deserialize(deserializer)?)
        .filter(|s| !s.trim().is_empty())
        .map(T::from))
}

pub(crate) fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

pub(crate) fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(&Value::deserialize(deserializer)?))
}

pub(crate) fn optional_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(list(Value::deserialize(deserializer)?))
}

/// Whole numbers are written without a fractional part (`95`, not `95.0`)
pub(crate) fn serialize_amount<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub(crate) fn serialize_optional_amount<S>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serialize_amount(v, serializer),
        None => serializer.serialize_none(),
    }
}
