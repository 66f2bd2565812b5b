//! Common helpers: numeric cell parsing and JSON payload navigation.
//!
//! Fantrax responses are built for a UI table renderer, so numbers arrive as
//! display strings (`"10,813.2"`), ids arrive as either strings or numbers,
//! and most fields are only present when the league enables them.

use serde_json::Value;
use std::str::FromStr;

use crate::error::{FantraxError, Result};


/// Strip thousands separators from a display number.
pub fn strip_separators(raw: &str) -> String {
    raw.trim().replace(',', "")
}

/// Parse a display number such as `"10,813.2"` into any `FromStr` numeric type.
pub fn parse_number<T: FromStr>(raw: &str) -> Option<T> {
    strip_separators(raw).parse().ok()
}

/// Render a scalar JSON value (string, number or bool) as text.
///
/// Returns `None` for null, arrays and objects.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Borrow a required field of a payload object.
pub fn field<'a>(value: &'a Value, key: &str, context: &str) -> Result<&'a Value> {
    value
        .get(key)
        .ok_or_else(|| FantraxError::malformed(context, format!("missing field `{key}`")))
}

/// Borrow a required string field.
pub fn str_field<'a>(value: &'a Value, key: &str, context: &str) -> Result<&'a str> {
    field(value, key, context)?
        .as_str()
        .ok_or_else(|| FantraxError::malformed(context, format!("field `{key}` is not a string")))
}

/// Required field rendered as text; accepts strings and numbers.
pub fn text_field(value: &Value, key: &str, context: &str) -> Result<String> {
    scalar_text(field(value, key, context)?)
        .ok_or_else(|| FantraxError::malformed(context, format!("field `{key}` is not a scalar")))
}

/// Borrow a required array field.
pub fn array_field<'a>(value: &'a Value, key: &str, context: &str) -> Result<&'a Vec<Value>> {
    field(value, key, context)?
        .as_array()
        .ok_or_else(|| FantraxError::malformed(context, format!("field `{key}` is not an array")))
}

/// Follow a path of object keys, failing on the first missing segment.
pub fn path<'a>(value: &'a Value, keys: &[&str], context: &str) -> Result<&'a Value> {
    keys.iter().try_fold(value, |current, key| field(current, key, context))
}

/// Required numeric field; accepts JSON numbers and separator-formatted strings.
pub fn number_field<T: FromStr>(value: &Value, key: &str, context: &str) -> Result<T> {
    let text = text_field(value, key, context)?;
    parse_number(&text).ok_or_else(|| {
        FantraxError::malformed(context, format!("field `{key}` is not numeric: {text:?}"))
    })
}

/// Content of a table cell parsed as a number.
pub fn cell_number<T: FromStr>(cell: &Value, context: &str) -> Result<T> {
    number_field(cell, "content", context)
}

/// Last run of ASCII digits at the end of a caption (`"Playoffs - Round 3"` -> 3).
pub fn trailing_number(caption: &str) -> Option<u32> {
    let trimmed = caption.trim_end();
    let digits = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| &trimmed[i..])?;
    digits.parse().ok()
}
