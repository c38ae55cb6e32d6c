//! Bidirectional conversion between native values and attribute values.
//!
//! Encoding is total: every [`Value`] has an [`AttributeValue`] form.
//! Decoding can only fail on an attribute carrying an unknown tag or a
//! malformed number string, which surfaces as [`DecodeError`].
//!
//! Empty strings are preserved as `{"S": ""}` rather than collapsed to
//! `NULL`, so `from_attr(to_attr(v)) == v` holds for every supported value.

use std::collections::HashMap;

use thiserror::Error;

use crate::attribute_value::AttributeValue;
use crate::value::Value;

/// Errors produced when decoding attribute values.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The attribute's number string is not valid decimal text.
    #[error("invalid number string in attribute value: {text:?}")]
    InvalidNumber {
        /// The offending number text.
        text: String,
    },
}

/// Encode a native value into its tagged attribute form.
#[must_use]
pub fn to_attr(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::S(s) => AttributeValue::S(s.clone()),
        Value::N(n) => AttributeValue::N(format_number(*n)),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::B(b) => AttributeValue::B(b.clone()),
        Value::L(items) => AttributeValue::L(items.iter().map(to_attr).collect()),
        Value::M(entries) => AttributeValue::M(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), to_attr(v)))
                .collect(),
        ),
    }
}

/// Encode a string-keyed map of native values element-wise.
#[must_use]
pub fn to_attr_map(item: &HashMap<String, Value>) -> HashMap<String, AttributeValue> {
    item.iter().map(|(k, v)| (k.clone(), to_attr(v))).collect()
}

/// Decode a tagged attribute back into a native value.
pub fn from_attr(attr: &AttributeValue) -> Result<Value, DecodeError> {
    match attr {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::S(s) => Ok(Value::S(s.clone())),
        AttributeValue::N(n) => n
            .parse::<f64>()
            .map(Value::N)
            .map_err(|_| DecodeError::InvalidNumber { text: n.clone() }),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::B(b) => Ok(Value::B(b.clone())),
        AttributeValue::L(items) => items.iter().map(from_attr).collect::<Result<_, _>>().map(Value::L),
        AttributeValue::M(entries) => entries
            .iter()
            .map(|(k, v)| Ok((k.clone(), from_attr(v)?)))
            .collect::<Result<_, _>>()
            .map(Value::M),
    }
}

/// Decode a string-keyed map of attributes element-wise.
pub fn from_attr_map(
    item: &HashMap<String, AttributeValue>,
) -> Result<HashMap<String, Value>, DecodeError> {
    item.iter()
        .map(|(k, v)| Ok((k.clone(), from_attr(v)?)))
        .collect()
}

/// Format a number as decimal text.
///
/// `f64`'s `Display` never produces exponent notation, which is what the
/// store's `N` encoding requires.
#[must_use]
pub fn format_number(n: f64) -> String {
    n.to_string()
}
