//! Native value type.
//!
//! [`Value`] is the language-side counterpart of [`AttributeValue`]: the
//! untyped scalar/composite data callers pass to the query builder and get
//! back from decoded items. The `From` impls exist so builder call sites can
//! write plain literals (`filter("age", 18)`) without manual wrapping.
//!
//! [`AttributeValue`]: crate::AttributeValue

use std::collections::HashMap;

/// A native value: null, string, number, boolean, binary, list, or map.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null (also the decoding of a `NULL` attribute).
    #[default]
    Null,
    /// UTF-8 string.
    S(String),
    /// Number. Stored as `f64`; encoded as decimal text on the wire.
    N(f64),
    /// Boolean.
    Bool(bool),
    /// Raw binary.
    B(bytes::Bytes),
    /// Ordered list of values.
    L(Vec<Value>),
    /// String-keyed map of values.
    M(HashMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string if this is an `S` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is an `N` value.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::N(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a short name for this value's runtime type, for error
    /// messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::S(_) => "string",
            Self::N(_) => "number",
            Self::Bool(_) => "boolean",
            Self::B(_) => "binary",
            Self::L(_) => "list",
            Self::M(_) => "map",
        }
    }

    /// Renders this value as a composite-key fragment.
    ///
    /// Key segments are joined as plain text, so only scalar values have a
    /// fragment form. Returns `None` for null, binary, list, and map values.
    #[must_use]
    pub fn key_fragment(&self) -> Option<String> {
        match self {
            Self::S(s) => Some(s.clone()),
            Self::N(n) => Some(crate::codec::format_number(*n)),
            Self::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::S(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::S(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::N(n)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::N(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::N(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::N(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<bytes::Bytes> for Value {
    fn from(b: bytes::Bytes) -> Self {
        Self::B(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::L(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
    fn from(entries: HashMap<String, T>) -> Self {
        Self::M(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_convert_literals_into_values() {
        assert_eq!(Value::from("wan"), Value::S("wan".to_owned()));
        assert_eq!(Value::from(18), Value::N(18.0));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_should_render_scalar_key_fragments() {
        assert_eq!(Value::from("a").key_fragment().as_deref(), Some("a"));
        assert_eq!(Value::from(10).key_fragment().as_deref(), Some("10"));
        assert_eq!(Value::from(false).key_fragment().as_deref(), Some("false"));
        assert_eq!(Value::Null.key_fragment(), None);
        assert_eq!(Value::L(vec![]).key_fragment(), None);
    }
}
