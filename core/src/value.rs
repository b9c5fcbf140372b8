//! Resolved option values.
//!
//! Every declared option carries a [`Value`] as its default and produces one
//! while parsing. The built-in option kinds only ever produce `Bool`, `Int`,
//! `Str` and `List`; the remaining shapes exist for the built-in coercion
//! functions (`Ints` for numeric ranges, `Map` for key/value pairs) and for
//! custom coercions.

use std::collections::BTreeMap;

use serde::Serialize;

/// A resolved option value.
///
/// Serializes untagged, so a dumped parse outcome reads as plain JSON
/// (`true`, `3`, `"path"`, `["a", "b"]`, ...).
///
/// # Examples
///
/// ```
/// use argtree_core::Value;
///
/// let v = Value::List(vec!["a".into(), "b".into()]);
/// assert_eq!(serde_json::to_string(&v).unwrap(), r#"["a","b"]"#);
/// assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value (a scalar option that was never matched and declares no
    /// default).
    #[default]
    Null,
    /// Boolean, produced by switches.
    Bool(bool),
    /// Integer, produced by counters.
    Int(i64),
    /// Single string value.
    Str(String),
    /// List of string values.
    List(Vec<String>),
    /// List of integers, produced by the range coercion.
    Ints(Vec<i64>),
    /// Key/value pairs, produced by the kv coercion.
    Map(BTreeMap<String, String>),
}

impl Value {
    /// Returns the boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list payload, if this is a `List`.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the map payload, if this is a `Map`.
    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// True for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}
