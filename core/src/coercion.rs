//! Built-in coercion functions.
//!
//! A coercion maps a raw token plus the option's current and default values
//! to the option's next value: `(raw, current, default) -> new`. The four
//! option kinds route their value updates through the functions here, and
//! [`Flag::coerce`](crate::Flag::coerce) accepts any function with the same
//! signature to implement custom value types.
//!
//! Coercions are pure and total over string input. They never fail; input
//! that cannot be interpreted (e.g. a non-numeric range bound) degrades to a
//! zero value. Rejecting malformed input is the job of the validator chain,
//! which runs before coercion.
//!
//! # Examples
//!
//! ```
//! use argtree_core::{coercion, Value};
//!
//! let v = coercion::listing("a, b,c", Value::Null, &Value::Null);
//! assert_eq!(v, Value::List(vec!["a".into(), "b".into(), "c".into()]));
//!
//! let v = coercion::range("2..8", Value::Null, &Value::Null);
//! assert_eq!(v, Value::Ints(vec![2, 8]));
//! ```

use std::collections::BTreeMap;

use crate::value::Value;

/// Appends the raw token to the current list.
///
/// A non-list current value is re-seeded from the default (or an empty list)
/// before appending.
pub fn collect(raw: &str, current: Value, default: &Value) -> Value {
    let mut items = match current {
        Value::List(items) => items,
        _ => match default {
            Value::List(items) => items.clone(),
            _ => Vec::new(),
        },
    };
    items.push(raw.to_string());
    Value::List(items)
}

/// Increments the current counter by one. The raw token is ignored.
pub fn count(_raw: &str, current: Value, _default: &Value) -> Value {
    Value::Int(current.as_int().unwrap_or(0) + 1)
}

/// Splits the raw token on the first `=` and merges the pair into the
/// current map. A token without `=` maps the whole token to an empty string.
pub fn kv(raw: &str, current: Value, default: &Value) -> Value {
    let mut entries = match current {
        Value::Map(entries) => entries,
        _ => match default {
            Value::Map(entries) => entries.clone(),
            _ => BTreeMap::new(),
        },
    };
    let (key, value) = raw.split_once('=').unwrap_or((raw, ""));
    entries.insert(key.to_string(), value.to_string());
    Value::Map(entries)
}

/// Splits the raw token on commas, trimming surrounding whitespace from each
/// entry. Replaces the current value.
pub fn listing(raw: &str, _current: Value, _default: &Value) -> Value {
    Value::List(raw.split(',').map(|part| part.trim().to_string()).collect())
}

/// Splits the raw token on `..` and parses each bound as an integer.
/// Unparseable bounds degrade to 0.
pub fn range(raw: &str, _current: Value, _default: &Value) -> Value {
    Value::Ints(
        raw.split("..")
            .map(|part| part.trim().parse::<i64>().unwrap_or(0))
            .collect(),
    )
}

/// Stores the raw token as-is, overwriting the current value.
pub fn value(raw: &str, _current: Value, _default: &Value) -> Value {
    Value::Str(raw.to_string())
}
