//! Option declarations.
//!
//! A [`Flag`] describes one option: the flag strings that match it, its
//! kind, its declared default, and the validator chain, action callback and
//! coercion function attached to it. Declarations are immutable during
//! parsing; current values live in per-parse resolution state.
//!
//! # Examples
//!
//! ```
//! use argtree_core::{Flag, Value};
//!
//! let verbose = Flag::counter("verbose", &["-v", "--verbose"])
//!     .with_description("Increase output verbosity");
//! assert!(verbose.matches("-v"));
//! assert_eq!(verbose.default(), &Value::Int(0));
//!
//! let output = Flag::scalar("output", &["-o", "--output"])
//!     .with_metavar("FILE")
//!     .required();
//! assert!(output.takes_value());
//! assert!(output.is_required());
//! ```

use std::fmt;

use crate::coercion;
use crate::validators::Validator;
use crate::value::Value;

/// Callback invoked on every successful match of an option, with the
/// option's value as resolved so far.
pub type FlagAction = Box<dyn Fn(&Value)>;

/// Pluggable value-update function: `(raw, current, default) -> new`.
/// Must be pure and total over string input. See [`crate::coercion`] for the
/// built-in set.
pub type Coercion = Box<dyn Fn(&str, Value, &Value) -> Value>;

/// The four built-in option kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Stores a fixed value when matched; consumes no token.
    Switch,
    /// Increments by one on each match; consumes no token.
    Counter,
    /// Consumes one token and overwrites the current value.
    Scalar,
    /// Consumes one token and appends it to the current list.
    List,
}

impl FlagKind {
    /// Whether options of this kind consume a value token.
    pub fn takes_value(self) -> bool {
        matches!(self, FlagKind::Scalar | FlagKind::List)
    }
}

/// One declared option.
pub struct Flag {
    name: String,
    flags: Vec<String>,
    kind: FlagKind,
    metavar: Option<String>,
    required: bool,
    default: Value,
    store: Value,
    validators: Vec<Validator>,
    action: Option<FlagAction>,
    coercion: Option<Coercion>,
    description: String,
}

impl Flag {
    fn new(name: &str, flags: &[&str], kind: FlagKind, default: Value) -> Self {
        Self {
            name: name.to_string(),
            flags: flags.iter().map(|f| f.to_string()).collect(),
            kind,
            metavar: kind.takes_value().then(|| "arg".to_string()),
            required: false,
            default,
            store: Value::Bool(true),
            validators: Vec::new(),
            action: None,
            coercion: None,
            description: String::new(),
        }
    }

    /// Creates a switch. Defaults to `Bool(false)`; a match stores
    /// `Bool(true)` unless [`store`](Flag::store) configures another value.
    pub fn switch(name: &str, flags: &[&str]) -> Self {
        Self::new(name, flags, FlagKind::Switch, Value::Bool(false))
    }

    /// Creates a counter. Defaults to `Int(0)`; each match adds one.
    pub fn counter(name: &str, flags: &[&str]) -> Self {
        Self::new(name, flags, FlagKind::Counter, Value::Int(0))
    }

    /// Creates a scalar option. Defaults to `Null`; each match overwrites
    /// the value with the consumed token.
    pub fn scalar(name: &str, flags: &[&str]) -> Self {
        Self::new(name, flags, FlagKind::Scalar, Value::Null)
    }

    /// Creates a list option. Defaults to an empty list; each match appends
    /// the consumed token.
    pub fn list(name: &str, flags: &[&str]) -> Self {
        Self::new(name, flags, FlagKind::List, Value::List(Vec::new()))
    }

    /// Sets the help description.
    pub fn with_description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    /// Sets the metavar shown in usage output for the consumed value.
    pub fn with_metavar(mut self, name: &str) -> Self {
        self.metavar = Some(name.to_string());
        self
    }

    /// Marks the option as required: parsing fails unless it is matched at
    /// least once at its level.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Overrides the declared default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    /// Sets the value a switch stores when matched.
    pub fn store(mut self, value: impl Into<Value>) -> Self {
        self.store = value.into();
        self
    }

    /// Appends a validator to the chain. Validators run in insertion order
    /// against the raw token, before coercion, and short-circuit on the
    /// first rejection.
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Sets the callback fired on every match of this option.
    pub fn on_match(mut self, action: impl Fn(&Value) + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    /// Replaces the kind's built-in value update with a custom coercion.
    /// Only consulted for value-taking kinds.
    pub fn coerce(mut self, f: impl Fn(&str, Value, &Value) -> Value + 'static) -> Self {
        self.coercion = Some(Box::new(f));
        self
    }

    /// Internal name of the option.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The flag strings matching this option.
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// The flag set joined for display (`-v | --verbose`).
    pub fn flag_set(&self) -> String {
        self.flags.join(" | ")
    }

    /// The option kind.
    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    /// Whether a match consumes a value token.
    pub fn takes_value(&self) -> bool {
        self.kind.takes_value()
    }

    /// The metavar, present iff the option consumes a value.
    pub fn metavar(&self) -> Option<&str> {
        self.metavar.as_deref()
    }

    /// Whether the option must be matched at least once.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The declared default value.
    pub fn default(&self) -> &Value {
        &self.default
    }

    /// The help description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tests whether a flag string matches this option.
    pub fn matches(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    pub(crate) fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub(crate) fn fire_action(&self, value: &Value) {
        if let Some(action) = &self.action {
            action(value);
        }
    }

    /// Computes the next value after a match. `raw` is the consumed token
    /// for value-taking kinds and `None` otherwise.
    pub(crate) fn apply(&self, current: Value, raw: Option<&str>) -> Value {
        match raw {
            None => match self.kind {
                FlagKind::Counter => coercion::count("", current, &self.default),
                _ => self.store.clone(),
            },
            Some(raw) => match &self.coercion {
                Some(f) => f(raw, current, &self.default),
                None => match self.kind {
                    FlagKind::List => coercion::collect(raw, current, &self.default),
                    _ => coercion::value(raw, current, &self.default),
                },
            },
        }
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_stores_configured_value() {
        let plain = Flag::switch("x", &["-x"]);
        assert_eq!(plain.apply(Value::Bool(false), None), Value::Bool(true));

        let custom = Flag::switch("mode", &["-m"]).store("fast");
        assert_eq!(
            custom.apply(Value::Null, None),
            Value::Str("fast".into())
        );
    }

    #[test]
    fn test_counter_increments_per_match() {
        let flag = Flag::counter("v", &["-v"]);
        let v1 = flag.apply(flag.default().clone(), None);
        let v2 = flag.apply(v1, None);
        assert_eq!(v2, Value::Int(2));
    }

    #[test]
    fn test_scalar_overwrites_and_list_appends() {
        let scalar = Flag::scalar("out", &["-o"]);
        let v = scalar.apply(Value::Str("old".into()), Some("new"));
        assert_eq!(v, Value::Str("new".into()));

        let list = Flag::list("inc", &["-I"]);
        let v = list.apply(list.default().clone(), Some("a"));
        let v = list.apply(v, Some("b"));
        assert_eq!(v, Value::List(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_list_initializes_from_declared_default() {
        let list = Flag::list("inc", &["-I"]).default_value(vec!["seed".to_string()]);
        let v = list.apply(list.default().clone(), Some("a"));
        assert_eq!(v, Value::List(vec!["seed".into(), "a".into()]));
    }

    #[test]
    fn test_custom_coercion_replaces_builtin_update() {
        let flag = Flag::scalar("def", &["-D"]).coerce(crate::coercion::kv);
        let v = flag.apply(Value::Null, Some("k=v"));
        assert_eq!(v.as_map().unwrap().get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_metavar_present_iff_value_taking() {
        assert_eq!(Flag::switch("x", &["-x"]).metavar(), None);
        assert_eq!(Flag::scalar("o", &["-o"]).metavar(), Some("arg"));
        assert_eq!(
            Flag::scalar("o", &["-o"]).with_metavar("FILE").metavar(),
            Some("FILE")
        );
    }
}
