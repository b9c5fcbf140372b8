//! Value validators for options and operands.
//!
//! A validator pairs a predicate over the raw token with an optional error
//! message template. Templates may contain `${value}`, which is replaced
//! with the rejected input when the error surfaces.
//!
//! The constructors here cover the common cases; anything else can be built
//! with [`Validator::new`].
//!
//! # Examples
//!
//! ```
//! use argtree_core::validators;
//!
//! let v = validators::integer();
//! assert!(v.accepts("42"));
//! assert!(!v.accepts("4.2"));
//! ```

use std::fmt;

use regex::Regex;

/// A single link of a validator chain.
pub struct Validator {
    check: Box<dyn Fn(&str) -> bool>,
    template: Option<String>,
}

impl Validator {
    /// Creates a validator from a predicate, with the generic error message.
    pub fn new(check: impl Fn(&str) -> bool + 'static) -> Self {
        Self {
            check: Box::new(check),
            template: None,
        }
    }

    /// Creates a validator with an error message template. `${value}` in the
    /// template is replaced with the rejected input.
    ///
    /// # Examples
    ///
    /// ```
    /// use argtree_core::Validator;
    ///
    /// let v = Validator::with_message(|s| !s.is_empty(), "'${value}' is empty");
    /// assert!(v.accepts("x"));
    /// ```
    pub fn with_message(check: impl Fn(&str) -> bool + 'static, template: &str) -> Self {
        Self {
            check: Box::new(check),
            template: Some(template.to_string()),
        }
    }

    /// Runs the predicate against a candidate value.
    pub fn accepts(&self, value: &str) -> bool {
        (self.check)(value)
    }

    /// Renders the rejection message for a value.
    pub(crate) fn message(&self, value: &str) -> String {
        match &self.template {
            Some(template) => template.replace("${value}", value),
            None => format!("value \"{value}\" rejected"),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

/// Runs a validator chain in order, short-circuiting on the first rejection.
/// An empty chain always accepts.
pub(crate) fn run_chain(chain: &[Validator], value: &str) -> Result<(), String> {
    for validator in chain {
        if !validator.accepts(value) {
            return Err(validator.message(value));
        }
    }
    Ok(())
}

/// Accepts tokens that parse as a signed integer.
pub fn integer() -> Validator {
    Validator::with_message(
        |value| value.parse::<i64>().is_ok(),
        "'${value}' is not an integer",
    )
}

/// Accepts tokens that parse as a floating point number.
pub fn number() -> Validator {
    Validator::with_message(
        |value| value.parse::<f64>().is_ok(),
        "'${value}' is not a number",
    )
}

/// Accepts tokens matching the given regex.
///
/// # Examples
///
/// ```
/// use argtree_core::validators;
/// use regex::Regex;
///
/// let v = validators::pattern(Regex::new(r"^[a-z]+$").unwrap());
/// assert!(v.accepts("abc"));
/// assert!(!v.accepts("ABC"));
/// ```
pub fn pattern(re: Regex) -> Validator {
    Validator::with_message(
        move |value| re.is_match(value),
        "'${value}' has an invalid format",
    )
}

/// Accepts tokens equal to one of the given choices.
pub fn one_of(choices: &[&str]) -> Validator {
    let choices: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
    let listed = choices.join(", ");
    Validator::with_message(
        move |value| choices.iter().any(|choice| choice == value),
        &format!("'${{value}}' is not one of: {listed}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_short_circuits_on_first_failure() {
        let chain = vec![
            Validator::with_message(|v| !v.is_empty(), "empty"),
            Validator::with_message(|v| v.len() < 4, "'${value}' too long"),
        ];

        assert!(run_chain(&chain, "abc").is_ok());
        assert_eq!(run_chain(&chain, "").unwrap_err(), "empty");
        assert_eq!(
            run_chain(&chain, "abcdef").unwrap_err(),
            "'abcdef' too long"
        );
    }

    #[test]
    fn test_empty_chain_accepts() {
        assert!(run_chain(&[], "anything").is_ok());
    }

    #[test]
    fn test_template_substitution() {
        let v = Validator::with_message(|_| false, "bad input: ${value}");
        assert_eq!(v.message("xyz"), "bad input: xyz");
    }

    #[test]
    fn test_default_message() {
        let v = Validator::new(|_| false);
        assert_eq!(v.message("xyz"), "value \"xyz\" rejected");
    }

    #[test]
    fn test_one_of_lists_choices_in_message() {
        let v = one_of(&["json", "text"]);
        assert!(v.accepts("json"));
        assert!(!v.accepts("xml"));
        assert_eq!(v.message("xml"), "'xml' is not one of: json, text");
    }

    #[test]
    fn test_numeric_validators() {
        assert!(integer().accepts("-17"));
        assert!(!integer().accepts("1.5"));
        assert!(number().accepts("1.5"));
        assert!(!number().accepts("one"));
    }
}
