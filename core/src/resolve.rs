//! Per-parse resolution state and the operand arity resolver.
//!
//! Command declarations are immutable while parsing; everything mutable
//! lives here and is constructed fresh for every [`Command::parse`] call,
//! so repeated parses against one tree are safe.
//!
//! The arity resolver is the one algorithmically subtle piece: it
//! reconciles a list of operand slots, some with open-ended counts, against
//! the positional tokens collected at one command level in a single forward
//! pass. Bounded slots fill greedily. An unbounded slot also fills
//! greedily, but only while enough tokens remain to satisfy the combined
//! minimums of every slot after it; once the remaining count drops to that
//! reservation, attribution moves on. This is what lets `files...` be
//! followed by a mandatory `dest` and still parse.
//!
//! [`Command::parse`]: crate::Command::parse

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use crate::error::{ArityIssue, ParseError};
use crate::operand::{self, Operand};
use crate::option::Flag;
use crate::validators;
use crate::value::Value;

/// Resolved state of one option after a parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionMatch {
    /// The value as of the last match, or the declared default.
    pub value: Value,
    /// How many times the option was matched; zero means the default is
    /// being reported.
    pub occurrences: u32,
}

/// Resolved options of one command level, keyed by internal option name.
///
/// Every declared option is present; unmatched options report their
/// declared default with an occurrence count of zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ResolvedOptions {
    entries: BTreeMap<String, OptionMatch>,
}

impl ResolvedOptions {
    /// The value of an option by internal name.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).map(|m| &m.value)
    }

    /// Whether the option was matched at least once.
    pub fn is_set(&self, name: &str) -> bool {
        self.occurrences(name) > 0
    }

    /// How many times the option was matched.
    pub fn occurrences(&self, name: &str) -> u32 {
        self.entries.get(name).map_or(0, |m| m.occurrences)
    }

    /// Iterates over `(name, match)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionMatch)> {
        self.entries.iter().map(|(name, m)| (name.as_str(), m))
    }
}

/// Resolved operands of one command level, keyed by internal slot name.
///
/// Every declared slot is present; a slot that bound no input token reports
/// its declared defaults (or an empty list).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ResolvedOperands {
    entries: BTreeMap<String, Vec<String>>,
}

impl ResolvedOperands {
    /// All values bound to a slot.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// The first value bound to a slot. Convenient for `Exactly(1)` slots.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).and_then(|v| v.first()).map(String::as_str)
    }

    /// Iterates over `(name, values)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

/// One dispatched command level: the path of command names from the root
/// and the level's resolved options and operands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invocation {
    pub path: Vec<String>,
    pub options: ResolvedOptions,
    pub operands: ResolvedOperands,
}

/// Result of a successful parse: every dispatched level in dispatch order.
///
/// The action callbacks remain the primary channel; the outcome records the
/// same data for embedders that prefer inspecting a return value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ParseOutcome {
    pub invocations: Vec<Invocation>,
}

impl ParseOutcome {
    /// The deepest dispatched level.
    pub fn last(&self) -> Option<&Invocation> {
        self.invocations.last()
    }

    /// Finds the invocation for an exact command path.
    pub fn for_path(&self, path: &[&str]) -> Option<&Invocation> {
        self.invocations
            .iter()
            .find(|inv| inv.path.iter().map(String::as_str).eq(path.iter().copied()))
    }
}

/// Mutable option state of one level during one parse.
pub(crate) struct OptionState {
    values: Vec<Value>,
    occurrences: Vec<u32>,
}

impl OptionState {
    pub(crate) fn new(flags: &[Flag]) -> Self {
        Self {
            values: flags.iter().map(|f| f.default().clone()).collect(),
            occurrences: vec![0; flags.len()],
        }
    }

    /// Applies one match of option `idx`, returning a reference to the
    /// updated value for the action callback.
    pub(crate) fn update(&mut self, idx: usize, flag: &Flag, raw: Option<&str>) -> &Value {
        let current = std::mem::take(&mut self.values[idx]);
        self.values[idx] = flag.apply(current, raw);
        self.occurrences[idx] += 1;
        &self.values[idx]
    }

    pub(crate) fn occurrences(&self, idx: usize) -> u32 {
        self.occurrences[idx]
    }

    pub(crate) fn finish(self, flags: &[Flag]) -> ResolvedOptions {
        let entries = flags
            .iter()
            .zip(self.values)
            .zip(self.occurrences)
            .map(|((flag, value), occurrences)| {
                (flag.name().to_string(), OptionMatch { value, occurrences })
            })
            .collect();
        ResolvedOptions { entries }
    }
}

/// Assigns positional tokens to operand slots.
///
/// Single forward pass with the lookahead reservation described in the
/// module docs. Each consumed token runs through its slot's validator chain
/// before being bound; the first rejection aborts the parse.
pub(crate) fn resolve_operands(
    operands: &[Operand],
    tokens: &[String],
) -> Result<ResolvedOperands, ParseError> {
    let bounds: Vec<(usize, Option<usize>)> = operands.iter().map(Operand::bounds).collect();

    let needed = operand::total_min(operands);
    if tokens.len() < needed {
        return Err(ParseError::ArityViolation {
            issue: ArityIssue::TooFew,
            detail: format!("expected at least {needed}, got {}", tokens.len()),
        });
    }
    if let Some(capacity) = operand::total_max(operands) {
        if tokens.len() > capacity {
            return Err(ParseError::ArityViolation {
                issue: ArityIssue::TooMany,
                detail: format!("expected at most {capacity}, got {}", tokens.len()),
            });
        }
    }

    // reservation[i] = combined minimum of slots i.. (one past the end: 0)
    let mut reservation = vec![0usize; operands.len() + 1];
    for i in (0..operands.len()).rev() {
        reservation[i] = reservation[i + 1] + bounds[i].0;
    }

    let mut assigned: Vec<Vec<String>> = operands.iter().map(|_| Vec::new()).collect();
    let mut slot = 0;
    let mut next = 0;
    while next < tokens.len() && slot < operands.len() {
        let remaining = tokens.len() - next;
        let take = match bounds[slot].1 {
            Some(max) => assigned[slot].len() < max,
            None => remaining > reservation[slot + 1],
        };
        if !take {
            slot += 1;
            continue;
        }

        let token = &tokens[next];
        if let Err(message) = validators::run_chain(operands[slot].validators(), token) {
            return Err(ParseError::InvalidOperandValue {
                operand: operands[slot].name().to_string(),
                message,
            });
        }
        trace!(operand = operands[slot].name(), token = %token, "operand bound");
        assigned[slot].push(token.clone());
        next += 1;
    }

    // A bounded slot can starve a later mandatory one even when the totals
    // fit, e.g. [a: "?", b: "+"] against a single token.
    for (i, op) in operands.iter().enumerate() {
        if assigned[i].len() < bounds[i].0 {
            return Err(ParseError::ArityViolation {
                issue: ArityIssue::TooFew,
                detail: format!(
                    "operand '{}' requires at least {} value(s), got {}",
                    op.name(),
                    bounds[i].0,
                    assigned[i].len()
                ),
            });
        }
    }

    let entries = operands
        .iter()
        .zip(assigned)
        .map(|(op, values)| {
            let values = if values.is_empty() && !op.defaults().is_empty() {
                op.defaults().to_vec()
            } else {
                values
            };
            (op.name().to_string(), values)
        })
        .collect();
    Ok(ResolvedOperands { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::Arity;
    use crate::validators::Validator;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reservation_holds_back_trailing_minimums() {
        let ops = vec![
            Operand::new("files", Arity::ZeroOrMore),
            Operand::new("dest", Arity::Exactly(1)),
        ];
        let resolved = resolve_operands(&ops, &tokens(&["f1", "f2", "f3"])).unwrap();
        assert_eq!(resolved.values("files").unwrap(), ["f1", "f2"]);
        assert_eq!(resolved.values("dest").unwrap(), ["f3"]);
    }

    #[test]
    fn test_optional_slot_fills_before_plus_slot() {
        let ops = vec![
            Operand::new("a", Arity::AtMostOne),
            Operand::new("b", Arity::OneOrMore),
        ];
        let resolved = resolve_operands(&ops, &tokens(&["x", "y", "z"])).unwrap();
        assert_eq!(resolved.values("a").unwrap(), ["x"]);
        assert_eq!(resolved.values("b").unwrap(), ["y", "z"]);
    }

    #[test]
    fn test_greedy_optional_slot_starves_mandatory_follower() {
        let ops = vec![
            Operand::new("a", Arity::AtMostOne),
            Operand::new("b", Arity::OneOrMore),
        ];
        let err = resolve_operands(&ops, &tokens(&["x"])).unwrap_err();
        assert!(matches!(
            err,
            ParseError::ArityViolation {
                issue: ArityIssue::TooFew,
                ..
            }
        ));
    }

    #[test]
    fn test_too_few_and_too_many_upfront() {
        let ops = vec![Operand::new("pair", Arity::Exactly(2))];

        let err = resolve_operands(&ops, &tokens(&["only"])).unwrap_err();
        assert!(matches!(
            err,
            ParseError::ArityViolation {
                issue: ArityIssue::TooFew,
                ..
            }
        ));

        let err = resolve_operands(&ops, &tokens(&["a", "b", "c"])).unwrap_err();
        assert!(matches!(
            err,
            ParseError::ArityViolation {
                issue: ArityIssue::TooMany,
                ..
            }
        ));
    }

    #[test]
    fn test_plus_absorbs_remainder_before_bounded_tail() {
        let ops = vec![
            Operand::new("srcs", Arity::OneOrMore),
            Operand::new("dest", Arity::Exactly(1)),
        ];
        let resolved = resolve_operands(&ops, &tokens(&["a", "b", "c", "d"])).unwrap();
        assert_eq!(resolved.values("srcs").unwrap(), ["a", "b", "c"]);
        assert_eq!(resolved.values("dest").unwrap(), ["d"]);
    }

    #[test]
    fn test_operand_validator_failure_carries_template() {
        let ops = vec![
            Operand::new("count", Arity::Exactly(1)).validator(Validator::with_message(
                |v| v.parse::<i64>().is_ok(),
                "'${value}' is not a number",
            )),
        ];
        let err = resolve_operands(&ops, &tokens(&["ten"])).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidOperandValue {
                operand: "count".into(),
                message: "'ten' is not a number".into(),
            }
        );
    }

    #[test]
    fn test_empty_slot_reports_defaults() {
        let ops = vec![
            Operand::new("targets", Arity::ZeroOrMore).with_defaults(&["all"]),
        ];
        let resolved = resolve_operands(&ops, &tokens(&[])).unwrap();
        assert_eq!(resolved.values("targets").unwrap(), ["all"]);
    }

    #[test]
    fn test_no_operands_no_tokens() {
        let resolved = resolve_operands(&[], &tokens(&[])).unwrap();
        assert_eq!(resolved.iter().count(), 0);
    }
}
