//! Command-tree configuration validation.
//!
//! Catches structural mistakes at configuration time, before any parse:
//! duplicate flags, malformed flag strings, duplicate names, ambiguous
//! arity layouts and name cycles along a command path.
//!
//! # Examples
//!
//! ```
//! use argtree_core::{validate_command, Command, Flag};
//!
//! let ok = Command::new("app").flag(Flag::switch("v", &["-v", "--verbose"]));
//! assert!(validate_command(&ok).is_empty());
//!
//! // "verbose" is not a valid flag string (no leading dashes)
//! let bad = Command::new("app").flag(Flag::switch("v", &["verbose"]));
//! assert!(!validate_command(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::command::Command;
use crate::operand::{Arity, Operand};
use crate::option::Flag;
use crate::token::{self, Token};

/// Structural problems found in a command tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// An option declares no flag strings at all.
    #[error("option '{0}' declares no flags")]
    MissingFlagName(String),
    /// A declared flag string does not match the short/long flag grammar.
    #[error("invalid flag format: {0}")]
    InvalidFlag(String),
    /// Two options in the same command share a flag string.
    #[error("duplicate flag in command: {0}")]
    DuplicateFlag(String),
    /// Two options in the same command share an internal name.
    #[error("duplicate option name in command: {0}")]
    DuplicateOptionName(String),
    /// A value-taking option has an empty metavar.
    #[error("option '{0}' takes a value but has an empty metavar")]
    EmptyMetavar(String),
    /// An exact arity of zero is meaningless; use `AtMostOne` instead.
    #[error("operand '{0}' declares an exact arity of zero")]
    InvalidArity(String),
    /// Two operand slots in the same command share an internal name.
    #[error("duplicate operand name in command: {0}")]
    DuplicateOperandName(String),
    /// More than one unbounded operand slot in one command cannot be
    /// resolved deterministically.
    #[error("second unbounded operand in command: {0}")]
    AmbiguousUnboundedOperand(String),
    /// Two direct children share a name.
    #[error("duplicate subcommand: {0}")]
    DuplicateSubcommand(String),
    /// A command name repeats along a path (e.g. `app remote app`).
    #[error("subcommand cycle detected at path: {0}")]
    SubcommandCycle(String),
}

/// Validates a command tree.
///
/// Returns the problems found; an empty list means the tree is well formed.
///
/// # Examples
///
/// ```
/// use argtree_core::{validate_command, Command, ConfigError, Flag};
///
/// let tree = Command::new("app")
///     .flag(Flag::switch("a", &["-x"]))
///     .flag(Flag::switch("b", &["-x"]));
/// let errors = validate_command(&tree);
/// assert_eq!(errors, vec![ConfigError::DuplicateFlag("-x".into())]);
/// ```
pub fn validate_command(command: &Command) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if command.name().trim().is_empty() {
        errors.push(ConfigError::EmptyCommandName);
        return errors;
    }

    errors.extend(validate_options(command.options()));
    if !errors.is_empty() {
        return errors;
    }

    errors.extend(validate_operands(command.operands()));
    if !errors.is_empty() {
        return errors;
    }

    let mut path = vec![command.name().to_string()];
    errors.extend(validate_children(command.children(), &mut path));

    errors
}

fn validate_children(children: &[Command], path: &mut Vec<String>) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for child in children {
        let name = child.name().trim();
        if name.is_empty() {
            errors.push(ConfigError::EmptyCommandName);
            return errors;
        }

        if !seen.insert(name) {
            errors.push(ConfigError::DuplicateSubcommand(name.to_string()));
            return errors;
        }

        if path.iter().any(|segment| segment == name) {
            let cycle_path = path
                .iter()
                .cloned()
                .chain(std::iter::once(name.to_string()))
                .collect::<Vec<_>>()
                .join(" ");
            errors.push(ConfigError::SubcommandCycle(cycle_path));
            return errors;
        }

        errors.extend(validate_options(child.options()));
        if !errors.is_empty() {
            return errors;
        }

        errors.extend(validate_operands(child.operands()));
        if !errors.is_empty() {
            return errors;
        }

        path.push(name.to_string());
        errors.extend(validate_children(child.children(), path));
        path.pop();
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

fn validate_options(options: &[Flag]) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    let mut seen_flags: HashSet<&str> = HashSet::new();
    let mut seen_names: HashSet<&str> = HashSet::new();

    for option in options {
        if !seen_names.insert(option.name()) {
            errors.push(ConfigError::DuplicateOptionName(option.name().to_string()));
            return errors;
        }

        if option.flags().is_empty() {
            errors.push(ConfigError::MissingFlagName(option.name().to_string()));
            return errors;
        }

        for flag in option.flags() {
            let well_formed = match token::classify(flag) {
                Token::Short { ref rest, .. } => rest.is_empty(),
                Token::Long { ref attached, .. } => attached.is_none(),
                _ => false,
            };
            if !well_formed {
                errors.push(ConfigError::InvalidFlag(flag.clone()));
                return errors;
            }
            if !seen_flags.insert(flag) {
                errors.push(ConfigError::DuplicateFlag(flag.clone()));
                return errors;
            }
        }

        if option.takes_value() && option.metavar().is_none_or(str::is_empty) {
            errors.push(ConfigError::EmptyMetavar(option.name().to_string()));
            return errors;
        }
    }

    errors
}

fn validate_operands(operands: &[Operand]) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut unbounded_seen = false;

    for operand in operands {
        if !seen_names.insert(operand.name()) {
            errors.push(ConfigError::DuplicateOperandName(
                operand.name().to_string(),
            ));
            return errors;
        }

        if operand.arity() == Arity::Exactly(0) {
            errors.push(ConfigError::InvalidArity(operand.name().to_string()));
            return errors;
        }

        if operand.arity().is_unbounded() {
            if unbounded_seen {
                errors.push(ConfigError::AmbiguousUnboundedOperand(
                    operand.name().to_string(),
                ));
                return errors;
            }
            unbounded_seen = true;
        }
    }

    errors
}
