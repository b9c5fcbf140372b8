//! Parse error taxonomy.
//!
//! Every error is terminal for the parse in which it occurs: the first one
//! aborts the whole recursive dispatch and propagates to the original
//! caller. Action callbacks fired at shallower levels before the error have
//! already run and are not undone.
//!
//! Presentation is the embedder's job. The library never prints errors or
//! terminates the process; it returns these variants and the embedder maps
//! them to messages and exit codes.

use std::fmt;

use thiserror::Error;

/// Which bound of an operand arity declaration was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityIssue {
    /// Fewer positional tokens than the combined minimums require.
    TooFew,
    /// More positional tokens than the combined maximums can absorb.
    TooMany,
}

impl fmt::Display for ArityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityIssue::TooFew => write!(f, "too few"),
            ArityIssue::TooMany => write!(f, "too many"),
        }
    }
}

/// Errors surfaced by [`Command::parse`](crate::Command::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token of option shape did not match any declared flag.
    #[error("unknown option: {flag}")]
    UnknownOption { flag: String },
    /// A value-taking option was the last token of its level.
    #[error("missing value for option: {flag}")]
    MissingValue { flag: String },
    /// An option value was rejected by its validator chain.
    #[error("invalid value for option {flag}: {message}")]
    InvalidOptionValue { flag: String, message: String },
    /// An operand value was rejected by its validator chain.
    #[error("invalid value for operand {operand}: {message}")]
    InvalidOperandValue { operand: String, message: String },
    /// The positional tokens of a level cannot satisfy its operand arities.
    #[error("{issue} operands: {detail}")]
    ArityViolation { issue: ArityIssue, detail: String },
    /// A required option was never matched at its level.
    #[error("missing required option: {flags}")]
    MissingRequiredOption { flags: String },
    /// A trailing token at the root matched neither an operand slot nor a
    /// subcommand name.
    #[error("unrecognized trailing argument: {token}")]
    TooManyArguments { token: String },
}
