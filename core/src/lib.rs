//! Command tree declaration and argument parsing.
//!
//! This crate models a CLI as a tree of commands and parses raw argument
//! tokens against it:
//!
//! - [`Command`] — a node of the tree: options, operand slots, child
//!   commands, an action callback, and the parse driver.
//! - [`Flag`] — one option: flag strings, kind (switch, counter, scalar,
//!   list), default, validators, coercion and per-match action.
//! - [`Operand`] — one positional slot with an [`Arity`] (`exact`, `?`,
//!   `*`, `+`), validators and defaults.
//! - [`Value`] — resolved option values, JSON-serializable.
//!
//! Parsing recognizes short clusters (`-abc`), long options with attached
//! values (`--level=3`), the `--` literal marker, positional operands
//! resolved against their arities, and chained subcommand invocations in a
//! single token stream. Structural mistakes in a tree are caught by
//! [`validate_command`]; parse failures surface as [`ParseError`].
//!
//! Usage and help rendering live in [`help`]; built-in coercions and
//! validators in [`coercion`] and [`validators`].
//!
//! # Example
//!
//! ```
//! use argtree_core::{Arity, Command, Flag, Operand, Value};
//!
//! let app = Command::new("shipit")
//!     .flag(Flag::counter("verbose", &["-v", "--verbose"]))
//!     .subcommand(
//!         Command::new("copy")
//!             .flag(Flag::switch("force", &["-f", "--force"]))
//!             .operand(Operand::new("files", Arity::OneOrMore))
//!             .operand(Operand::new("dest", Arity::Exactly(1))),
//!     );
//!
//! let outcome = app.parse(["-v", "copy", "a.txt", "b.txt", "backup/"]).unwrap();
//!
//! let root = outcome.for_path(&["shipit"]).unwrap();
//! assert_eq!(root.options.value("verbose"), Some(&Value::Int(1)));
//!
//! let copy = outcome.for_path(&["shipit", "copy"]).unwrap();
//! assert_eq!(copy.operands.values("files").unwrap(), ["a.txt", "b.txt"]);
//! assert_eq!(copy.operands.first("dest"), Some("backup/"));
//! ```

pub mod coercion;
mod command;
mod error;
pub mod help;
mod operand;
mod option;
mod resolve;
mod token;
mod validate;
pub mod validators;
mod value;
mod wrap;

pub use command::{Command, CommandAction};
pub use error::{ArityIssue, ParseError};
pub use operand::{Arity, Operand};
pub use option::{Coercion, Flag, FlagAction, FlagKind};
pub use resolve::{Invocation, OptionMatch, ParseOutcome, ResolvedOperands, ResolvedOptions};
pub use token::{Token, classify};
pub use validate::{ConfigError, validate_command};
pub use validators::Validator;
pub use value::Value;
pub use wrap::wordwrap;
