//! Command tree and the parse driver.
//!
//! A [`Command`] is one node of the command tree: its options, operand
//! slots, child commands and action callback. The tree is built once and
//! stays structurally immutable; [`Command::parse`] walks it against a
//! token stream, consuming options and positionals level by level and
//! descending into matched subcommands, looping to support several chained
//! subcommand invocations in one stream.
//!
//! # Examples
//!
//! ```
//! use argtree_core::{Arity, Command, Flag, Operand};
//!
//! let app = Command::new("shipit")
//!     .flag(Flag::counter("verbose", &["-v", "--verbose"]))
//!     .subcommand(
//!         Command::new("copy")
//!             .flag(Flag::switch("force", &["-f", "--force"]))
//!             .operand(Operand::new("files", Arity::ZeroOrMore))
//!             .operand(Operand::new("dest", Arity::Exactly(1))),
//!     );
//!
//! let outcome = app
//!     .parse(["-vv", "copy", "-f", "a.txt", "b.txt", "backup/"])
//!     .unwrap();
//!
//! let copy = outcome.for_path(&["shipit", "copy"]).unwrap();
//! assert!(copy.options.is_set("force"));
//! assert_eq!(copy.operands.values("files").unwrap(), ["a.txt", "b.txt"]);
//! assert_eq!(copy.operands.first("dest"), Some("backup/"));
//! ```

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::operand::{self, Operand};
use crate::option::Flag;
use crate::resolve::{self, Invocation, OptionState, ParseOutcome, ResolvedOperands, ResolvedOptions};
use crate::token::{self, Token};
use crate::validators;

/// Callback fired when a command level finishes resolving, with the level's
/// options and operands.
pub type CommandAction = Box<dyn Fn(&ResolvedOptions, &ResolvedOperands)>;

/// One node of the command tree.
pub struct Command {
    name: String,
    description: String,
    version: Option<String>,
    options: Vec<Flag>,
    operands: Vec<Operand>,
    children: Vec<Command>,
    action: Option<CommandAction>,
}

impl Command {
    /// Creates a command with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            version: None,
            options: Vec::new(),
            operands: Vec::new(),
            children: Vec::new(),
            action: None,
        }
    }

    /// Sets the help description.
    pub fn with_description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    /// Sets the version string. Meaningful on the root command, where the
    /// version banner is rendered from it.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Adds an option.
    pub fn flag(mut self, flag: Flag) -> Self {
        self.options.push(flag);
        self
    }

    /// Adds a positional-operand slot. Slots resolve in insertion order.
    pub fn operand(mut self, operand: Operand) -> Self {
        self.operands.push(operand);
        self
    }

    /// Adds a child command.
    pub fn subcommand(mut self, child: Command) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the action fired when this level finishes resolving.
    pub fn action(mut self, action: impl Fn(&ResolvedOptions, &ResolvedOperands) + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The help description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The version string, if set.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Declared options, in declaration order.
    pub fn options(&self) -> &[Flag] {
        &self.options
    }

    /// Declared operand slots, in declaration order.
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Child commands, in declaration order.
    pub fn children(&self) -> &[Command] {
        &self.children
    }

    /// Finds a direct child by name.
    pub fn find_child(&self, name: &str) -> Option<&Command> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Finds a declared option by one of its flag strings.
    pub fn find_option(&self, flag: &str) -> Option<&Flag> {
        self.options.iter().find(|opt| opt.matches(flag))
    }

    /// Parses a token stream against this command tree.
    ///
    /// Options and positionals are consumed for this level, the level's
    /// action fires, and parsing descends into a matched subcommand,
    /// repeating for chained subcommand invocations until the stream is
    /// exhausted. The first error aborts the whole parse; a trailing token
    /// that matches neither an operand slot nor a child name surfaces as
    /// [`ParseError::TooManyArguments`].
    ///
    /// Declarations are not mutated; parsing twice against the same tree
    /// yields identical outcomes.
    pub fn parse<I, S>(&self, args: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue: VecDeque<String> = args.into_iter().map(Into::into).collect();
        let mut outcome = ParseOutcome::default();
        let mut path = Vec::new();
        let residual = self.parse_level(&mut queue, &mut path, &mut outcome)?;
        if let Some(token) = residual {
            return Err(ParseError::TooManyArguments { token });
        }
        Ok(outcome)
    }

    /// Parses one command level. Returns the residual token, if a trailing
    /// token matched neither the operand capacity nor a child name.
    fn parse_level(
        &self,
        queue: &mut VecDeque<String>,
        path: &mut Vec<String>,
        outcome: &mut ParseOutcome,
    ) -> Result<Option<String>, ParseError> {
        path.push(self.name.clone());
        debug!(command = %self.name, "consuming level");

        let mut state = OptionState::new(&self.options);
        let mut positionals: Vec<String> = Vec::new();
        let capacity = operand::total_max(&self.operands);
        let mut literal = false;
        let mut trailing: Option<String> = None;

        while let Some(raw) = queue.pop_front() {
            if literal {
                positionals.push(raw);
                continue;
            }
            match token::classify(&raw) {
                Token::LiteralMarker => {
                    trace!("literal mode entered");
                    literal = true;
                }
                Token::Short { flag, rest } => {
                    self.apply_option(&flag, queue, &mut state)?;
                    if !rest.is_empty() {
                        // remaining cluster characters come back as their
                        // own short-option token, after any value the first
                        // character consumed
                        queue.push_front(format!("-{rest}"));
                    }
                }
                Token::Long { flag, attached } => {
                    if let Some(value) = attached {
                        // re-queue so value consumption is uniform with the
                        // `--name value` form
                        queue.push_front(value);
                    }
                    self.apply_option(&flag, queue, &mut state)?;
                }
                Token::Word => {
                    let within = capacity.is_none_or(|max| positionals.len() < max);
                    if within {
                        positionals.push(raw);
                    } else {
                        trailing = Some(raw);
                        break;
                    }
                }
            }
        }

        for (idx, flag) in self.options.iter().enumerate() {
            if flag.is_required() && state.occurrences(idx) == 0 {
                return Err(ParseError::MissingRequiredOption {
                    flags: flag.flag_set(),
                });
            }
        }

        let operands = resolve::resolve_operands(&self.operands, &positionals)?;
        let options = state.finish(&self.options);

        if let Some(action) = &self.action {
            action(&options, &operands);
        }
        outcome.invocations.push(Invocation {
            path: path.clone(),
            options,
            operands,
        });

        let mut residual = trailing;
        while let Some(name) = residual.take() {
            match self.find_child(&name) {
                Some(child) => {
                    debug!(command = %self.name, child = %name, "dispatching subcommand");
                    residual = child.parse_level(queue, path, outcome)?;
                }
                None => {
                    residual = Some(name);
                    break;
                }
            }
        }

        path.pop();
        Ok(residual)
    }

    /// Resolves one matched option flag: lookup, value consumption,
    /// validation, coercion, action.
    fn apply_option(
        &self,
        flag: &str,
        queue: &mut VecDeque<String>,
        state: &mut OptionState,
    ) -> Result<(), ParseError> {
        let idx = self
            .options
            .iter()
            .position(|opt| opt.matches(flag))
            .ok_or_else(|| ParseError::UnknownOption {
                flag: flag.to_string(),
            })?;
        let declared = &self.options[idx];

        let raw = if declared.takes_value() {
            let value = queue.pop_front().ok_or_else(|| ParseError::MissingValue {
                flag: flag.to_string(),
            })?;
            if let Err(message) = validators::run_chain(declared.validators(), &value) {
                return Err(ParseError::InvalidOptionValue {
                    flag: flag.to_string(),
                    message,
                });
            }
            Some(value)
        } else {
            None
        };

        debug!(command = %self.name, flag, value = raw.as_deref(), "option matched");
        let value = state.update(idx, declared, raw.as_deref());
        declared.fire_action(value);
        Ok(())
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("operands", &self.operands)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::Arity;
    use crate::value::Value;

    #[test]
    fn test_combined_short_flags_equal_separate_ones() {
        let cmd = Command::new("t")
            .flag(Flag::switch("a", &["-a"]))
            .flag(Flag::switch("b", &["-b"]))
            .flag(Flag::switch("c", &["-c"]));

        let combined = cmd.parse(["-abc"]).unwrap();
        let separate = cmd.parse(["-a", "-b", "-c"]).unwrap();
        assert_eq!(combined, separate);
        let inv = combined.last().unwrap();
        assert!(inv.options.is_set("a"));
        assert!(inv.options.is_set("b"));
        assert!(inv.options.is_set("c"));
    }

    #[test]
    fn test_attached_value_equals_separate_value() {
        let cmd = Command::new("t").flag(Flag::scalar("name", &["--name"]));

        let attached = cmd.parse(["--name=x"]).unwrap();
        let separate = cmd.parse(["--name", "x"]).unwrap();
        assert_eq!(attached, separate);
        assert_eq!(
            attached.last().unwrap().options.value("name"),
            Some(&Value::Str("x".into()))
        );
    }

    #[test]
    fn test_value_binds_before_cluster_rest() {
        // -ov out: -o consumes "out" first, then -v resolves from the
        // re-queued cluster rest
        let cmd = Command::new("t")
            .flag(Flag::scalar("out", &["-o"]))
            .flag(Flag::switch("v", &["-v"]));

        let outcome = cmd.parse(["-ov", "out"]).unwrap();
        let inv = outcome.last().unwrap();
        assert_eq!(inv.options.value("out"), Some(&Value::Str("out".into())));
        assert!(inv.options.is_set("v"));
    }

    #[test]
    fn test_unknown_option_fails_fast() {
        let cmd = Command::new("t").flag(Flag::switch("a", &["-a"]));
        assert_eq!(
            cmd.parse(["-x"]).unwrap_err(),
            ParseError::UnknownOption { flag: "-x".into() }
        );
        // first character of a cluster resolves first
        assert_eq!(
            cmd.parse(["-xa"]).unwrap_err(),
            ParseError::UnknownOption { flag: "-x".into() }
        );
    }

    #[test]
    fn test_missing_value_at_end_of_stream() {
        let cmd = Command::new("t").flag(Flag::scalar("out", &["-o"]));
        assert_eq!(
            cmd.parse(["-o"]).unwrap_err(),
            ParseError::MissingValue { flag: "-o".into() }
        );
    }

    #[test]
    fn test_literal_mode_stops_option_matching() {
        let cmd = Command::new("t")
            .flag(Flag::switch("a", &["-a"]))
            .operand(Operand::new("args", Arity::ZeroOrMore));

        let outcome = cmd.parse(["-a", "--", "-a", "--weird"]).unwrap();
        let inv = outcome.last().unwrap();
        assert_eq!(inv.options.occurrences("a"), 1);
        assert_eq!(inv.operands.values("args").unwrap(), ["-a", "--weird"]);
    }

    #[test]
    fn test_required_option_enforced_per_level() {
        let cmd = Command::new("t").flag(
            Flag::scalar("out", &["-o", "--output"]).required(),
        );
        assert_eq!(
            cmd.parse(Vec::<String>::new()).unwrap_err(),
            ParseError::MissingRequiredOption {
                flags: "-o | --output".into()
            }
        );
    }

    #[test]
    fn test_residual_token_at_root_is_an_error() {
        let cmd = Command::new("t");
        assert_eq!(
            cmd.parse(["stray"]).unwrap_err(),
            ParseError::TooManyArguments {
                token: "stray".into()
            }
        );
    }

    #[test]
    fn test_repeated_parses_are_isolated() {
        let cmd = Command::new("t").flag(Flag::counter("v", &["-v"]));
        let first = cmd.parse(["-vv"]).unwrap();
        let second = cmd.parse(["-vv"]).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.last().unwrap().options.value("v"),
            Some(&Value::Int(2))
        );
    }

    #[test]
    fn test_unset_options_report_defaults() {
        let cmd = Command::new("t")
            .flag(Flag::switch("a", &["-a"]))
            .flag(Flag::scalar("o", &["-o"]))
            .flag(Flag::list("i", &["-i"]));

        let inv_all = cmd.parse(Vec::<String>::new()).unwrap();
        let inv = inv_all.last().unwrap();
        assert_eq!(inv.options.value("a"), Some(&Value::Bool(false)));
        assert_eq!(inv.options.value("o"), Some(&Value::Null));
        assert_eq!(inv.options.value("i"), Some(&Value::List(Vec::new())));
        assert!(!inv.options.is_set("a"));
    }
}
