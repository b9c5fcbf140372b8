//! Usage and help rendering.
//!
//! Renderers here read the command tree and never feed back into parse
//! state. Because a command does not hold a reference to its parent, every
//! function takes the `ancestors` path (the command names from the root
//! down to, but excluding, the command itself); pass `&[]` for the root.
//!
//! # Examples
//!
//! ```
//! use argtree_core::{help, Command, Flag};
//!
//! let app = Command::new("app")
//!     .with_version("1.2.0")
//!     .flag(Flag::switch("verbose", &["-v", "--verbose"]));
//!
//! assert!(help::usage(&app, &[]).starts_with("Usage: app"));
//! assert_eq!(help::version_banner(&app), "app 1.2.0");
//! ```

use crate::command::Command;
use crate::operand::Operand;
use crate::option::Flag;
use crate::wrap::wordwrap;

const WIDTH: usize = 78;
const DESCRIPTION_INDENT: usize = 10;

/// Usage fragment for one option: `[-v | --verbose]`, `(-o | --output) <FILE>`.
fn flag_usage(flag: &Flag) -> String {
    let mut usage = flag.flag_set();

    if let Some(metavar) = flag.metavar() {
        usage.push_str(&format!(" <{metavar}>"));
    }

    if flag.is_required() {
        if flag.flags().len() > 1 {
            format!("({usage})")
        } else {
            usage
        }
    } else {
        format!("[{usage}]")
    }
}

/// Usage fragment for one operand slot: `<dest>`, `[file ...]`, `<src> [src ...]`.
fn operand_usage(operand: &Operand) -> String {
    let (min, max) = operand.bounds();
    let metavar = operand.metavar();
    let mut parts: Vec<String> = Vec::new();

    if min > 0 {
        parts.push(
            std::iter::repeat_n(format!("<{metavar}>"), min)
                .collect::<Vec<_>>()
                .join(" "),
        );
    }

    if max.is_none() {
        parts.push(format!("[{metavar} ...]"));
    } else if min == 0 {
        parts.push(format!("[{metavar}]"));
    }

    parts.join(" ")
}

/// Renders the usage summary for a command.
///
/// `ancestors` is the chain of command names from the root down to, but
/// excluding, this command. Continuation lines align under the usage
/// column.
pub fn usage(command: &Command, ancestors: &[&str]) -> String {
    let mut tree: Vec<&str> = ancestors.to_vec();
    tree.push(command.name());

    let mut head = format!("Usage: {}", tree.join(" [ARGUMENTS] "));
    head.push(' ');
    let column = head.len();

    let mut fragments: Vec<String> = Vec::new();
    fragments.extend(command.options().iter().map(flag_usage));
    fragments.extend(command.operands().iter().map(operand_usage));
    if !command.children().is_empty() {
        fragments.push("<command> [ARGUMENTS]".to_string());
    }

    let mut lines: Vec<String> = Vec::new();
    let mut buffer = head;
    for fragment in fragments {
        if buffer.len() + fragment.len() <= WIDTH || buffer.len() == column {
            buffer.push_str(&fragment);
            buffer.push(' ');
        } else {
            lines.push(buffer.trim_end().to_string());
            buffer = format!("{}{fragment} ", " ".repeat(column));
        }
    }
    lines.push(buffer.trim_end().to_string());

    lines.join("\n")
}

/// Renders the full help text for a command: usage summary followed by
/// option, operand and subcommand sections.
pub fn render(command: &Command, ancestors: &[&str]) -> String {
    let mut out = usage(command, ancestors);

    if !command.options().is_empty() {
        out.push_str("\n\nOptions:\n");
        for flag in command.options() {
            out.push_str(&format!("    {}", flag.flag_set()));
            if let Some(metavar) = flag.metavar() {
                out.push_str(&format!(" <{metavar}>"));
            }
            out.push('\n');
            if !flag.description().is_empty() {
                out.push_str(&wordwrap(flag.description(), DESCRIPTION_INDENT, WIDTH));
                out.push('\n');
            }
        }
    }

    if !command.operands().is_empty() {
        out.push_str("\nOperands:\n");
        for operand in command.operands() {
            out.push_str(&format!("    {}\n", operand.metavar()));
            if !operand.description().is_empty() {
                out.push_str(&wordwrap(
                    operand.description(),
                    DESCRIPTION_INDENT,
                    WIDTH,
                ));
                out.push('\n');
            }
        }
    }

    if !command.children().is_empty() {
        out.push_str("\nCommands:\n");
        let mut children: Vec<&Command> = command.children().iter().collect();
        children.sort_by_key(|child| child.name());
        let column = children
            .iter()
            .map(|child| child.name().len())
            .max()
            .unwrap_or(0);
        for child in children {
            out.push_str(&format!(
                "    {:column$}    {}\n",
                child.name(),
                child.description()
            ));
        }
    }

    out
}

/// Renders the version banner: `<name> <version>`, or the bare name when no
/// version is set.
pub fn version_banner(command: &Command) -> String {
    match command.version() {
        Some(version) => format!("{} {version}", command.name()),
        None => command.name().to_string(),
    }
}
