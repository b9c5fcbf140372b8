//! Demo binary for the argtree parsing engine.
//!
//! Builds a small command tree, parses the process arguments against it and
//! prints every dispatched level's resolved options and operands as JSON.
//! This binary is also the termination/reporting sink: parse errors map to
//! a one-line stderr message and exit code 1, while the library itself
//! never prints or exits.

use argtree_core::{
    Arity, Command, Flag, Operand, coercion, help, validate_command, validators,
};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds the demo command tree.
///
/// `help_text` and `banner` are pre-rendered so the `--help` and
/// `--version` actions can print them without holding a reference into the
/// tree being parsed; passing `None` builds the same tree without the
/// early-exit actions (used for rendering itself).
fn build_app(help_text: Option<String>, banner: Option<String>) -> Command {
    let mut help_flag =
        Flag::switch("help", &["-h", "--help"]).with_description("Print this help and exit");
    if let Some(text) = help_text {
        help_flag = help_flag.on_match(move |_| {
            println!("{text}");
            std::process::exit(0);
        });
    }

    let mut version_flag =
        Flag::switch("version", &["--version"]).with_description("Print the version and exit");
    if let Some(text) = banner {
        version_flag = version_flag.on_match(move |_| {
            println!("{text}");
            std::process::exit(0);
        });
    }

    Command::new("argtree")
        .with_version(PACKAGE_VERSION)
        .with_description("Showcase for the argtree parsing engine")
        .flag(help_flag)
        .flag(version_flag)
        .flag(
            Flag::counter("verbose", &["-v", "--verbose"])
                .with_description("Increase verbosity; may be given several times"),
        )
        .flag(
            Flag::scalar("config", &["-c", "--config"])
                .with_metavar("FILE")
                .with_description("Path to a configuration file"),
        )
        .subcommand(copy_command())
        .subcommand(list_command())
}

fn copy_command() -> Command {
    Command::new("copy")
        .with_description("Copy files to a destination")
        .flag(Flag::switch("force", &["-f", "--force"]).with_description("Overwrite existing files"))
        .flag(
            Flag::list("define", &["-D", "--define"])
                .with_metavar("KEY=VALUE")
                .with_description("Set a named property; repeatable")
                .coerce(coercion::kv),
        )
        .operand(
            Operand::new("files", Arity::OneOrMore)
                .with_metavar("file")
                .with_description("Files to copy"),
        )
        .operand(
            Operand::new("dest", Arity::Exactly(1)).with_description("Destination directory"),
        )
}

fn list_command() -> Command {
    Command::new("list")
        .with_description("List tracked entries")
        .flag(
            Flag::scalar("format", &["--format"])
                .with_metavar("FORMAT")
                .with_description("Output format")
                .validator(validators::one_of(&["json", "text"])),
        )
        .operand(
            Operand::new("pattern", Arity::AtMostOne)
                .with_defaults(&["*"])
                .with_description("Glob-style filter"),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let preview = build_app(None, None);
    let issues = validate_command(&preview);
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("argtree: internal configuration error: {issue}");
        }
        std::process::exit(2);
    }

    let help_text = help::render(&preview, &[]);
    let banner = help::version_banner(&preview);
    let app = build_app(Some(help_text), Some(banner));

    match app.parse(args) {
        Ok(outcome) => {
            let json =
                serde_json::to_string_pretty(&outcome).expect("parse outcome serializes to JSON");
            println!("{json}");
        }
        Err(err) => {
            eprintln!("argtree: {err}");
            std::process::exit(1);
        }
    }
}
