//! Chained subcommand dispatch.
//!
//! Demonstrates how one token stream can invoke several sibling
//! subcommands in order, each with its own options.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argtree-demos --example chained
//! ```

use argtree_core::{Command, Flag};

fn main() {
    let root = Command::new("pipeline")
        .action(|_, _| println!("pipeline starting"))
        .subcommand(
            Command::new("build")
                .flag(Flag::switch("release", &["--release"]))
                .action(|options, _| {
                    println!(
                        "build: release={}",
                        options.value("release").and_then(|v| v.as_bool()).unwrap_or(false)
                    );
                }),
        )
        .subcommand(
            Command::new("test")
                .flag(Flag::counter("verbose", &["-v"]))
                .action(|options, _| {
                    println!("test: verbosity={}", options.occurrences("verbose"));
                }),
        );

    // one stream, two subcommand invocations
    let outcome = root
        .parse(["build", "--release", "test", "-vv"])
        .expect("parse succeeds");

    println!();
    println!("dispatched {} levels:", outcome.invocations.len());
    for invocation in &outcome.invocations {
        println!("  {}", invocation.path.join(" > "));
    }
}
