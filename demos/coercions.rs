//! Built-in coercion functions on options.
//!
//! Shows the pluggable value-update contract: key/value maps, comma
//! listings and numeric ranges built from plain string tokens.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argtree-demos --example coercions
//! ```

use argtree_core::{Command, Flag, coercion};

fn main() {
    let cmd = Command::new("deploy")
        .flag(
            Flag::list("set", &["-s", "--set"])
                .with_metavar("KEY=VALUE")
                .coerce(coercion::kv),
        )
        .flag(
            Flag::scalar("regions", &["--regions"])
                .with_metavar("LIST")
                .coerce(coercion::listing),
        )
        .flag(
            Flag::scalar("ports", &["--ports"])
                .with_metavar("RANGE")
                .coerce(coercion::range),
        );

    let outcome = cmd
        .parse([
            "--set", "env=prod", "--set", "tier=web", "--regions", "eu-1, eu-2", "--ports",
            "8000..8010",
        ])
        .expect("parse succeeds");

    let options = &outcome.last().expect("one level").options;
    println!(
        "{}",
        serde_json::to_string_pretty(options).expect("options serialize")
    );
}
