//! Operand arity resolution.
//!
//! The resolver assigns positional tokens greedily but reserves enough
//! trailing tokens for every later mandatory slot, so an open-ended
//! `files...` slot can be followed by a single `dest` slot.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argtree-demos --example arity
//! ```

use argtree_core::{Arity, Command, Operand};

fn main() {
    let cp = Command::new("cp")
        .operand(Operand::new("files", Arity::ZeroOrMore).with_metavar("file"))
        .operand(Operand::new("dest", Arity::Exactly(1)));

    let outcome = cp.parse(["a.txt", "b.txt", "c.txt", "backup/"]).expect("parse succeeds");
    let operands = &outcome.last().expect("one level").operands;
    println!("files = {:?}", operands.values("files").unwrap_or(&[]));
    println!("dest  = {:?}", operands.first("dest"));

    // too few tokens for the combined minimums fails upfront
    let short = Command::new("pair")
        .operand(Operand::new("a", Arity::AtMostOne))
        .operand(Operand::new("b", Arity::OneOrMore));
    match short.parse(["only"]) {
        Ok(_) => unreachable!("b's minimum cannot be satisfied"),
        Err(err) => println!("expected failure: {err}"),
    }
}
