//! Integration tests driving the argtree binary end to end.

use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_argtree"))
        .args(args)
        .output()
        .expect("failed to run argtree binary")
}

#[test]
fn version_flag_prints_banner_and_exits_zero() {
    let out = run(&["--version"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.trim().starts_with("argtree "));
}

#[test]
fn help_flag_prints_usage_and_sections() {
    let out = run(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Usage: argtree"));
    assert!(stdout.contains("Options:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("copy"));
    assert!(stdout.contains("list"));
}

#[test]
fn copy_parses_files_and_dest_with_reservation() {
    let out = run(&["-v", "copy", "-f", "a.txt", "b.txt", "backup/"]);
    assert!(out.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    let invocations = json["invocations"].as_array().unwrap();
    assert_eq!(invocations.len(), 2);

    let root = &invocations[0];
    assert_eq!(root["path"], serde_json::json!(["argtree"]));
    assert_eq!(root["options"]["verbose"]["value"], 1);

    let copy = &invocations[1];
    assert_eq!(copy["path"], serde_json::json!(["argtree", "copy"]));
    assert_eq!(copy["options"]["force"]["value"], true);
    assert_eq!(copy["operands"]["files"], serde_json::json!(["a.txt", "b.txt"]));
    assert_eq!(copy["operands"]["dest"], serde_json::json!(["backup/"]));
}

#[test]
fn kv_define_builds_a_map() {
    let out = run(&["copy", "-D", "owner=ops", "-D", "tier=2", "x", "y/"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let copy = &json["invocations"][1];
    assert_eq!(copy["options"]["define"]["value"]["owner"], "ops");
    assert_eq!(copy["options"]["define"]["value"]["tier"], "2");
}

#[test]
fn list_pattern_defaults_when_omitted() {
    let out = run(&["list"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let list = &json["invocations"][1];
    assert_eq!(list["operands"]["pattern"], serde_json::json!(["*"]));
}

#[test]
fn unknown_option_exits_one_with_message() {
    let out = run(&["--frobnicate"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unknown option: --frobnicate"));
}

#[test]
fn invalid_format_reports_choices() {
    let out = run(&["list", "--format", "xml"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid value for option --format"));
    assert!(stderr.contains("'xml' is not one of: json, text"));
}

#[test]
fn missing_copy_operands_is_an_arity_violation() {
    let out = run(&["copy"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("too few operands"));
}

#[test]
fn stray_trailing_token_is_rejected() {
    let out = run(&["list", "pattern", "stray"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unrecognized trailing argument: stray"));
}
