//! Integration tests for the `jsonish` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the fmt, check,
//! and multi subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, error reporting, and exit codes.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.json fixture (strict JSON).
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

/// Helper: path to the config.jsonc fixture (comments, barewords, trailing commas).
fn config_jsonc_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/config.jsonc")
}

/// Helper: path to the stream.txt fixture (several documents in one file).
fn stream_txt_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/stream.txt")
}

const CONFIG_CANONICAL: &str =
    r#"{"debug":false,"hosts":["a.example.com","b.example.com"],"replicas":4,"service":"ingest"}"#;

// ─────────────────────────────────────────────────────────────────────────────
// Fmt subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fmt_stdin_to_stdout() {
    // Lax input on stdin comes back as sorted compact JSON on stdout
    Command::cargo_bin("jsonish")
        .unwrap()
        .arg("fmt")
        .write_stdin(r#"{ name: "Ada", scores: [95, 87,], }"#)
        .assert()
        .success()
        .stdout(r#"{"name":"Ada","scores":[95,87]}"#);
}

#[test]
fn fmt_file_to_stdout() {
    Command::cargo_bin("jsonish")
        .unwrap()
        .args(["fmt", "-i", config_jsonc_path()])
        .assert()
        .success()
        .stdout(CONFIG_CANONICAL);
}

#[test]
fn fmt_file_to_file() {
    let output_path = "/tmp/jsonish-test-fmt-output.json";

    // Clean up from any prior run
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("jsonish")
        .unwrap()
        .args(["fmt", "-i", config_jsonc_path(), "-o", output_path])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert_eq!(content, CONFIG_CANONICAL);

    // Clean up
    let _ = std::fs::remove_file(output_path);
}

#[test]
fn fmt_is_idempotent_through_the_binary() {
    let first = Command::cargo_bin("jsonish")
        .unwrap()
        .arg("fmt")
        .args(["-i", sample_json_path()])
        .output()
        .expect("fmt should succeed");
    assert!(first.status.success());
    let canonical = String::from_utf8(first.stdout).expect("output should be UTF-8");

    Command::cargo_bin("jsonish")
        .unwrap()
        .arg("fmt")
        .write_stdin(canonical.clone())
        .assert()
        .success()
        .stdout(canonical);
}

#[test]
fn fmt_invalid_input_fails() {
    Command::cargo_bin("jsonish")
        .unwrap()
        .arg("fmt")
        .write_stdin(r#"{ "a": 01 }"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("leading zeros"))
        .stderr(predicate::str::contains("offset"));
}

#[test]
fn fmt_trailing_garbage_fails() {
    Command::cargo_bin("jsonish")
        .unwrap()
        .arg("fmt")
        .write_stdin("[1, 2] [3]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("trailing"));
}

#[test]
fn fmt_bracket_bomb_fails_cleanly() {
    // Ten thousand unmatched brackets hit the depth limit instead of the stack
    Command::cargo_bin("jsonish")
        .unwrap()
        .arg("fmt")
        .write_stdin("[".repeat(10_000))
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeded maximum nesting depth"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_valid_file_is_silent() {
    Command::cargo_bin("jsonish")
        .unwrap()
        .args(["check", "-i", config_jsonc_path()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn check_reports_byte_offset() {
    Command::cargo_bin("jsonish")
        .unwrap()
        .arg("check")
        .write_stdin("[1, 2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("offset"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Multi subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn multi_stdin_stream() {
    Command::cargo_bin("jsonish")
        .unwrap()
        .arg("multi")
        .write_stdin("1 2 3")
        .assert()
        .success()
        .stdout("1\n2\n3\n");
}

#[test]
fn multi_file_stream() {
    Command::cargo_bin("jsonish")
        .unwrap()
        .args(["multi", "-i", stream_txt_path()])
        .assert()
        .success()
        .stdout("{\"id\":1,\"op\":\"put\"}\n{\"id\":2,\"op\":\"del\"}\n[3,4]\n\"tail\"\n");
}

#[test]
fn multi_emits_parsed_prefix_then_fails() {
    // Values before the malformed document still reach stdout
    Command::cargo_bin("jsonish")
        .unwrap()
        .arg("multi")
        .write_stdin(r#"{"a": 1} ?"#)
        .assert()
        .failure()
        .stdout("{\"a\":1}\n")
        .stderr(predicate::str::contains("malformed document"));
}

#[test]
fn multi_file_to_file() {
    let output_path = "/tmp/jsonish-test-multi-output.txt";

    // Clean up from any prior run
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("jsonish")
        .unwrap()
        .args(["multi", "-i", stream_txt_path(), "-o", output_path])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert_eq!(content.lines().count(), 4);
    assert!(content.ends_with('\n'), "each document ends its own line");

    // Clean up
    let _ = std::fs::remove_file(output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Edge cases
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("jsonish")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fmt"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("multi"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("jsonish")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("jsonish")
        .unwrap()
        .args(["fmt", "-i", "/no/such/file.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
