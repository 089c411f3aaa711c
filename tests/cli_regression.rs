// Regression tests for the rbcst binary: tree output, dump comparison and
// miette rendering of fatal errors.

mod common;

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::tempdir;

use common::assignment_log;

const ASSIGNMENT_DUMP: &str = "(program\n  (assignment\n    left: (identifier)\n    right: (integer)))\n";

fn rbcst() -> Command {
    let mut cmd = Command::cargo_bin("rbcst").unwrap();
    cmd.arg("--no-color");
    cmd
}

#[test]
fn cli_prints_normalized_tree() {
    let dir = tempdir().unwrap();
    let events = dir.path().join("assign.jsonl");
    fs::write(&events, assignment_log().to_json_lines()).unwrap();

    rbcst()
        .arg("print")
        .arg(&events)
        .assert()
        .success()
        .stdout(ASSIGNMENT_DUMP);
}

#[test]
fn cli_check_accepts_matching_dump() {
    let dir = tempdir().unwrap();
    let events = dir.path().join("assign.jsonl");
    let expected = dir.path().join("assign.txt");
    fs::write(&events, assignment_log().to_json_lines()).unwrap();
    fs::write(&expected, ASSIGNMENT_DUMP).unwrap();

    rbcst()
        .arg("check")
        .arg(&events)
        .arg(&expected)
        .assert()
        .success()
        .stdout(contains("ok"));
}

#[test]
fn cli_check_fails_on_mismatch() {
    let dir = tempdir().unwrap();
    let events = dir.path().join("assign.jsonl");
    let expected = dir.path().join("assign.txt");
    fs::write(&events, assignment_log().to_json_lines()).unwrap();
    fs::write(&expected, "(program\n  (integer))\n").unwrap();

    rbcst()
        .arg("check")
        .arg(&events)
        .arg(&expected)
        .assert()
        .failure()
        .stdout(contains("-  (integer))").and(contains("+  (assignment")));
}

#[test]
fn cli_reports_miette_diagnostics_on_bad_stream() {
    let dir = tempdir().unwrap();
    let events = dir.path().join("broken.jsonl");
    fs::write(&events, "{\"event\": \"stmts_new\"}\n{\"event\": \n").unwrap();

    rbcst()
        .arg("print")
        .arg(&events)
        .assert()
        .failure()
        .stderr(contains("rbcst::stream").or(contains("malformed event stream")));
}

#[test]
fn cli_reports_missing_file() {
    rbcst()
        .arg("print")
        .arg("does/not/exist.jsonl")
        .assert()
        .failure()
        .stderr(contains("rbcst::io").or(contains("failed to read")));
}
