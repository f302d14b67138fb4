//! Integration tests for structured exit codes.
//!
//! These tests verify that envload returns the documented exit code for
//! each failure category, so shell scripts can branch on it.

mod common;

use common::{envload_cmd, write_fixture};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_success_returns_exit_code_0() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "app.json", r#"{"A":"1"}"#);

    envload_cmd()
        .args(["--name", "app", "check"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .code(0);
}

#[test]
fn test_unknown_format_returns_exit_code_2() {
    let dir = TempDir::new().unwrap();

    envload_cmd()
        .args(["--name", "app", "--format", "unsupported", "check"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported"));
}

#[test]
fn test_strict_missing_file_returns_exit_code_3() {
    let dir = TempDir::new().unwrap();

    envload_cmd()
        .args(["--name", "absent", "--strict-file", "check"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn test_malformed_file_returns_exit_code_4() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "app.json", "{ not json");

    envload_cmd()
        .args(["--name", "app", "dump"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Failed to parse json file"));
}

#[test]
fn test_missing_required_key_returns_exit_code_6() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "app.json", r#"{"A":"1"}"#);

    envload_cmd()
        .args(["--name", "app", "-r", "A", "-r", "ENVLOAD_TEST_ZZZ", "check"])
        .arg("--dir")
        .arg(dir.path())
        .env_remove("ENVLOAD_TEST_ZZZ")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("ENVLOAD_TEST_ZZZ"));
}

#[test]
fn test_strict_get_of_absent_key_returns_exit_code_7() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "app.json", r#"{"A":{"B":"1"}}"#);

    envload_cmd()
        .args(["--name", "app", "get", "A.C", "--strict"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .code(7)
        .stderr(predicate::str::contains("A.C"));
}

#[test]
fn test_usage_error_is_reported_by_clap() {
    envload_cmd().arg("no-such-command").assert().failure().code(2);
}
