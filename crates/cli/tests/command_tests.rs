//! Integration tests for envload subcommands.

mod common;

use common::{envload_cmd, write_fixture};
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_fixture(
        dir.path(),
        "production.json",
        r#"{"APP_NAME":"shop","DATABASE":{"host":"db.internal","port":5432},"DEBUG":false}"#,
    );
    write_fixture(
        dir.path(),
        "production.ini",
        "APP_NAME = shop-ini\n\n[DATABASE]\nhost = ini.internal\n",
    );
    dir
}

// ============================================================================
// get
// ============================================================================

#[test]
fn test_get_dotted_key() {
    let dir = fixture_dir();
    envload_cmd()
        .args(["--name", "production", "get", "DATABASE.host"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("db.internal\n");
}

#[test]
fn test_get_uses_app_env_and_format() {
    let dir = fixture_dir();
    envload_cmd()
        .env("APP_ENV", "production")
        .env("ENVLOAD_FORMAT", "ini")
        .env("ENVLOAD_DIR", dir.path())
        .args(["get", "DATABASE.host"])
        .assert()
        .success()
        .stdout("ini.internal\n");
}

#[test]
fn test_get_default_and_json_output() {
    let dir = fixture_dir();
    envload_cmd()
        .args(["--name", "production", "get", "DATABASE.user", "--default", "postgres"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("postgres\n");

    envload_cmd()
        .args(["--name", "production", "get", "DATABASE", "-o", "json"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"port\": 5432"));
}

// ============================================================================
// dump / check
// ============================================================================

#[test]
fn test_dump_file_values_override_environment() {
    let dir = fixture_dir();
    let output = envload_cmd()
        .env("APP_NAME", "from-host")
        .env("ENVLOAD_ONLY_IN_ENV", "kept")
        .args(["--name", "production", "dump"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let tree: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(tree["APP_NAME"], "shop");
    assert_eq!(tree["DATABASE"]["port"], 5432);
    assert_eq!(tree["DEBUG"], false);
    assert_eq!(tree["ENVLOAD_ONLY_IN_ENV"], "kept");
}

#[test]
fn test_dump_yaml() {
    let dir = fixture_dir();
    envload_cmd()
        .args(["--name", "production", "dump", "-o", "yaml"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DATABASE:\n  host: db.internal"));
}

#[test]
fn test_check_reports_missing_file_without_failing() {
    let dir = TempDir::new().unwrap();
    envload_cmd()
        .args(["--name", "nowhere", "check"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ok\n").and(predicate::str::contains("not found")));
}

// ============================================================================
// exec
// ============================================================================

#[cfg(unix)]
#[test]
fn test_exec_child_sees_published_values() {
    let dir = fixture_dir();
    envload_cmd()
        .arg("--dir")
        .arg(dir.path())
        .args(["--name", "production", "exec", "--", "sh", "-c", "printf '%s|%s' \"$APP_NAME\" \"$DEBUG\""])
        .assert()
        .success()
        .stdout("shop|false");
}

#[cfg(unix)]
#[test]
fn test_exec_passes_child_status_through() {
    let dir = fixture_dir();
    envload_cmd()
        .arg("--dir")
        .arg(dir.path())
        .args(["--name", "production", "exec", "--", "sh", "-c", "exit 42"])
        .assert()
        .code(42);
}

#[cfg(unix)]
#[test]
fn test_exec_no_publish_hides_file_values_from_child() {
    let dir = fixture_dir();
    envload_cmd()
        .env_remove("APP_NAME")
        .arg("--dir")
        .arg(dir.path())
        .args(["--name", "production", "--no-publish", "exec", "--", "sh", "-c", "printf '%s' \"${APP_NAME-unset}\""])
        .assert()
        .success()
        .stdout("unset");
}

#[test]
fn test_get_with_no_publish_still_reads_file() {
    let dir = fixture_dir();
    envload_cmd()
        .args(["get", "DATABASE.host", "--name", "production", "--no-publish", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout("db.internal\n");
}

// ============================================================================
// runtime / formats
// ============================================================================

#[test]
fn test_runtime_json() {
    let output = envload_cmd()
        .arg("runtime")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let facts: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(facts["pid"].as_u64().is_some());
    assert!(facts["os_name"].as_str().is_some_and(|s| !s.is_empty()));
    // Captured output is a pipe, so the process is not interactive.
    assert_eq!(facts["interface"], "service");
    assert!(facts["is_unix"].is_boolean());
}

#[test]
fn test_runtime_ignores_broken_format() {
    envload_cmd()
        .args(["--format", "unsupported", "runtime", "-o", "raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pid="));
}

#[test]
fn test_formats_lists_every_identifier() {
    let mut assert = envload_cmd().arg("formats").assert().success();
    for id in ["json", "php", "ini", "xml", "yml", "serialize", "env"] {
        assert = assert.stdout(predicate::str::contains(id));
    }
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let dir = fixture_dir();
    envload_cmd()
        .args(["--verbose", "--name", "production", "get", "APP_NAME"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("shop\n")
        .stderr(predicate::str::contains("Loaded environment"));
}
