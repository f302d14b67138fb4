//! Purpose: Enforce deterministic temp file cleanup patterns in tests.
//!
//! Fixture files must live in `tempfile` RAII directories rather than
//! `std::env::temp_dir()` with manual cleanup.
//!
//! Non-scope: This test does not verify runtime behavior; it only checks
//! source code patterns. Files are analyzed statically.
//!
//! Invariants:
//! - No hardcoded /tmp paths in tests
//! - Temp directories are bound to a named variable for their whole test

use architecture_tests::{rust_files, workspace_root};
use std::fs;

/// Test sources under `crates/` (files containing `#[test]`).
fn test_sources() -> Vec<(String, String)> {
    rust_files(&workspace_root().join("crates"))
        .into_iter()
        .filter_map(|path| {
            let content = fs::read_to_string(&path).ok()?;
            content
                .contains("#[test]")
                .then(|| (path.display().to_string(), content))
        })
        .collect()
}

#[test]
fn test_no_manual_temp_dir_usage() {
    let mut violations: Vec<String> = Vec::new();

    for (path, content) in test_sources() {
        if content.contains("std::env::temp_dir()") {
            violations.push(format!(
                "{path}: uses std::env::temp_dir() - prefer tempfile::tempdir() for RAII cleanup"
            ));
        }
        if content.contains("\"/tmp") || content.contains("'/tmp") {
            violations.push(format!("{path}: contains hardcoded /tmp path - prefer tempfile crate"));
        }
    }

    assert!(
        violations.is_empty(),
        "Found manual temp file patterns (not panic-safe):\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_tempfile_bindings_retained() {
    let mut violations: Vec<String> = Vec::new();

    for (path, content) in test_sources() {
        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("let _ = tempfile::")
                || trimmed.starts_with("let _ = TempDir::new()")
                || trimmed.starts_with("let _ = NamedTempFile")
            {
                violations.push(format!(
                    "{path}:{}: tempfile instance bound to `_` - use a named variable for RAII cleanup",
                    i + 1
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Found tempfile instances not properly retained:\n{}",
        violations.join("\n")
    );
}
