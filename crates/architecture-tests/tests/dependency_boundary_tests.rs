//! Purpose: Keep the crate dependency graph one-directional.
//!
//! Invariants:
//! - `envload-config` and `envload-runtime` are independent of each other.
//! - Library crates emit tracing events but never install a subscriber, and
//!   report typed errors instead of `anyhow`.
//! - Only the CLI crate depends on both libraries.

use architecture_tests::{rust_files, workspace_root};
use std::fs;

fn manifest(crate_dir: &str) -> String {
    let path = workspace_root().join("crates").join(crate_dir).join("Cargo.toml");
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

/// Source files of `crate_dir` that mention `needle`.
fn sources_mentioning(crate_dir: &str, needle: &str) -> Vec<String> {
    rust_files(&workspace_root().join("crates").join(crate_dir))
        .into_iter()
        .filter(|path| {
            fs::read_to_string(path)
                .map(|content| content.contains(needle))
                .unwrap_or(false)
        })
        .map(|path| path.display().to_string())
        .collect()
}

#[test]
fn test_config_does_not_depend_on_runtime() {
    assert!(
        !manifest("config").contains("envload-runtime"),
        "envload-config must not depend on envload-runtime"
    );
    let offenders = sources_mentioning("config", "envload_runtime");
    assert!(offenders.is_empty(), "envload-config references envload_runtime in:\n{}", offenders.join("\n"));
}

#[test]
fn test_runtime_does_not_depend_on_config() {
    assert!(
        !manifest("runtime").contains("envload-config"),
        "envload-runtime must not depend on envload-config"
    );
    let offenders = sources_mentioning("runtime", "envload_config");
    assert!(offenders.is_empty(), "envload-runtime references envload_config in:\n{}", offenders.join("\n"));
}

#[test]
fn test_libraries_do_not_configure_logging_or_use_anyhow() {
    for krate in ["config", "runtime"] {
        let manifest = manifest(krate);
        for forbidden in ["tracing-subscriber", "anyhow"] {
            assert!(
                !manifest.contains(forbidden),
                "crates/{krate} must not depend on {forbidden}"
            );
        }
    }
}

#[test]
fn test_cli_uses_both_libraries() {
    let manifest = manifest("cli");
    assert!(manifest.contains("envload-config"));
    assert!(manifest.contains("envload-runtime"));
}
