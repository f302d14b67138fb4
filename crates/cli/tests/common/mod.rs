//! Shared test utilities for envload integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//! - Write fixture files into temporary directories.
//!
//! Invariants / Assumptions:
//! - Variables that change loader defaults are cleared from the child.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// Returns a hermetic `envload` command for integration testing.
///
/// `APP_ENV`, `ENVLOAD_DIR`, `ENVLOAD_FORMAT` and `RUST_LOG` are removed so
/// the host environment cannot change which file is loaded or what is logged.
pub fn envload_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envload");
    cmd.env_remove("APP_ENV")
        .env_remove("ENVLOAD_DIR")
        .env_remove("ENVLOAD_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

/// Write `contents` to `<dir>/<file>`.
pub fn write_fixture(dir: &Path, file: &str, contents: &str) {
    std::fs::write(dir.join(file), contents).expect("write fixture");
}
