//! Tests for the environment loader facade.
//!
//! Responsibilities:
//! - Test end-to-end loads: path resolution, merge precedence, publication.
//! - Test the missing-file policy and unknown formats.
//! - Test required-key validation.
//! - Test that every format loads with native type fidelity.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Every key a fixture publishes is listed in `temp_env` so it is restored.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Write `contents` to `<dir>/<file_name>` and return the path.
pub fn write_fixture(dir: &Path, file_name: &str, contents: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, contents).unwrap();
    path
}
