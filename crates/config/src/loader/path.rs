//! Path helpers for environment file locations.
//!
//! Responsibilities:
//! - Resolve the logical file name (explicit argument or `APP_ENV`).
//! - Join directory, name and format extension into the file path.
//!
//! Does NOT handle:
//! - File I/O or existence checks (see builder.rs).

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crate::env::env_var_or_none;

/// Pick the logical file name: the explicit argument, else the value of
/// `name_var`, else the empty string.
pub(crate) fn resolve_name(explicit: Option<&str>, name_var: &str) -> String {
    match explicit {
        Some(name) => name.to_string(),
        None => env_var_or_none(name_var).unwrap_or_default(),
    }
}

/// Build `<directory>/<name>.<extension>`.
///
/// Trailing separators on `directory` are dropped first. An empty name is
/// kept as-is, producing a dot-file such as `dir/.json`.
pub(crate) fn env_file_path(directory: &Path, name: &str, extension: &str) -> PathBuf {
    let dir = directory.to_string_lossy();
    let trimmed = dir.trim_end_matches(['/', MAIN_SEPARATOR]);
    let base = if trimmed.is_empty() && dir.starts_with(['/', MAIN_SEPARATOR]) {
        // Stripping every separator from the filesystem root would turn it into
        // a relative path.
        &dir[..1]
    } else {
        trimmed
    };
    Path::new(base).join(format!("{name}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_env_file_path_strips_trailing_separators() {
        assert_eq!(
            env_file_path(Path::new("config/"), "production", "json"),
            PathBuf::from("config/production.json")
        );
        assert_eq!(
            env_file_path(Path::new("config///"), "local", "yml"),
            PathBuf::from("config/local.yml")
        );
        assert_eq!(
            env_file_path(Path::new("/"), "root", "ini"),
            PathBuf::from("/root.ini")
        );
    }

    #[test]
    fn test_env_file_path_with_empty_name() {
        assert_eq!(
            env_file_path(Path::new("config"), "", "json"),
            PathBuf::from("config/.json")
        );
    }

    #[test]
    #[serial]
    fn test_resolve_name_prefers_explicit_argument() {
        temp_env::with_var("_ENVLOAD_TEST_NAME", Some("staging"), || {
            assert_eq!(resolve_name(Some("local"), "_ENVLOAD_TEST_NAME"), "local");
            assert_eq!(resolve_name(None, "_ENVLOAD_TEST_NAME"), "staging");
        });
        temp_env::with_var_unset("_ENVLOAD_TEST_NAME", || {
            assert_eq!(resolve_name(None, "_ENVLOAD_TEST_NAME"), "");
        });
    }
}
