//! Error types for environment file loading.
//!
//! Responsibilities:
//! - Define error variants for every failure `EnvLoader::load` can surface.
//! - Carry enough context (paths, format ids, key names) to act on the error.
//!
//! Does NOT handle:
//! - Missing keys during lookups (`ConfigStore::get` falls back to a default).
//!
//! Invariants:
//! - `UnknownFormat` is raised before any filesystem access.
//! - Parse errors never include raw file contents, only the decoder's message.

use std::path::PathBuf;
use thiserror::Error;

use crate::readers::Format;

/// Errors that can occur while loading an environment file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown reader format '{0}'. Supported formats: json, php, ini, xml, yml, yaml, serialize, env")]
    UnknownFormat(String),

    #[error("Environment file not found at {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read environment file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} file at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: Format,
        message: String,
    },

    /// The reader for `format` was compiled out of this build.
    #[error("{format} reader not available: {dependency} is required for it. {hint}")]
    DependencyMissing {
        format: Format,
        dependency: &'static str,
        hint: &'static str,
    },

    #[error("Required key '{0}' is missing from the loaded environment")]
    MissingRequiredKey(String),
}

impl ConfigError {
    pub(crate) fn parse(path: &std::path::Path, format: Format, message: impl Into<String>) -> Self {
        ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message: message.into(),
        }
    }
}
