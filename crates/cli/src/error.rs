//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ConfigError` variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-7 are reserved for specific error categories.
//! - `exec` passes the child's own status through unchanged.

use envload_config::ConfigError;
use thiserror::Error;

/// Structured exit codes for envload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// The requested format identifier is not recognized.
    UnknownFormat = 2,

    /// The environment file is missing and `--strict-file` was given.
    FileNotFound = 3,

    /// The environment file could not be read or decoded.
    ReadError = 4,

    /// The format's decoder is not compiled into this build.
    DependencyMissing = 5,

    /// A `--require` key is absent after loading.
    MissingRequiredKey = 6,

    /// `get --strict` found no value for the key.
    KeyNotFound = 7,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::UnknownFormat(_) => ExitCode::UnknownFormat,
            ConfigError::FileNotFound { .. } => ExitCode::FileNotFound,
            ConfigError::Io { .. } | ConfigError::Parse { .. } => ExitCode::ReadError,
            ConfigError::DependencyMissing { .. } => ExitCode::DependencyMissing,
            ConfigError::MissingRequiredKey(_) => ExitCode::MissingRequiredKey,
        }
    }
}

/// Failures raised by the CLI itself rather than the loader.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Key '{0}' not found")]
    KeyNotFound(String),
}

impl From<&CliError> for ExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::KeyNotFound(_) => ExitCode::KeyNotFound,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns `ExitCode::GeneralError` if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
            if let Some(cli_err) = cause.downcast_ref::<CliError>() {
                return ExitCode::from(cli_err);
            }
        }
        ExitCode::GeneralError
    }
}
