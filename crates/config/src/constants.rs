//! Centralized constants for the envload workspace.
//!
//! This module contains default values shared by the loader and the CLI to
//! avoid duplicating magic strings.

// =============================================================================
// Loader Defaults
// =============================================================================

/// Environment variable consulted for the logical file name when none is given.
pub const DEFAULT_NAME_VAR: &str = "APP_ENV";

/// Format identifier used when the caller does not pick one.
pub const DEFAULT_FORMAT: &str = "json";

/// Missing environment files are tolerated unless a caller opts in.
pub const DEFAULT_MISSING_FILE_FATAL: bool = false;

/// Loaded values are written to the process environment unless disabled.
pub const DEFAULT_PUBLISH: bool = true;

// =============================================================================
// Reader Conventions
// =============================================================================

/// Key under which XML element attributes are stored.
pub const XML_ATTRIBUTES_KEY: &str = "@attributes";

/// Separator for nested lookups (`db.host`).
pub const PATH_SEPARATOR: char = '.';

/// Deepest array/object nesting the hand-written decoders accept.
/// Matches the recursion limit `serde_json` applies to JSON input.
pub const MAX_NESTING_DEPTH: usize = 128;
