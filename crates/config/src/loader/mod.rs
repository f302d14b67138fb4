//! Environment file loader facade.
//!
//! Responsibilities:
//! - Resolve `<directory>/<name>.<format>` and pick the matching reader.
//! - Merge the decoded tree over the process environment and publish it.
//! - Enforce the missing-file policy and required keys.
//!
//! Does NOT handle:
//! - Decoding formats (see `readers`).
//! - Lookup caching (see `store.rs`).
//!
//! Invariants / Assumptions:
//! - File values take precedence over pre-existing environment variables.
//! - The logical name falls back to `APP_ENV` when not given.

mod builder;
mod path;
mod shared;

#[cfg(test)]
mod tests;

pub use builder::EnvLoader;
pub use shared::shared;
