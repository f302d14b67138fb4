//! Process environment access.
//!
//! Responsibilities:
//! - Capture the process environment as a deterministic snapshot.
//! - Write merged values back into the process environment.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Deciding precedence between file and environment values (see `store.rs`).
//!
//! Invariants:
//! - Snapshot iteration is sorted by variable name.
//! - Variables whose name or value is not valid Unicode are skipped.
//! - Empty or whitespace-only environment variables are treated as unset by `env_var_or_none`.

use std::collections::BTreeMap;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Point-in-time copy of the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Why an entry could not be written to the process environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unexportable {
    EmptyKey,
    InvalidKey,
    InvalidValue,
}

impl Unexportable {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Unexportable::EmptyKey => "empty variable name",
            Unexportable::InvalidKey => "variable name contains '=' or NUL",
            Unexportable::InvalidValue => "value contains NUL",
        }
    }
}

/// Set one process environment variable.
///
/// Rejects what the platform cannot represent instead of panicking inside
/// `std::env::set_var`.
pub(crate) fn export_var(key: &str, value: &str) -> Result<(), Unexportable> {
    if key.is_empty() {
        return Err(Unexportable::EmptyKey);
    }
    if key.contains(['=', '\0']) {
        return Err(Unexportable::InvalidKey);
    }
    if value.contains('\0') {
        return Err(Unexportable::InvalidValue);
    }
    // SAFETY: environment mutation is process-global. Loading happens during
    // start-up and callers serialize concurrent loads (see `EnvLoader` docs).
    unsafe {
        std::env::set_var(key, value);
    }
    Ok(())
}
