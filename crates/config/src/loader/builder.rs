//! Environment loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `EnvLoader` holding the load policy
//!   (missing-file handling, required keys, name variable, publishing).
//! - Orchestrate a load: resolve path, pick reader, decode, merge, publish, validate.
//! - Own the `ConfigStore` produced by the last successful load.
//!
//! Does NOT handle:
//! - Decoding file formats (delegated to `readers`).
//! - Lookup semantics and caching (delegated to `store.rs`).
//!
//! Invariants / Assumptions:
//! - The previous store is dropped before a load starts; `load` is not incremental.
//! - Unknown formats fail before the filesystem is touched.
//! - A store is only retained when every step succeeded.
//! - Merged values are published to the environment before required keys are
//!   validated, so a failed validation still leaves the published variables set.
//! - With publishing disabled the process environment is only read, never written.
//! - Environment writes are process-global; callers serialize concurrent loads.

use indexmap::IndexSet;
use std::path::{Path, PathBuf};

use super::path::{env_file_path, resolve_name};
use crate::constants::{DEFAULT_MISSING_FILE_FATAL, DEFAULT_NAME_VAR, DEFAULT_PUBLISH};
use crate::env::EnvSnapshot;
use crate::error::ConfigError;
use crate::readers::{Format, FormatReader, normalize_format_id, resolve};
use crate::store::ConfigStore;
use crate::value::ConfigValue;

/// Loads one environment file into a `ConfigStore`.
#[derive(Debug)]
pub struct EnvLoader {
    missing_file_fatal: bool,
    publish: bool,
    required_keys: IndexSet<String>,
    name_var: String,
    env_file: Option<PathBuf>,
    store: Option<ConfigStore>,
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvLoader {
    /// Create a new loader.
    ///
    /// Missing files are tolerated by default, matching the behavior of
    /// earlier releases; opt in with `with_missing_file_fatal(true)`.
    pub fn new() -> Self {
        Self {
            missing_file_fatal: DEFAULT_MISSING_FILE_FATAL,
            publish: DEFAULT_PUBLISH,
            required_keys: IndexSet::new(),
            name_var: DEFAULT_NAME_VAR.to_string(),
            env_file: None,
            store: None,
        }
    }

    /// Treat a missing environment file as an error.
    pub fn with_missing_file_fatal(mut self, fatal: bool) -> Self {
        self.missing_file_fatal = fatal;
        self
    }

    /// Write loaded values into the process environment (default `true`).
    pub fn with_publish(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }

    /// Replace the set of keys that must be present after loading.
    pub fn with_required_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Add one required key. Duplicates are ignored.
    pub fn require(mut self, key: impl Into<String>) -> Self {
        self.required_keys.insert(key.into());
        self
    }

    /// Override the environment variable consulted for the logical file name.
    pub fn with_name_var(mut self, var: impl Into<String>) -> Self {
        self.name_var = var.into();
        self
    }

    pub fn set_missing_file_fatal(&mut self, fatal: bool) {
        self.missing_file_fatal = fatal;
    }

    pub fn set_publish(&mut self, publish: bool) {
        self.publish = publish;
    }

    pub fn set_required_keys<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_keys = keys.into_iter().map(Into::into).collect();
    }

    pub fn missing_file_fatal(&self) -> bool {
        self.missing_file_fatal
    }

    pub fn publishes(&self) -> bool {
        self.publish
    }

    /// Required keys, in the order they are validated.
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.required_keys.iter().map(String::as_str)
    }

    /// Load `<directory>/<name>.<format>`.
    ///
    /// When `name` is `None` the `APP_ENV` variable (or the configured name
    /// variable) supplies it; if that is unset too, the name is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `format` is not recognized (`ConfigError::UnknownFormat`)
    /// - the file is missing and missing files are fatal (`ConfigError::FileNotFound`)
    /// - the file cannot be read or decoded (`ConfigError::Io` / `ConfigError::Parse`)
    /// - the format's decoder is not compiled in (`ConfigError::DependencyMissing`)
    /// - a required key is absent after merging (`ConfigError::MissingRequiredKey`)
    ///
    /// On error nothing is retained: `store()` returns `None`.
    pub fn load(
        &mut self,
        directory: impl AsRef<Path>,
        name: Option<&str>,
        format: &str,
    ) -> Result<(), ConfigError> {
        self.store = None;
        let name = resolve_name(name, &self.name_var);
        let extension = normalize_format_id(format);
        let path = env_file_path(directory.as_ref(), &name, &extension);
        self.env_file = Some(path.clone());

        let reader = resolve(format)?;
        self.load_with(&path, reader)
    }

    /// Like `load`, with an already parsed format.
    ///
    /// The file extension is the format's canonical id (`yml` for YAML).
    pub fn load_format(
        &mut self,
        directory: impl AsRef<Path>,
        name: Option<&str>,
        format: Format,
    ) -> Result<(), ConfigError> {
        self.store = None;
        let name = resolve_name(name, &self.name_var);
        let path = env_file_path(directory.as_ref(), &name, format.id());
        self.env_file = Some(path.clone());
        self.load_with(&path, format.reader())
    }

    fn load_with(&mut self, path: &Path, reader: &dyn FormatReader) -> Result<(), ConfigError> {
        tracing::debug!(path = %path.display(), format = %reader.format(), "Resolved environment file");

        let tree = if path.is_file() {
            reader.run(path)?
        } else if self.missing_file_fatal {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        } else {
            tracing::debug!(path = %path.display(), "Environment file not found, continuing with process environment only");
            ConfigValue::empty_map()
        };

        let store = ConfigStore::from_merged(tree, &EnvSnapshot::capture());
        let published = if self.publish { store.publish() } else { 0 };
        store.validate_required(self.required_keys())?;

        tracing::info!(
            path = %path.display(),
            entries = store.len(),
            published,
            "Loaded environment"
        );
        self.store = Some(store);
        Ok(())
    }

    /// The store from the last successful load.
    pub fn store(&self) -> Option<&ConfigStore> {
        self.store.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_some()
    }

    /// Path resolved by the last `load` call, whether or not the file existed.
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Look up `key` in the loaded store, or return `default`.
    ///
    /// With no store loaded, `None` yields an empty map.
    pub fn get(&self, key: Option<&str>, default: ConfigValue) -> ConfigValue {
        match (&self.store, key) {
            (Some(store), _) => store.get(key, default),
            (None, None) => ConfigValue::empty_map(),
            (None, Some(_)) => default,
        }
    }
}
