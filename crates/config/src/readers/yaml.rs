//! YAML reader backed by `serde_yaml`.
//!
//! The decoder is an optional dependency behind the `yaml` cargo feature.
//! Builds without it still recognize the format and fail with
//! `ConfigError::DependencyMissing` instead of `UnknownFormat`.

use std::path::Path;

use super::{Format, FormatReader};
use crate::error::ConfigError;
use crate::value::ConfigValue;

pub(super) const AVAILABLE: bool = cfg!(feature = "yaml");

/// Reads `.yml` / `.yaml` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlReader;

impl FormatReader for YamlReader {
    fn format(&self) -> Format {
        Format::Yaml
    }

    #[cfg(feature = "yaml")]
    fn parse(&self, bytes: &[u8], path: &Path) -> Result<ConfigValue, ConfigError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ConfigValue::empty_map());
        }
        let value: serde_yaml::Value = serde_yaml::from_slice(bytes)
            .map_err(|e| ConfigError::parse(path, Format::Yaml, e.to_string()))?;
        super::into_document_root(ConfigValue::from(value), path, Format::Yaml)
    }

    #[cfg(not(feature = "yaml"))]
    fn parse(&self, _bytes: &[u8], _path: &Path) -> Result<ConfigValue, ConfigError> {
        Err(missing_dependency())
    }

    #[cfg(not(feature = "yaml"))]
    fn run(&self, _path: &Path) -> Result<ConfigValue, ConfigError> {
        Err(missing_dependency())
    }
}

/// Error returned by builds compiled without the `yaml` feature.
#[cfg_attr(feature = "yaml", allow(dead_code))]
pub(super) fn missing_dependency() -> ConfigError {
    ConfigError::DependencyMissing {
        format: Format::Yaml,
        dependency: "serde_yaml",
        hint: "Rebuild envload-config with `--features yaml` to enable it.",
    }
}
