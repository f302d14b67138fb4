//! JSON reader backed by `serde_json`.

use std::path::Path;

use super::{Format, FormatReader, into_document_root};
use crate::error::ConfigError;
use crate::value::ConfigValue;

/// Reads `.json` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader;

impl FormatReader for JsonReader {
    fn format(&self) -> Format {
        Format::Json
    }

    fn parse(&self, bytes: &[u8], path: &Path) -> Result<ConfigValue, ConfigError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| ConfigError::parse(path, Format::Json, e.to_string()))?;
        into_document_root(ConfigValue::from(value), path, Format::Json)
    }
}
