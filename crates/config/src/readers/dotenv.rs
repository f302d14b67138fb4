//! Dotenv (`KEY=value`) reader backed by `dotenvy`.

use std::io::Cursor;
use std::path::Path;

use super::{Format, FormatReader};
use crate::error::ConfigError;
use crate::value::{ConfigMap, ConfigValue};

/// Reads `.env` files. Every value is a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotenvReader;

impl FormatReader for DotenvReader {
    fn format(&self) -> Format {
        Format::Dotenv
    }

    fn parse(&self, bytes: &[u8], path: &Path) -> Result<ConfigValue, ConfigError> {
        let mut map = ConfigMap::new();
        for item in dotenvy::from_read_iter(Cursor::new(bytes)) {
            // Line contents are kept out of the error so secrets never leak into logs.
            let (key, value) = item.map_err(|e| match e {
                dotenvy::Error::LineParse(_, idx) => ConfigError::parse(
                    path,
                    Format::Dotenv,
                    format!("invalid syntax at position {idx}"),
                ),
                other => ConfigError::parse(path, Format::Dotenv, other.to_string()),
            })?;
            map.insert(key, ConfigValue::String(value));
        }
        Ok(ConfigValue::Map(map))
    }
}
