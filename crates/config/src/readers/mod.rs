//! Format readers and the registry that selects them.
//!
//! Responsibilities:
//! - Define the `FormatReader` capability shared by every on-disk format.
//! - Map format identifiers to the closed set of supported readers.
//!
//! Does NOT handle:
//! - Path construction or missing-file policy (see `loader`).
//! - Merging with the process environment (see `store.rs`).
//!
//! Invariants:
//! - Format identifiers are matched after trimming and lower-casing.
//! - `resolve` performs no I/O, so unknown formats fail before the file is touched.

mod dotenv;
mod ini;
mod json;
mod php_array;
mod serialized;
mod xml;
mod yaml;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::value::{ConfigMap, ConfigValue};

pub use dotenv::DotenvReader;
pub use ini::IniReader;
pub use json::JsonReader;
pub use php_array::PhpArrayReader;
pub use serialized::SerializedReader;
pub use xml::XmlReader;
pub use yaml::YamlReader;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    PhpArray,
    Ini,
    Xml,
    Yaml,
    Serialized,
    Dotenv,
}

impl Format {
    /// Every supported format, in registry order.
    pub const ALL: [Format; 7] = [
        Format::Json,
        Format::PhpArray,
        Format::Ini,
        Format::Xml,
        Format::Yaml,
        Format::Serialized,
        Format::Dotenv,
    ];

    /// Canonical identifier, also used as the default file extension.
    pub fn id(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::PhpArray => "php",
            Format::Ini => "ini",
            Format::Xml => "xml",
            Format::Yaml => "yml",
            Format::Serialized => "serialize",
            Format::Dotenv => "env",
        }
    }

    /// Every identifier accepted for this format.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yml", "yaml"],
            Format::Json => &["json"],
            Format::PhpArray => &["php"],
            Format::Ini => &["ini"],
            Format::Xml => &["xml"],
            Format::Serialized => &["serialize"],
            Format::Dotenv => &["env"],
        }
    }

    /// The reader implementing this format.
    pub fn reader(self) -> &'static dyn FormatReader {
        match self {
            Format::Json => &JsonReader,
            Format::PhpArray => &PhpArrayReader,
            Format::Ini => &IniReader,
            Format::Xml => &XmlReader,
            Format::Yaml => &YamlReader,
            Format::Serialized => &SerializedReader,
            Format::Dotenv => &DotenvReader,
        }
    }

    /// Whether the decoder for this format is compiled into this build.
    pub fn is_available(self) -> bool {
        match self {
            Format::Yaml => yaml::AVAILABLE,
            _ => true,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_format_id(s);
        Format::ALL
            .into_iter()
            .find(|format| format.aliases().contains(&normalized.as_str()))
            .ok_or_else(|| ConfigError::UnknownFormat(s.to_string()))
    }
}

/// Trim and lower-case a format identifier.
pub fn normalize_format_id(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

/// Resolve a format identifier to its reader.
///
/// # Errors
///
/// Returns `ConfigError::UnknownFormat` if the identifier is not recognized.
pub fn resolve(format_id: &str) -> Result<&'static dyn FormatReader, ConfigError> {
    format_id.parse::<Format>().map(Format::reader)
}

/// Decodes one on-disk format into a `ConfigValue` tree.
pub trait FormatReader: Send + Sync {
    /// The format this reader decodes.
    fn format(&self) -> Format;

    /// Decode file contents. `path` is only used for error context.
    fn parse(&self, bytes: &[u8], path: &Path) -> Result<ConfigValue, ConfigError>;

    /// Read and decode the file at `path`.
    fn run(&self, path: &Path) -> Result<ConfigValue, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            format = %self.format(),
            bytes = bytes.len(),
            "Decoding environment file"
        );
        self.parse(&bytes, path)
    }
}

/// Coerce a decoded document root into a map.
///
/// Null becomes an empty map and a list is keyed by index; any other scalar
/// is rejected.
pub(crate) fn into_document_root(
    value: ConfigValue,
    path: &Path,
    format: Format,
) -> Result<ConfigValue, ConfigError> {
    match value {
        ConfigValue::Map(_) => Ok(value),
        ConfigValue::Null => Ok(ConfigValue::empty_map()),
        ConfigValue::List(items) => Ok(ConfigValue::Map(
            items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| (idx.to_string(), item))
                .collect::<ConfigMap>(),
        )),
        _ => Err(ConfigError::parse(
            path,
            format,
            "document root must be a mapping",
        )),
    }
}

/// Decode bytes as UTF-8 for text-only formats.
pub(crate) fn utf8<'a>(bytes: &'a [u8], path: &Path, format: Format) -> Result<&'a str, ConfigError> {
    std::str::from_utf8(bytes)
        .map_err(|e| ConfigError::parse(path, format, format!("invalid UTF-8: {e}")))
}
