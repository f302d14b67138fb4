//! Generic configuration tree produced by every format reader.
//!
//! Responsibilities:
//! - Represent decoded configuration as a tagged value (scalar, list, or map).
//! - Provide the conversions used by readers built on serde data models.
//! - Render values as environment-variable text.
//!
//! Does NOT handle:
//! - Decoding any on-disk format (see `readers`).
//! - Dotted-path resolution or caching (see `store.rs`).
//!
//! Invariants:
//! - Map iteration order is the insertion order chosen by the reader.
//! - Numbers keep their native type; they are only stringified by `to_env_string`.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Ordered mapping used for every `ConfigValue::Map`.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A decoded configuration value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Map(ConfigMap),
}

impl ConfigValue {
    /// Create an empty map value.
    pub fn empty_map() -> Self {
        ConfigValue::Map(ConfigMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns true for every variant except `List` and `Map`.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ConfigValue::List(_) | ConfigValue::Map(_))
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(n) => Some(*n),
            ConfigValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Direct member access on a map; `None` for every other variant.
    pub fn member(&self, key: &str) -> Option<&ConfigValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Render the value as environment-variable text.
    ///
    /// Strings are returned verbatim, numbers in decimal, booleans as
    /// `true`/`false`, null as the empty string, and lists/maps as compact JSON.
    pub fn to_env_string(&self) -> String {
        match self {
            ConfigValue::Null => String::new(),
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Integer(n) => n.to_string(),
            ConfigValue::Float(n) => n.to_string(),
            ConfigValue::String(s) => s.clone(),
            ConfigValue::List(_) | ConfigValue::Map(_) => {
                // Serializing this enum cannot fail: every key is a String.
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }

    /// Build a list or a map from PHP-style array entries.
    ///
    /// Entries keyed exactly `0..n` in order become a list, anything else a map.
    pub(crate) fn from_php_entries(entries: Vec<(String, ConfigValue)>) -> Self {
        let sequential = entries
            .iter()
            .enumerate()
            .all(|(idx, (key, _))| key.parse::<usize>().ok() == Some(idx));
        if sequential && !entries.is_empty() {
            ConfigValue::List(entries.into_iter().map(|(_, v)| v).collect())
        } else {
            let mut map = ConfigMap::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(key, value);
            }
            ConfigValue::Map(map)
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_env_string())
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(value: ConfigMap) -> Self {
        ConfigValue::Map(value)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        ConfigValue::List(value)
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::List(items.into_iter().map(ConfigValue::from).collect())
            }
            serde_json::Value::Object(object) => ConfigValue::Map(
                object
                    .into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Value> for ConfigValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ConfigValue::String(s),
            Value::Sequence(items) => {
                ConfigValue::List(items.into_iter().map(ConfigValue::from).collect())
            }
            Value::Mapping(mapping) => ConfigValue::Map(
                mapping
                    .into_iter()
                    .map(|(k, v)| (yaml_key_text(k), ConfigValue::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => ConfigValue::from(tagged.value),
        }
    }
}

#[cfg(feature = "yaml")]
fn yaml_key_text(key: serde_yaml::Value) -> String {
    match ConfigValue::from(key) {
        ConfigValue::String(s) => s,
        other => other.to_env_string(),
    }
}
