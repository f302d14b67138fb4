//! INI reader.
//!
//! Sections become nested maps and unquoted scalars are typed:
//! - `true`/`on`/`yes` and `false`/`off`/`no`/`none` become booleans.
//! - `null` becomes null, integers and floats become numbers.
//! - Quoted values are always strings.
//!
//! `key[] = v` appends to a list and `key[name] = v` fills a map.

use std::path::Path;

use super::{Format, FormatReader, utf8};
use crate::error::ConfigError;
use crate::value::{ConfigMap, ConfigValue};

/// Reads `.ini` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct IniReader;

impl FormatReader for IniReader {
    fn format(&self) -> Format {
        Format::Ini
    }

    fn parse(&self, bytes: &[u8], path: &Path) -> Result<ConfigValue, ConfigError> {
        let text = utf8(bytes, path, Format::Ini)?;
        parse_ini(text).map_err(|(line, message)| {
            ConfigError::parse(path, Format::Ini, format!("line {line}: {message}"))
        })
    }
}

fn parse_ini(text: &str) -> Result<ConfigValue, (usize, String)> {
    let mut root = ConfigMap::new();
    let mut section: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| (line_no, "unterminated section header".to_string()))?
                .trim();
            if name.is_empty() {
                return Err((line_no, "empty section name".to_string()));
            }
            // A section replaces a same-named top-level scalar.
            let slot = root
                .entry(name.to_string())
                .or_insert_with(ConfigValue::empty_map);
            if !matches!(slot, ConfigValue::Map(_)) {
                *slot = ConfigValue::empty_map();
            }
            section = Some(name.to_string());
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| (line_no, "expected `key = value`".to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err((line_no, "empty key".to_string()));
        }
        let value = parse_value(value.trim()).map_err(|msg| (line_no, msg))?;

        let target = match &section {
            Some(name) => match root.get_mut(name) {
                Some(ConfigValue::Map(map)) => map,
                _ => return Err((line_no, format!("section '{name}' is not a table"))),
            },
            None => &mut root,
        };
        insert_entry(target, key, value).map_err(|msg| (line_no, msg))?;
    }

    Ok(ConfigValue::Map(root))
}

/// Insert `key = value`, honouring the `key[]` and `key[name]` array forms.
fn insert_entry(target: &mut ConfigMap, key: &str, value: ConfigValue) -> Result<(), String> {
    let Some(open) = key.find('[') else {
        target.insert(key.to_string(), value);
        return Ok(());
    };
    let inner = key[open + 1..]
        .strip_suffix(']')
        .ok_or_else(|| format!("malformed array key '{key}'"))?
        .trim();
    let base = key[..open].trim().to_string();

    if inner.is_empty() {
        match target
            .entry(base)
            .or_insert_with(|| ConfigValue::List(Vec::new()))
        {
            ConfigValue::List(items) => items.push(value),
            ConfigValue::Map(map) => {
                map.insert(map.len().to_string(), value);
            }
            slot => *slot = ConfigValue::List(vec![value]),
        }
    } else {
        let entry = target.entry(base).or_insert_with(ConfigValue::empty_map);
        if let ConfigValue::List(items) = entry {
            let converted = items
                .drain(..)
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect::<ConfigMap>();
            *entry = ConfigValue::Map(converted);
        }
        match entry {
            ConfigValue::Map(map) => {
                map.insert(inner.to_string(), value);
            }
            slot => {
                let mut map = ConfigMap::new();
                map.insert(inner.to_string(), value);
                *slot = ConfigValue::Map(map);
            }
        }
    }
    Ok(())
}

fn parse_value(raw: &str) -> Result<ConfigValue, String> {
    if let Some(quote) = raw.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let body = &raw[1..];
        let end = body
            .find(quote)
            .ok_or_else(|| "unterminated quoted value".to_string())?;
        let trailing = body[end + 1..].trim();
        if !(trailing.is_empty() || trailing.starts_with(';') || trailing.starts_with('#')) {
            return Err("unexpected text after quoted value".to_string());
        }
        return Ok(ConfigValue::String(body[..end].to_string()));
    }

    let value = strip_inline_comment(raw);
    let lowered = value.to_ascii_lowercase();
    Ok(match lowered.as_str() {
        "" => ConfigValue::String(String::new()),
        "true" | "on" | "yes" => ConfigValue::Bool(true),
        "false" | "off" | "no" | "none" => ConfigValue::Bool(false),
        "null" => ConfigValue::Null,
        _ => parse_number(value).unwrap_or_else(|| ConfigValue::String(value.to_string())),
    })
}

fn strip_inline_comment(raw: &str) -> &str {
    match raw.find(';') {
        Some(pos) => raw[..pos].trim_end(),
        None => raw,
    }
}

fn parse_number(value: &str) -> Option<ConfigValue> {
    if let Ok(n) = value.parse::<i64>() {
        return Some(ConfigValue::Integer(n));
    }
    let looks_numeric = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && value.chars().any(|c| c.is_ascii_digit());
    if looks_numeric {
        value.parse::<f64>().ok().map(ConfigValue::Float)
    } else {
        None
    }
}
