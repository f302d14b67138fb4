//! Output rendering for command results.
//!
//! Responsibilities:
//! - Render any serializable result as JSON or YAML.
//! - Render `raw` output: environment-style text, as it would be published.
//!
//! Does NOT handle:
//! - Writing to stdout (callers print the returned string).

use anyhow::{Context, Result};
use envload_config::ConfigValue;
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    /// Environment-style text: scalars verbatim, `KEY=value` lines for maps.
    Raw,
}

/// Render a configuration value.
///
/// Raw scalars print exactly as they are published to the environment. Raw
/// maps print one `KEY=value` line per top-level entry.
pub fn render_value(value: &ConfigValue, format: OutputFormat) -> Result<String> {
    match (format, value) {
        (OutputFormat::Raw, ConfigValue::Map(map)) => Ok(map
            .iter()
            .map(|(key, value)| format!("{key}={}", value.to_env_string()))
            .collect::<Vec<_>>()
            .join("\n")),
        (OutputFormat::Raw, _) => Ok(value.to_env_string()),
        _ => render(value, format),
    }
}

/// Render a serializable result.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
        }
        OutputFormat::Yaml => {
            let text = serde_yaml::to_string(value).context("Failed to serialize output as YAML")?;
            Ok(text.trim_end().to_string())
        }
        OutputFormat::Raw => {
            let json = serde_json::to_value(value).context("Failed to serialize output")?;
            Ok(match json {
                serde_json::Value::Object(map) => map
                    .iter()
                    .map(|(key, value)| format!("{key}={}", raw_scalar(value)))
                    .collect::<Vec<_>>()
                    .join("\n"),
                other => raw_scalar(&other),
            })
        }
    }
}

fn raw_scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envload_config::ConfigMap;

    fn sample() -> ConfigValue {
        let mut db = ConfigMap::new();
        db.insert("host".to_string(), ConfigValue::from("localhost"));
        db.insert("port".to_string(), ConfigValue::Integer(5432));
        let mut root = ConfigMap::new();
        root.insert("NAME".to_string(), ConfigValue::from("demo"));
        root.insert("DB".to_string(), ConfigValue::Map(db));
        ConfigValue::Map(root)
    }

    #[test]
    fn test_raw_scalars_match_published_text() {
        assert_eq!(render_value(&ConfigValue::Bool(true), OutputFormat::Raw).unwrap(), "true");
        assert_eq!(render_value(&ConfigValue::Null, OutputFormat::Raw).unwrap(), "");
        assert_eq!(render_value(&ConfigValue::from("x y"), OutputFormat::Raw).unwrap(), "x y");
    }

    #[test]
    fn test_raw_map_prints_env_lines() {
        assert_eq!(
            render_value(&sample(), OutputFormat::Raw).unwrap(),
            "NAME=demo\nDB={\"host\":\"localhost\",\"port\":5432}"
        );
    }

    #[test]
    fn test_json_and_yaml_keep_order() {
        let json = render_value(&sample(), OutputFormat::Json).unwrap();
        assert!(json.find("NAME").unwrap() < json.find("DB").unwrap());
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["DB"]["port"], 5432);

        let yaml = render_value(&sample(), OutputFormat::Yaml).unwrap();
        assert!(yaml.starts_with("NAME: demo"));
        assert!(yaml.contains("  host: localhost"));
    }

    #[test]
    fn test_raw_struct_output() {
        #[derive(Serialize)]
        struct Facts {
            pid: u32,
            owner: Option<String>,
        }
        let text = render(&Facts { pid: 7, owner: None }, OutputFormat::Raw).unwrap();
        assert_eq!(text, "pid=7\nowner=");
    }
}
