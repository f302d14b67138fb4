//! `get`: print one value by dotted key path.

use anyhow::Result;
use envload_config::{ConfigValue, EnvLoader};

use crate::error::CliError;
use crate::output::{OutputFormat, render_value};

pub fn run(
    loader: &EnvLoader,
    key: &str,
    default: Option<&str>,
    strict: bool,
    output: OutputFormat,
) -> Result<()> {
    let found = loader.store().and_then(|store| store.lookup(key));
    let value = match (found, default) {
        (Some(value), _) => value,
        (None, _) if strict => return Err(CliError::KeyNotFound(key.to_string()).into()),
        (None, Some(default)) => ConfigValue::from(default),
        (None, None) => ConfigValue::Null,
    };
    println!("{}", render_value(&value, output)?);
    Ok(())
}
