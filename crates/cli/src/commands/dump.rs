//! `dump`: print the whole merged environment.

use anyhow::Result;
use envload_config::{ConfigValue, EnvLoader};

use crate::output::{OutputFormat, render_value};

pub fn run(loader: &EnvLoader, output: OutputFormat) -> Result<()> {
    let tree = loader.get(None, ConfigValue::Null);
    println!("{}", render_value(&tree, output)?);
    Ok(())
}
