//! CLI command implementations.

pub mod check;
pub mod dump;
pub mod exec;
pub mod formats;
pub mod get;
pub mod runtime;

use anyhow::{Context, Result};
use envload_config::EnvLoader;

use crate::args::Cli;

/// Load the environment described by the global options.
pub fn load(cli: &Cli) -> Result<EnvLoader> {
    let mut loader = cli.loader();
    loader
        .load(&cli.dir, cli.name.as_deref(), &cli.format)
        .with_context(|| format!("Failed to load environment from {}", cli.dir.display()))?;
    Ok(loader)
}
