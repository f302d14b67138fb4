//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Load the environment for the commands that need it.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//!
//! Invariants:
//! - `runtime` and `formats` never touch the filesystem or the environment.

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::error::ExitCode;

/// Run the selected command and return the process exit status.
pub(crate) fn run_command(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Get {
            key,
            default,
            strict,
            output,
        } => {
            let loader = commands::load(&cli)?;
            commands::get::run(&loader, key, default.as_deref(), *strict, *output)?;
        }
        Commands::Dump { output } => {
            let loader = commands::load(&cli)?;
            commands::dump::run(&loader, *output)?;
        }
        Commands::Check => {
            let loader = commands::load(&cli)?;
            commands::check::run(&loader)?;
        }
        Commands::Exec { command } => {
            commands::load(&cli)?;
            return commands::exec::run(command);
        }
        Commands::Runtime { output } => {
            commands::runtime::run(*output)?;
        }
        Commands::Formats => {
            commands::formats::run();
        }
    }
    Ok(ExitCode::Success.as_i32())
}
