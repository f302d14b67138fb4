//! `exec`: run a child process with the loaded environment.
//!
//! The environment has already been published by the loader, so the child
//! simply inherits it. Under `--no-publish` it inherits only the original
//! process environment. The child's exit status becomes ours; a child killed
//! by a signal exits with `128 + signal`, as shells report it.

use anyhow::{Context, Result};
use std::process::{Command, ExitStatus};
use tracing::debug;

use crate::error::ExitCode;

pub fn run(command: &[String]) -> Result<i32> {
    let (program, args) = command
        .split_first()
        .context("No command given to exec")?;
    debug!(program = %program, args = args.len(), "Spawning command");

    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run '{program}'"))?;
    Ok(exit_status_code(status))
}

#[cfg(unix)]
fn exit_status_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(ExitCode::GeneralError.as_i32())
}

#[cfg(not(unix))]
fn exit_status_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(ExitCode::GeneralError.as_i32())
}
