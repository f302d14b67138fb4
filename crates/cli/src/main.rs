//! envload - load environment files and inspect the result.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Install the tracing subscriber (stderr only).
//! - Run the selected command and translate failures into exit codes.
//!
//! Does NOT handle:
//! - Decoding or merging environment files (see `envload-config`).
//!
//! Invariants:
//! - Stdout carries command output only; logs and errors go to stderr.

mod args;
mod commands;
mod dispatch;
mod error;
mod output;

use args::Cli;
use clap::Parser;
use error::ExitCodeExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match dispatch::run_command(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code().as_i32()
        }
    };

    std::process::exit(code);
}
