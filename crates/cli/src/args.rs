//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Build an `EnvLoader` from the global load options.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Parser, Subcommand};
use envload_config::EnvLoader;
use envload_config::constants::DEFAULT_FORMAT;
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "envload")]
#[command(about = "Load environment files in several formats and publish them to the environment", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envload --dir config --name production get database.host\n  APP_ENV=staging envload --format yml dump -o yaml\n  envload --require DATABASE_URL check\n  envload --format ini exec -- ./server --port 8080\n"
)]
pub struct Cli {
    /// Directory containing the environment files
    #[arg(short, long, global = true, env = "ENVLOAD_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Logical file name, without extension (defaults to $APP_ENV)
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// File format and extension (json, php, ini, xml, yml, yaml, serialize, env)
    #[arg(short, long, global = true, env = "ENVLOAD_FORMAT", default_value = DEFAULT_FORMAT)]
    pub format: String,

    /// Key that must be present after loading (repeatable)
    #[arg(short, long = "require", global = true, value_name = "KEY")]
    pub required: Vec<String>,

    /// Fail when the environment file does not exist
    #[arg(long, global = true)]
    pub strict_file: bool,

    /// Do not write loaded values into the process environment
    #[arg(long, global = true)]
    pub no_publish: bool,

    /// Log loader activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Loader configured from the global options.
    pub fn loader(&self) -> EnvLoader {
        EnvLoader::new()
            .with_missing_file_fatal(self.strict_file)
            .with_publish(!self.no_publish)
            .with_required_keys(self.required.iter().cloned())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the value at a dotted key path
    Get {
        /// Key to look up, e.g. `database.host`
        key: String,

        /// Value printed when the key is absent
        #[arg(long, conflicts_with = "strict")]
        default: Option<String>,

        /// Exit with status 7 when the key is absent
        #[arg(long)]
        strict: bool,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Raw)]
        output: OutputFormat,
    },

    /// Print the merged environment
    Dump {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },

    /// Load and validate, then report the resolved file
    Check,

    /// Load the environment, then run a command that inherits it
    Exec {
        /// Command and arguments, after `--`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
        command: Vec<String>,
    },

    /// Print process and operating system facts
    Runtime {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },

    /// List recognized format identifiers
    Formats,
}
