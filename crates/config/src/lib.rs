//! Environment file loading for envload.
//!
//! This crate locates `<directory>/<name>.<format>`, decodes it with one of
//! the registered format readers, layers the result over the process
//! environment, publishes the merged top-level entries back into the
//! environment, and serves dotted-path lookups from a memoized store.

pub mod constants;
pub mod env;
pub mod error;
mod loader;
pub mod readers;
pub mod store;
pub mod value;

pub use env::{EnvSnapshot, env_var_or_none};
pub use error::ConfigError;
pub use loader::{EnvLoader, shared};
pub use readers::{Format, FormatReader, resolve};
pub use store::ConfigStore;
pub use value::{ConfigMap, ConfigValue};
