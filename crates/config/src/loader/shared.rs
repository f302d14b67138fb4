//! Process-wide loader instance.
//!
//! Optional convenience for applications that want a single global loader
//! instead of passing an `EnvLoader` around. It is created on first use and
//! lives until the process exits.

use std::sync::{Mutex, OnceLock};

use super::builder::EnvLoader;

/// The shared loader, created with default settings on first access.
///
/// Hold the lock for the whole `load` call; environment writes are global.
pub fn shared() -> &'static Mutex<EnvLoader> {
    static SHARED: OnceLock<Mutex<EnvLoader>> = OnceLock::new();
    SHARED.get_or_init(|| Mutex::new(EnvLoader::new()))
}
