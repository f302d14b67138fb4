//! `check`: load, validate, and report which file was used.

use anyhow::Result;
use envload_config::EnvLoader;

pub fn run(loader: &EnvLoader) -> Result<()> {
    println!("ok");
    if let Some(path) = loader.env_file() {
        if path.is_file() {
            println!("file: {}", path.display());
        } else {
            println!("file: {} (not found, process environment only)", path.display());
        }
    }
    if let Some(store) = loader.store() {
        println!("entries: {}", store.len());
    }
    Ok(())
}
