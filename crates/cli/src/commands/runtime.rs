//! `runtime`: print process and operating system facts.

use anyhow::Result;
use envload_runtime::RuntimeInfo;
use serde::Serialize;

use crate::output::{OutputFormat, render};

/// Captured facts plus the derived platform flags.
#[derive(Debug, Serialize)]
struct RuntimeReport {
    #[serde(flatten)]
    info: RuntimeInfo,
    is_windows: bool,
    is_linux: bool,
    is_unix: bool,
}

impl From<RuntimeInfo> for RuntimeReport {
    fn from(info: RuntimeInfo) -> Self {
        Self {
            is_windows: info.is_windows(),
            is_linux: info.is_linux(),
            is_unix: info.is_unix(),
            info,
        }
    }
}

pub fn run(output: OutputFormat) -> Result<()> {
    let report = RuntimeReport::from(RuntimeInfo::capture());
    println!("{}", render(&report, output)?);
    Ok(())
}
