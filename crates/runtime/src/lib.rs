//! Process and operating system facts.
//!
//! Responsibilities:
//! - Capture a point-in-time `RuntimeInfo` snapshot (ids, executable, OS).
//! - Classify the OS family from the kernel name.
//! - Report whether the process runs interactively or as a service.
//!
//! Does NOT handle:
//! - Loading environment files (see `envload-config`).
//!
//! Invariants / Assumptions:
//! - A snapshot never fails to build; unavailable facts are `None`.
//! - OS classification compares the upper-cased first three letters of the
//!   kernel name.

mod platform;

use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Kernel-name prefixes of Unix-like systems.
const UNIX_PREFIXES: [&str; 10] = [
    "CYG", "DAR", "FRE", "HP-", "IRI", "LIN", "NET", "OPE", "SUN", "UNI",
];

/// How the process is attached to the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interface {
    /// Started from a terminal.
    Cli,
    /// Detached from any terminal (daemon, supervisor, pipeline).
    Service,
}

impl Interface {
    fn detect() -> Self {
        if std::io::stdin().is_terminal() || std::io::stdout().is_terminal() {
            Interface::Cli
        } else {
            Interface::Service
        }
    }
}

/// Snapshot of the current process and host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInfo {
    pub pid: u32,
    pub gid: Option<u32>,
    pub uid: Option<u32>,
    /// Inode of the running executable.
    pub inode: Option<u64>,
    pub owner: Option<String>,
    /// Every `uname` field, space separated.
    pub full_os: String,
    /// Kernel name, e.g. `Linux` or `Darwin`.
    pub os_name: String,
    pub version: String,
    pub interface: Interface,
    pub cwd: Option<PathBuf>,
}

impl RuntimeInfo {
    /// Capture the current process state.
    pub fn capture() -> Self {
        let uname = platform::uname();
        let (gid, uid) = platform::ids();
        let info = Self {
            pid: std::process::id(),
            gid,
            uid,
            inode: platform::executable_inode(),
            owner: owner(),
            full_os: uname.full(),
            os_name: uname.sysname,
            version: env!("CARGO_PKG_VERSION").to_string(),
            interface: Interface::detect(),
            cwd: std::env::current_dir().ok(),
        };
        tracing::debug!(pid = info.pid, os = %info.os_name, "Captured runtime info");
        info
    }

    fn os_prefix(&self) -> String {
        self.os_name
            .chars()
            .take(3)
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn is_windows(&self) -> bool {
        self.os_prefix() == "WIN"
    }

    pub fn is_linux(&self) -> bool {
        self.os_prefix() == "LIN"
    }

    /// Whether the kernel name belongs to a Unix-like family.
    pub fn is_unix(&self) -> bool {
        let prefix = self.os_prefix();
        UNIX_PREFIXES.contains(&prefix.as_str())
    }

    pub fn is_cli(&self) -> bool {
        self.interface == Interface::Cli
    }

    pub fn is_service(&self) -> bool {
        self.interface == Interface::Service
    }

    /// Whether a shared object named `lib<name>.so` or `<name>.so` is mapped
    /// into this process. Always `false` outside Linux.
    pub fn has_module(&self, name: &str) -> bool {
        platform::has_module(name)
    }
}

fn owner() -> Option<String> {
    ["USER", "USERNAME"].into_iter().find_map(|key| {
        std::env::var(key)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}
