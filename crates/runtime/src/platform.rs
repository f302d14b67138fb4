//! Platform probes.
//!
//! Responsibilities:
//! - Query the kernel for process ids and the system name (`uname`).
//! - Read the inode of the running executable.
//! - Inspect the process memory map for loaded shared objects (Linux).
//!
//! Does NOT handle:
//! - Classification of OS names (see `lib.rs`).
//!
//! Invariants / Assumptions:
//! - Every probe degrades to `None`/`false` instead of failing; a missing
//!   fact is never an error for callers.

/// Fields of `uname(2)`, or their closest portable equivalent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Uname {
    pub sysname: String,
    pub nodename: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

impl Uname {
    /// All fields joined by spaces, like `uname -a` without the OS suffix.
    pub fn full(&self) -> String {
        [
            self.sysname.as_str(),
            self.nodename.as_str(),
            self.release.as_str(),
            self.version.as_str(),
            self.machine.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[cfg(unix)]
pub(crate) fn uname() -> Uname {
    use std::ffi::CStr;

    fn field(raw: &[libc::c_char]) -> String {
        // SAFETY: `uname` NUL-terminates every field within its fixed-size buffer.
        unsafe { CStr::from_ptr(raw.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }

    // SAFETY: `utsname` is plain old data; all-zero bytes are a valid value.
    let mut info: libc::utsname = unsafe { std::mem::zeroed() };
    // SAFETY: `info` is a valid, writable `utsname`.
    if unsafe { libc::uname(&mut info) } != 0 {
        tracing::debug!(error = %std::io::Error::last_os_error(), "uname failed, using build target names");
        return fallback_uname();
    }
    Uname {
        sysname: field(&info.sysname),
        nodename: field(&info.nodename),
        release: field(&info.release),
        version: field(&info.version),
        machine: field(&info.machine),
    }
}

#[cfg(not(unix))]
pub(crate) fn uname() -> Uname {
    fallback_uname()
}

fn fallback_uname() -> Uname {
    let sysname = match std::env::consts::OS {
        "windows" => "Windows NT".to_string(),
        "macos" => "Darwin".to_string(),
        other => capitalize(other),
    };
    Uname {
        sysname,
        nodename: String::new(),
        release: String::new(),
        version: String::new(),
        machine: std::env::consts::ARCH.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(unix)]
pub(crate) fn ids() -> (Option<u32>, Option<u32>) {
    // SAFETY: getgid/getuid cannot fail and touch no memory.
    let (gid, uid) = unsafe { (libc::getgid(), libc::getuid()) };
    (Some(gid), Some(uid))
}

#[cfg(not(unix))]
pub(crate) fn ids() -> (Option<u32>, Option<u32>) {
    (None, None)
}

#[cfg(unix)]
pub(crate) fn executable_inode() -> Option<u64> {
    use std::os::unix::fs::MetadataExt;

    let exe = std::env::current_exe().ok()?;
    std::fs::metadata(exe).ok().map(|meta| meta.ino())
}

#[cfg(not(unix))]
pub(crate) fn executable_inode() -> Option<u64> {
    None
}

/// Whether `maps` (in `/proc/<pid>/maps` format) maps a shared object named
/// `lib<name>.so` or `<name>.so`, optionally with a `-<version>` suffix
/// before `.so` and any `.N` suffixes after it.
pub(crate) fn maps_contain_module(maps: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    maps.lines()
        .filter_map(|line| line.split_whitespace().nth(5))
        .filter_map(|path| path.rsplit('/').next())
        .filter_map(shared_object_stem)
        .any(|stem| stem_matches(stem, name))
}

/// `libssl.so.3` -> `libssl`. `None` when the file is not a shared object.
fn shared_object_stem(file: &str) -> Option<&str> {
    file.match_indices(".so")
        .map(|(idx, _)| idx)
        .find(|idx| {
            let rest = &file[idx + 3..];
            rest.is_empty() || rest.starts_with('.')
        })
        .map(|idx| &file[..idx])
}

fn stem_matches(stem: &str, name: &str) -> bool {
    [Some(stem), stem.strip_prefix("lib")]
        .into_iter()
        .flatten()
        .any(|candidate| match candidate.strip_prefix(name) {
            Some("") => true,
            Some(rest) => rest
                .strip_prefix('-')
                .is_some_and(|version| version.starts_with(|c: char| c.is_ascii_digit())),
            None => false,
        })
}

#[cfg(target_os = "linux")]
pub(crate) fn has_module(name: &str) -> bool {
    match std::fs::read_to_string("/proc/self/maps") {
        Ok(maps) => maps_contain_module(&maps, name),
        Err(e) => {
            tracing::debug!(error = %e, "Cannot read process memory map");
            false
        }
    }
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn has_module(_name: &str) -> bool {
    false
}
