//! I/O error description helpers.
//!
//! Enriches io::Error with the operation, the path and a platform-aware hint.
//! The resulting text is what lands in the diagnostic log; the user only ever
//! sees the generic message of the matching `FmError` variant.
//!
//! Usage:
//!   let detail = describe_io_error("copy file", dest, &e);

use std::io;
use std::path::Path;

/// Hint for a raw OS error code, if we know a useful one.
#[cfg(unix)]
fn hint_for_os_code(code: i32) -> Option<&'static str> {
    let hint = match code {
        libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions",
        libc::EXDEV => "cross-filesystem; atomic rename not possible",
        libc::ENOENT => "path not found; verify it exists",
        libc::EEXIST => "already exists; pick a unique name or remove the target",
        libc::ENOTEMPTY => "directory not empty",
        libc::EISDIR => "expected a file but found a directory",
        libc::ENOTDIR => "a path component is not a directory",
        libc::ENOSPC => "insufficient space on device",
        libc::EROFS => "read-only filesystem; cannot write here",
        libc::ELOOP => "too many symbolic link levels; possible symlink cycle",
        libc::ENAMETOOLONG => "filename or path too long",
        libc::EMFILE | libc::ENFILE => "too many open files",
        _ => return None,
    };
    Some(hint)
}

#[cfg(windows)]
fn hint_for_os_code(code: i32) -> Option<&'static str> {
    let hint = match code {
        5 => "access denied; check permissions",
        17 => "not same device; cross-filesystem move",
        32 => "sharing violation; file is in use",
        2 | 3 => "path not found; verify it exists",
        80 | 183 => "already exists; pick a unique name",
        112 => "insufficient disk space",
        145 => "directory not empty",
        206 => "filename or path too long",
        _ => return None,
    };
    Some(hint)
}

#[cfg(not(any(unix, windows)))]
fn hint_for_os_code(_code: i32) -> Option<&'static str> {
    None
}

fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists; remove or choose a unique name"),
        io::ErrorKind::IsADirectory => Some("expected a file but found a directory"),
        io::ErrorKind::NotADirectory => Some("a path component is not a directory"),
        _ => None,
    }
}

/// Format `"<op> '<path>': <error>; <hint> [os code: N]"`.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => hint_for_os_code(code),
        None => hint_for_kind(e.kind()),
    };
    if let Some(hint) = hint {
        msg.push_str("; ");
        msg.push_str(hint);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {}]", code));
    }
    msg
}
