use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix of every transient name this crate creates.
pub(crate) const TEMP_PREFIX: &str = ".fms.";

/// Hidden, unique sibling inside `dst_dir` used to stage a copy.
pub(crate) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dst_dir.join(format!("{TEMP_PREFIX}{pid}.{nanos}.tmp"))
}

/// EXDEV / ERROR_NOT_SAME_DEVICE.
pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::CrossesDevices {
        return true;
    }
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

/// Is `dir` an existing directory we can create entries in?
/// Checks by creating and removing a small file (create_new, never clobbers).
pub(crate) fn is_writable_dir(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }
    let marker = dir.join(format!("{TEMP_PREFIX}writable.{}.tmp", std::process::id()));
    match fs::OpenOptions::new().create_new(true).write(true).open(&marker) {
        Ok(_) => {
            let _ = fs::remove_file(&marker);
            true
        }
        Err(_) => false,
    }
}
