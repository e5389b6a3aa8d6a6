//! Windows implementations of platform helpers (best-effort, no ACL management).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Open the diagnostic log for appending (no symlink defense available via std).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
