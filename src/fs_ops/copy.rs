//! Staged copies:
//! - The copy is written to a hidden temp sibling in the destination directory
//! - The temp is published under the final name only once it is complete;
//!   files are hard-linked so an existing name is never replaced
//! - On failure the temp is removed (best-effort); the final name is never half-written

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::FmError;

use super::util::unique_temp_path;

fn parent_of(dest: &Path) -> Result<&Path, FmError> {
    dest.parent().ok_or_else(|| {
        FmError::InvalidInput(format!("Destination has no parent directory: {}", dest.display()))
    })
}

/// Copy a regular file `src` to `dest` via a temp sibling.
pub fn copy_file_staged(src: &Path, dest: &Path) -> Result<(), FmError> {
    let tmp = unique_temp_path(parent_of(dest)?);

    if let Err(e) = fs::copy(src, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(FmError::from_io("copy file", src, e));
    }
    // Linking refuses an existing `dest` where rename would replace it.
    let published = fs::hard_link(&tmp, dest);
    if let Err(e) = fs::remove_file(&tmp) {
        warn!(path = %tmp.display(), error = %e, "failed to remove staging file");
    }
    published.map_err(FmError::io("publish staged copy", dest))?;
    debug!(src = %src.display(), dest = %dest.display(), "file copied");
    Ok(())
}

/// Copy the directory tree rooted at `src_dir` to `dest` via a temp sibling.
/// Symlinks are followed; a symlink loop surfaces as an error.
pub fn copy_tree_staged(src_dir: &Path, dest: &Path) -> Result<(), FmError> {
    let tmp = unique_temp_path(parent_of(dest)?);
    fs::create_dir(&tmp).map_err(FmError::io("create staging directory", &tmp))?;

    if let Err(e) = populate_tree(src_dir, &tmp) {
        cleanup_dir(&tmp);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp, dest) {
        cleanup_dir(&tmp);
        return Err(FmError::from_io("rename staged copy", dest, e));
    }
    debug!(src = %src_dir.display(), dest = %dest.display(), "directory tree copied");
    Ok(())
}

fn populate_tree(src_dir: &Path, target: &Path) -> Result<(), FmError> {
    for entry in WalkDir::new(src_dir).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src_dir).to_path_buf();
            FmError::from_io("walk directory", &path, io::Error::from(e))
        })?;
        let rel = entry
            .path()
            .strip_prefix(src_dir)
            .map_err(|_| FmError::InvalidInput(format!("Unexpected entry outside source: {}", entry.path().display())))?;
        let dst = target.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst).map_err(FmError::io("create directory", &dst))?;
        } else {
            fs::copy(entry.path(), &dst).map_err(FmError::io("copy file", entry.path()))?;
        }
    }
    Ok(())
}

fn cleanup_dir(tmp: &Path) {
    if let Err(e) = fs::remove_dir_all(tmp) {
        warn!(path = %tmp.display(), error = %e, "failed to remove staging directory");
    }
}
