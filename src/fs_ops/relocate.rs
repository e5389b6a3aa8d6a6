//! Move implementation.
//! Attempts a plain rename; across filesystems falls back to a staged copy
//! followed by removal of the source.

use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::errors::FmError;

use super::copy::{copy_file_staged, copy_tree_staged};
use super::duplicate::EntryKind;
use super::util::is_cross_device;

/// Move `src` to `dest`. The caller guarantees `dest` does not exist.
pub fn relocate(src: &Path, dest: &Path, kind: EntryKind) -> Result<(), FmError> {
    match fs::rename(src, dest) {
        Ok(()) => {
            info!(src = %src.display(), dest = %dest.display(), "renamed");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            warn!(error = %e, "cross-filesystem move, using copy + remove");
            match kind {
                EntryKind::File => {
                    copy_file_staged(src, dest)?;
                    fs::remove_file(src).map_err(FmError::io("remove original file", src))?;
                }
                EntryKind::Directory => {
                    copy_tree_staged(src, dest)?;
                    fs::remove_dir_all(src).map_err(FmError::io("remove original directory", src))?;
                }
            }
            info!(src = %src.display(), dest = %dest.display(), "copied and removed source");
            Ok(())
        }
        Err(e) => Err(FmError::from_io("move", src, e)),
    }
}
