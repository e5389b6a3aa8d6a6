//! Kind-generic operation pipelines shared by the file and directory variants.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::FmError;
use crate::fs_ops::{
    copy_file_staged, copy_tree_staged, is_writable_dir, relocate, CopyConflictPolicy, EntryKind,
};
use crate::outcome::OperationResult;
use crate::sanitize::sanitize;

use super::FileManager;

const INVALID_DESTINATION: &str = "Invalid or inaccessible path specified.";

impl EntryKind {
    fn noun(self) -> &'static str {
        match self {
            EntryKind::File => "File",
            EntryKind::Directory => "Directory",
        }
    }

    fn name_label(self) -> &'static str {
        match self {
            EntryKind::File => "Filename",
            EntryKind::Directory => "Directory name",
        }
    }
}

/// Where a move/copy lands: an existing writable directory and a bare name.
#[derive(Debug)]
struct Destination {
    dir: PathBuf,
    name: String,
}

fn require_name(raw: &str, kind: EntryKind) -> Result<String, FmError> {
    let name = sanitize(raw);
    if name.is_empty() {
        return Err(FmError::InvalidInput(format!("{} cannot be empty.", kind.name_label())));
    }
    Ok(name)
}

fn exists_no_follow(p: &Path) -> bool {
    fs::symlink_metadata(p).is_ok()
}

impl FileManager {
    /// Name must be in the snapshot and be of the expected kind on disk.
    fn require_present(&self, name: &str, kind: EntryKind) -> Result<PathBuf, FmError> {
        if !self.snapshot.contains(name) {
            return Err(FmError::NotFound(format!("{} does not exist.", kind.noun())));
        }
        let path = self.root().join(name);
        let link_meta = fs::symlink_metadata(&path).map_err(FmError::io("stat", &path))?;
        // Kind comes from the link target; a dangling link counts as a file.
        let is_dir = if link_meta.file_type().is_symlink() {
            fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            link_meta.is_dir()
        };
        match kind {
            EntryKind::File if is_dir => Err(FmError::InvalidInput(
                "Error: Expected a file but found a directory.".into(),
            )),
            EntryKind::Directory if !is_dir => {
                Err(FmError::InvalidInput("Error: Not a directory.".into()))
            }
            _ => Ok(path),
        }
    }

    fn require_absent(&self, name: &str, kind: EntryKind) -> Result<PathBuf, FmError> {
        let path = self.root().join(name);
        if self.snapshot.contains(name) || exists_no_follow(&path) {
            return Err(FmError::Conflict(format!("{} already exists.", kind.noun())));
        }
        Ok(path)
    }

    /// Interpret a raw destination for `entry_name`.
    ///
    /// An existing directory keeps the entry's name; anything else is
    /// `<parent>/<new name>` with the parent required to exist.
    fn resolve_destination(&self, raw: &str, entry_name: &str) -> Result<Destination, FmError> {
        if raw.is_empty() || raw.contains('\0') {
            return Err(FmError::InvalidInput(INVALID_DESTINATION.into()));
        }
        let given = Path::new(raw);
        let full = if given.is_absolute() {
            given.to_path_buf()
        } else {
            self.root().join(given)
        };

        let (dir, name) = if full.is_dir() {
            (full, entry_name.to_string())
        } else {
            if raw.ends_with(['/', '\\']) {
                return Err(FmError::InvalidInput(INVALID_DESTINATION.into()));
            }
            let name = full
                .file_name()
                .map(|n| sanitize(&n.to_string_lossy()))
                .unwrap_or_default();
            let parent = full.parent().map(Path::to_path_buf);
            match parent {
                Some(parent) if !name.is_empty() => (parent, name),
                _ => return Err(FmError::InvalidInput(INVALID_DESTINATION.into())),
            }
        };

        if !is_writable_dir(&dir) {
            return Err(FmError::InvalidInput(INVALID_DESTINATION.into()));
        }
        let dir = dunce::canonicalize(&dir).map_err(FmError::io("resolve destination", &dir))?;
        Ok(Destination { dir, name })
    }

    fn message(&self, short: String, detailed: impl FnOnce() -> String) -> String {
        if self.verbose { detailed() } else { short }
    }

    pub(super) fn create_entry(
        &mut self,
        raw: &str,
        kind: EntryKind,
    ) -> Result<OperationResult, FmError> {
        let name = require_name(raw, kind)?;
        let path = self.require_absent(&name, kind)?;

        match kind {
            EntryKind::File => {
                fs::OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&path)
                    .map_err(FmError::io("create file", &path))?;
            }
            EntryKind::Directory => {
                fs::create_dir(&path).map_err(FmError::io("create directory", &path))?;
            }
        }
        self.snapshot.refresh()?;
        info!(path = %path.display(), "{} created", kind.noun());

        let msg = self.message(format!("{} created successfully.", kind.noun()), || {
            format!("{} {} created successfully in {}.", kind.noun(), name, self.root().display())
        });
        Ok(OperationResult::success(msg).with_payload(name))
    }

    pub(super) fn delete_entry(
        &mut self,
        raw: &str,
        kind: EntryKind,
    ) -> Result<OperationResult, FmError> {
        let name = require_name(raw, kind)?;
        let path = self.require_present(&name, kind)?;

        match kind {
            EntryKind::File => fs::remove_file(&path).map_err(FmError::io("delete file", &path))?,
            EntryKind::Directory => {
                fs::remove_dir_all(&path).map_err(FmError::io("delete directory", &path))?
            }
        }
        self.snapshot.refresh()?;
        info!(path = %path.display(), "{} deleted", kind.noun());

        let msg = self.message(format!("{} deleted successfully.", kind.noun()), || {
            format!("{} {} deleted from {}.", kind.noun(), name, self.root().display())
        });
        Ok(OperationResult::success(msg).with_payload(name))
    }

    pub(super) fn rename_entry(
        &mut self,
        raw_old: &str,
        raw_new: &str,
        kind: EntryKind,
    ) -> Result<OperationResult, FmError> {
        let old = require_name(raw_old, kind)?;
        let new = require_name(raw_new, kind)?;
        let src = self.require_present(&old, kind)?;
        let dest = self.require_absent(&new, kind)?;

        fs::rename(&src, &dest).map_err(FmError::io("rename", &src))?;
        self.snapshot.refresh()?;
        info!(src = %src.display(), dest = %dest.display(), "{} renamed", kind.noun());

        let msg = self.message(format!("{} renamed successfully.", kind.noun()), || {
            format!("{} {} renamed to {} in {}.", kind.noun(), old, new, self.root().display())
        });
        Ok(OperationResult::success(msg).with_payload(new))
    }

    pub(super) fn move_entry(
        &mut self,
        raw: &str,
        raw_dest: &str,
        kind: EntryKind,
    ) -> Result<OperationResult, FmError> {
        let name = require_name(raw, kind)?;
        let src = self.require_present(&name, kind)?;
        let dest = self.resolve_destination(raw_dest, &name)?;
        if kind == EntryKind::Directory {
            ensure_not_within(&src, &dest.dir, "move")?;
        }

        let target = dest.dir.join(&dest.name);
        if exists_no_follow(&target) {
            return Err(FmError::Conflict(format!(
                "{} already exists at the destination.",
                kind.noun()
            )));
        }

        relocate(&src, &target, kind)?;
        self.snapshot.refresh()?;

        let msg = self.message(format!("{} moved successfully.", kind.noun()), || {
            format!("{} {} moved to {}.", kind.noun(), name, target.display())
        });
        Ok(OperationResult::success(msg).with_payload(dest.name))
    }

    pub(super) fn copy_entry(
        &mut self,
        raw: &str,
        raw_dest: &str,
        kind: EntryKind,
        policy: CopyConflictPolicy,
    ) -> Result<OperationResult, FmError> {
        let name = require_name(raw, kind)?;
        let src = self.require_present(&name, kind)?;
        let dest = self.resolve_destination(raw_dest, &name)?;
        if kind == EntryKind::Directory {
            ensure_not_within(&src, &dest.dir, "copy")?;
        }

        let resolved = policy.resolve(&dest.dir, &dest.name, kind, exists_no_follow)?;
        let target = dest.dir.join(&resolved.name);

        match kind {
            EntryKind::File => copy_file_staged(&src, &target)?,
            EntryKind::Directory => copy_tree_staged(&src, &target)?,
        }
        // Full refresh: the copy may or may not have landed in the root.
        self.snapshot.refresh()?;
        info!(
            src = %src.display(),
            dest = %target.display(),
            attempts = resolved.attempts,
            "{} copied",
            kind.noun()
        );

        let msg = self.message(format!("{} copied successfully.", kind.noun()), || {
            format!("{} {} copied to {} successfully.", kind.noun(), name, target.display())
        });
        Ok(OperationResult::success(msg).with_payload(resolved.name))
    }
}

/// Refuse to place a directory inside itself.
fn ensure_not_within(src_dir: &Path, dest_dir: &Path, verb: &str) -> Result<(), FmError> {
    let src_real = dunce::canonicalize(src_dir).map_err(FmError::io("resolve source", src_dir))?;
    if dest_dir.starts_with(&src_real) {
        return Err(FmError::InvalidInput(format!(
            "Cannot {verb} a directory into itself."
        )));
    }
    Ok(())
}
