//! Cached listing of one directory's immediate children.
//!
//! The cache may be stale until `refresh()` is called. `FileManager` refreshes
//! after every successful mutation so callers never observe a stale listing
//! at the end of an operation.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::FmError;

#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    root: PathBuf,
    entries: BTreeSet<String>,
}

impl DirectorySnapshot {
    /// Bind to `root` and take the first listing.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, FmError> {
        let mut snapshot = Self {
            root: root.into(),
            entries: BTreeSet::new(),
        };
        snapshot.refresh()?;
        Ok(snapshot)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-list `root` and replace the cached entries wholesale.
    pub fn refresh(&mut self) -> Result<(), FmError> {
        let read_dir = fs::read_dir(&self.root).map_err(|e| unexpected_listing(&self.root, e))?;
        let mut entries = BTreeSet::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| unexpected_listing(&self.root, e))?;
            let name = entry
                .file_name()
                .into_string()
                .unwrap_or_else(|raw| raw.to_string_lossy().into_owned());
            entries.insert(name);
        }
        trace!(root = %self.root.display(), count = entries.len(), "snapshot refreshed");
        self.entries = entries;
        Ok(())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    /// Cached entries in sorted order, without refreshing.
    pub fn list(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Cached entries that are directories right now (live stat per entry).
    /// Entries deleted since the last refresh are silently skipped.
    pub fn list_directories(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|name| self.root.join(name).is_dir())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The root is checked at construction, so any listing failure afterwards
/// is reported as unexpected rather than mapped by kind.
fn unexpected_listing(root: &Path, e: std::io::Error) -> FmError {
    debug!(root = %root.display(), error = %e, "snapshot listing failed");
    FmError::Unexpected {
        op: "list directory",
        path: root.to_path_buf(),
        detail: crate::fs_ops::describe_io_error("list directory", root, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn initial_listing_is_sorted() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("b.txt").touch().unwrap();
        dir.child("a.txt").touch().unwrap();
        dir.child("sub").create_dir_all().unwrap();

        let snap = DirectorySnapshot::new(dir.path()).unwrap();
        assert_eq!(snap.list(), vec!["a.txt", "b.txt", "sub"]);
        assert!(snap.contains("sub"));
        assert!(!snap.contains("c.txt"));
    }

    #[test]
    fn stale_until_refresh() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut snap = DirectorySnapshot::new(dir.path()).unwrap();
        assert!(snap.is_empty());

        dir.child("late.txt").touch().unwrap();
        assert!(!snap.contains("late.txt"));

        snap.refresh().unwrap();
        assert!(snap.contains("late.txt"));
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn list_directories_uses_live_stat() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("keep").create_dir_all().unwrap();
        dir.child("gone").create_dir_all().unwrap();
        dir.child("file.txt").touch().unwrap();

        let snap = DirectorySnapshot::new(dir.path()).unwrap();
        assert_eq!(snap.list_directories(), vec!["gone", "keep"]);

        std::fs::remove_dir(dir.child("gone").path()).unwrap();
        // Cached list still has it; the directory view does not.
        assert!(snap.contains("gone"));
        assert_eq!(snap.list_directories(), vec!["keep"]);
    }

    #[test]
    fn missing_root_is_unexpected() {
        let dir = assert_fs::TempDir::new().unwrap();
        let err = DirectorySnapshot::new(dir.path().join("nope")).unwrap_err();
        assert_eq!(err.outcome(), crate::outcome::Outcome::Unexpected);
    }
}
