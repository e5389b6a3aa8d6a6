//! `FileManager`: mutating operations over one managed directory.
//!
//! Every operation follows the same pipeline:
//! sanitize -> validate against the snapshot -> (move/copy) validate the
//! destination directory -> (copy) resolve a free name -> syscall -> refresh
//! the snapshot -> build an `OperationResult`.
//!
//! Nothing propagates out as a raw error; failures are logged and returned as
//! structured results. There is no retry and no rollback.

mod ops;

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::document::Document;
use crate::errors::{log_failure, FmError};
use crate::fs_ops::{CopyConflictPolicy, EntryKind};
use crate::outcome::OperationResult;
use crate::snapshot::DirectorySnapshot;

/// Owns the snapshot of its managed root exclusively. Not meant for
/// concurrent use; callers serialize access.
#[derive(Debug)]
pub struct FileManager {
    snapshot: DirectorySnapshot,
    policy: CopyConflictPolicy,
    verbose: bool,
}

impl FileManager {
    /// Manage the process working directory as it is right now.
    pub fn new() -> Result<Self, FmError> {
        let cwd = std::env::current_dir()
            .map_err(|e| FmError::from_io("read working directory", Path::new("."), e))?;
        Self::with_root(cwd)
    }

    /// Manage `root`. The path is canonicalized once; later changes to the
    /// process working directory do not affect it.
    pub fn with_root(root: impl AsRef<Path>) -> Result<Self, FmError> {
        let root = root.as_ref();
        let canonical = dunce::canonicalize(root).map_err(FmError::io("open managed root", root))?;
        if !canonical.is_dir() {
            return Err(FmError::InvalidInput(format!(
                "Error: Not a directory: {}",
                canonical.display()
            )));
        }
        let snapshot = DirectorySnapshot::new(canonical)?;
        debug!(root = %snapshot.root().display(), entries = snapshot.len(), "file manager ready");
        Ok(Self {
            snapshot,
            policy: CopyConflictPolicy::default(),
            verbose: false,
        })
    }

    /// Build from runtime configuration (root, copy limit, verbosity).
    pub fn from_config(cfg: &Config) -> Result<Self, FmError> {
        let mut fm = match &cfg.root {
            Some(root) => Self::with_root(root)?,
            None => Self::new()?,
        };
        fm.policy = CopyConflictPolicy::new(cfg.max_attempts);
        fm.verbose = cfg.verbose;
        Ok(fm)
    }

    pub fn root(&self) -> &Path {
        self.snapshot.root()
    }

    pub fn snapshot(&self) -> &DirectorySnapshot {
        &self.snapshot
    }

    pub fn policy(&self) -> CopyConflictPolicy {
        self.policy
    }

    pub fn set_max_attempts(&mut self, max_attempts: u32) {
        self.policy = CopyConflictPolicy::new(max_attempts);
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Flip verbose mode; returns the new state.
    pub fn toggle_verbose(&mut self) -> bool {
        self.verbose = !self.verbose;
        self.verbose
    }

    /// Re-list the managed root.
    pub fn refresh(&mut self) -> Result<(), FmError> {
        self.snapshot.refresh().inspect_err(|e| log_failure("refresh", e))
    }

    /// Cached entries of the managed root (files and directories).
    pub fn list_files(&self) -> Vec<String> {
        if self.verbose {
            info!("Listing all files in directory: {}", self.root().display());
        }
        self.snapshot.list()
    }

    /// Cached entries that are directories at call time.
    pub fn list_directories(&self) -> Vec<String> {
        self.snapshot.list_directories()
    }

    /// Accessor for an arbitrary path; relative paths resolve against the root.
    pub fn document(&self, path: &str) -> Document {
        let p = PathBuf::from(path);
        if p.is_absolute() {
            Document::new(p)
        } else {
            Document::new(self.root().join(p))
        }
    }

    pub fn create_file(&mut self, name: &str) -> OperationResult {
        let res = self.create_entry(name, EntryKind::File);
        conclude("create_file", res)
    }

    pub fn delete_file(&mut self, name: &str) -> OperationResult {
        let res = self.delete_entry(name, EntryKind::File);
        conclude("delete_file", res)
    }

    pub fn rename_file(&mut self, old_name: &str, new_name: &str) -> OperationResult {
        let res = self.rename_entry(old_name, new_name, EntryKind::File);
        conclude("rename_file", res)
    }

    pub fn move_file(&mut self, name: &str, destination: &str) -> OperationResult {
        let res = self.move_entry(name, destination, EntryKind::File);
        conclude("move_file", res)
    }

    /// Copy with the manager's configured attempt limit.
    pub fn copy_file(&mut self, name: &str, destination: &str) -> OperationResult {
        let res = self.copy_entry(name, destination, EntryKind::File, self.policy);
        conclude("copy_file", res)
    }

    /// Copy with an explicit attempt limit; negative limits are `InvalidInput`.
    pub fn copy_file_with_limit(
        &mut self,
        name: &str,
        destination: &str,
        max_attempts: i64,
    ) -> OperationResult {
        let res = CopyConflictPolicy::from_signed(max_attempts)
            .and_then(|policy| self.copy_entry(name, destination, EntryKind::File, policy));
        conclude("copy_file", res)
    }

    pub fn create_directory(&mut self, name: &str) -> OperationResult {
        let res = self.create_entry(name, EntryKind::Directory);
        conclude("create_directory", res)
    }

    pub fn delete_directory(&mut self, name: &str) -> OperationResult {
        let res = self.delete_entry(name, EntryKind::Directory);
        conclude("delete_directory", res)
    }

    pub fn rename_directory(&mut self, old_name: &str, new_name: &str) -> OperationResult {
        let res = self.rename_entry(old_name, new_name, EntryKind::Directory);
        conclude("rename_directory", res)
    }

    pub fn move_directory(&mut self, name: &str, destination: &str) -> OperationResult {
        let res = self.move_entry(name, destination, EntryKind::Directory);
        conclude("move_directory", res)
    }

    pub fn copy_directory(&mut self, name: &str, destination: &str) -> OperationResult {
        let res = self.copy_entry(name, destination, EntryKind::Directory, self.policy);
        conclude("copy_directory", res)
    }

    pub fn copy_directory_with_limit(
        &mut self,
        name: &str,
        destination: &str,
        max_attempts: i64,
    ) -> OperationResult {
        let res = CopyConflictPolicy::from_signed(max_attempts)
            .and_then(|policy| self.copy_entry(name, destination, EntryKind::Directory, policy));
        conclude("copy_directory", res)
    }
}

/// Operation boundary: log the failure (if any) and fold it into a result.
fn conclude(op: &'static str, res: Result<OperationResult, FmError>) -> OperationResult {
    match res {
        Ok(ok) => ok,
        Err(e) => {
            log_failure(op, &e);
            e.into()
        }
    }
}
