//! Copy-conflict name resolution.
//!
//! Policy:
//! - If the desired name is free, use it as-is (zero attempts).
//! - Otherwise try `stem_copyN.ext` for files, or `name_copyN` for directories,
//!   for N = 1..=max_attempts, and take the first free one.
//! - If every candidate is taken, report `Exhausted`.
//!
//! Notes:
//! - Pure with respect to the existence predicate: the same desired name and the
//!   same set of existing names always give the same answer.
//! - This only decides the name from the state the predicate sees; nothing is locked.

use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

use crate::errors::FmError;

/// What is being copied; decides the suffix scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `stem_copyN.ext`
    File,
    /// `name_copyN`, no extension concept.
    Directory,
}

/// Resolver ran out of candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Error: Maximum number of copies ({max_attempts}) reached.")]
pub struct Exhausted {
    pub max_attempts: u32,
}

impl From<Exhausted> for FmError {
    fn from(e: Exhausted) -> Self {
        FmError::Conflict(e.to_string())
    }
}

/// Name chosen by the resolver and how many suffixed candidates it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub name: String,
    pub attempts: u32,
}

/// Bound on the suffix search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyConflictPolicy {
    max_attempts: u32,
}

impl Default for CopyConflictPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl CopyConflictPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Build a policy from an untrusted signed value; negatives are rejected.
    pub fn from_signed(max_attempts: i64) -> Result<Self, FmError> {
        u32::try_from(max_attempts).map(Self::new).map_err(|_| {
            FmError::InvalidInput(format!(
                "Invalid maximum number of copies: {max_attempts}. Use a value between 0 and {}.",
                u32::MAX
            ))
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pick a destination name inside `base` for `desired`.
    ///
    /// `exists` is asked about full paths (`base/candidate`).
    pub fn resolve<F>(
        &self,
        base: &Path,
        desired: &str,
        kind: EntryKind,
        mut exists: F,
    ) -> Result<Resolved, Exhausted>
    where
        F: FnMut(&Path) -> bool,
    {
        if !exists(&base.join(desired)) {
            return Ok(Resolved {
                name: desired.to_string(),
                attempts: 0,
            });
        }

        for counter in 1..=self.max_attempts {
            let candidate = copy_candidate(desired, kind, counter);
            if !exists(&base.join(&candidate)) {
                debug!(desired, candidate = %candidate, attempts = counter, "resolved copy conflict");
                return Ok(Resolved {
                    name: candidate,
                    attempts: counter,
                });
            }
            trace!(candidate = %candidate, "copy candidate taken");
        }

        debug!(desired, max_attempts = self.max_attempts, "copy conflict resolution exhausted");
        Err(Exhausted {
            max_attempts: self.max_attempts,
        })
    }
}

/// Free-function form of [`CopyConflictPolicy::resolve`].
pub fn resolve_copy_name<F>(
    base: &Path,
    desired: &str,
    kind: EntryKind,
    exists: F,
    max_attempts: u32,
) -> Result<Resolved, Exhausted>
where
    F: FnMut(&Path) -> bool,
{
    CopyConflictPolicy::new(max_attempts).resolve(base, desired, kind, exists)
}

/// The `counter`-th candidate for `desired`.
///
/// Examples (files):
/// - "a.txt" -> "a_copy1.txt"
/// - "archive.tar.gz" -> "archive.tar_copy1.gz"
/// - ".env" -> ".env_copy1"
///
/// Directories never split an extension: "photos.2024" -> "photos.2024_copy1".
pub fn copy_candidate(desired: &str, kind: EntryKind, counter: u32) -> String {
    let suffix = format!("_copy{counter}");
    match kind {
        EntryKind::Directory => build_name_with_suffix(desired, None, &suffix),
        EntryKind::File => {
            let p = Path::new(desired);
            let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or(desired);
            let ext = p.extension().and_then(|e| e.to_str());
            build_name_with_suffix(stem, ext, &suffix)
        }
    }
}

// Conservative filename limit (bytes); typical POSIX/EXT and NTFS limits.
const MAX_FILENAME_LEN: usize = 255;

/// `stem + suffix + ["." + ext]`, shortening the stem on a char boundary when
/// the whole name would exceed MAX_FILENAME_LEN.
fn build_name_with_suffix(stem: &str, ext: Option<&str>, suffix: &str) -> String {
    let ext_len = ext.map(|e| e.len() + 1).unwrap_or(0);
    let overhead = suffix.len() + ext_len;
    let budget = MAX_FILENAME_LEN.saturating_sub(overhead);

    let mut kept = stem;
    if stem.len() > budget {
        let mut cut = budget;
        while cut > 0 && !stem.is_char_boundary(cut) {
            cut -= 1;
        }
        kept = &stem[..cut];
    }
    let kept = if kept.is_empty() { "f" } else { kept };

    let mut name = String::with_capacity(kept.len() + overhead);
    name.push_str(kept);
    name.push_str(suffix);
    if let Some(e) = ext {
        name.push('.');
        name.push_str(e);
    }
    name
}
