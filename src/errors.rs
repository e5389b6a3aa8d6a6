//! Typed error definitions for file_manager.
//! One variant per failure class; each maps onto an `Outcome` and a stable code
//! used in the diagnostic log.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error};

use crate::fs_ops::describe_io_error;
use crate::outcome::Outcome;

#[derive(Debug, Error)]
pub enum FmError {
    /// Rejected before touching the filesystem (empty name, bad destination, ...).
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    /// Operand already exists, or the conflict resolver ran out of attempts.
    #[error("{0}")]
    Conflict(String),

    #[error("Error: Permission denied.")]
    PermissionDenied { path: PathBuf, context: String },

    /// Anything else the OS reports. The detail goes to the log only.
    #[error("Error: An unexpected error occurred.")]
    Unexpected {
        op: &'static str,
        path: PathBuf,
        detail: String,
    },
}

impl FmError {
    pub fn outcome(&self) -> Outcome {
        match self {
            FmError::InvalidInput(_) => Outcome::InvalidInput,
            FmError::NotFound(_) => Outcome::NotFound,
            FmError::Conflict(_) => Outcome::Conflict,
            FmError::PermissionDenied { .. } => Outcome::PermissionDenied,
            FmError::Unexpected { .. } => Outcome::Unexpected,
        }
    }

    /// Stable numeric code for log correlation.
    pub fn code(&self) -> i32 {
        match self {
            FmError::InvalidInput(_) => 10,
            FmError::NotFound(_) => 20,
            FmError::Conflict(_) => 30,
            FmError::PermissionDenied { .. } => 40,
            FmError::Unexpected { .. } => 50,
        }
    }

    /// Map an io::Error raised by `op` on `path` into the taxonomy.
    pub fn from_io(op: &'static str, path: &Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => {
                FmError::NotFound("Error: File or directory not found.".into())
            }
            io::ErrorKind::PermissionDenied => FmError::PermissionDenied {
                path: path.to_path_buf(),
                context: describe_io_error(op, path, &e),
            },
            io::ErrorKind::AlreadyExists => {
                FmError::Conflict("Error: File or directory already exists.".into())
            }
            io::ErrorKind::IsADirectory => {
                FmError::InvalidInput("Error: Expected a file but found a directory.".into())
            }
            io::ErrorKind::NotADirectory => FmError::InvalidInput("Error: Not a directory.".into()),
            _ => FmError::Unexpected {
                op,
                path: path.to_path_buf(),
                detail: describe_io_error(op, path, &e),
            },
        }
    }

    /// Shorthand for `map_err` call sites.
    pub(crate) fn io<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> FmError + 'a {
        move |e| FmError::from_io(op, path, e)
    }
}

/// Append a failure to the diagnostic log. NotFound, PermissionDenied and
/// Unexpected go out at ERROR; the rest are debug-level noise.
pub(crate) fn log_failure(op: &str, err: &FmError) {
    let code = err.code();
    match err {
        FmError::NotFound(msg) => {
            error!(code, kind = "not_found", op, "{msg}")
        }
        FmError::PermissionDenied { path, context } => {
            error!(code, kind = "permission_denied", op, path = %path.display(), %context, "Operation failed")
        }
        FmError::Unexpected { path, detail, .. } => {
            error!(code, kind = "unexpected", op, path = %path.display(), %detail, "Operation failed")
        }
        FmError::InvalidInput(msg) => {
            debug!(code, kind = "invalid_input", op, "{msg}")
        }
        FmError::Conflict(msg) => {
            debug!(code, kind = "conflict", op, "{msg}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kinds_map_to_taxonomy() {
        let p = Path::new("/tmp/x");
        let cases = [
            (io::ErrorKind::NotFound, Outcome::NotFound),
            (io::ErrorKind::PermissionDenied, Outcome::PermissionDenied),
            (io::ErrorKind::AlreadyExists, Outcome::Conflict),
            (io::ErrorKind::IsADirectory, Outcome::InvalidInput),
            (io::ErrorKind::Other, Outcome::Unexpected),
        ];
        for (kind, expected) in cases {
            let err = FmError::from_io("op", p, io::Error::from(kind));
            assert_eq!(err.outcome(), expected, "kind {kind:?}");
        }
    }

    #[test]
    fn io_shorthand_keeps_op_and_path() {
        let td = tempfile::tempdir().unwrap();
        let missing = td.path().join("absent.txt");
        let err = std::fs::read(&missing)
            .map_err(FmError::io("read file", &missing))
            .unwrap_err();
        assert_eq!(err.outcome(), Outcome::NotFound);

        let err = std::fs::read_dir(td.path().join("absent.txt").join("child"))
            .map_err(FmError::io("list directory", td.path()))
            .unwrap_err();
        assert_eq!(err.code(), 20);
    }

    #[cfg(unix)]
    #[test]
    fn cross_device_is_unexpected_with_hint() {
        let p = Path::new("/mnt/other");
        let err = FmError::from_io("move", p, io::Error::from_raw_os_error(libc::EXDEV));
        match err {
            FmError::Unexpected { detail, .. } => {
                assert!(detail.contains("cross-filesystem"), "detail was: {detail}");
            }
            other => panic!("expected Unexpected, got {other:?}"),
        }
    }

    #[test]
    fn codes_are_distinct() {
        let errs = [
            FmError::InvalidInput(String::new()),
            FmError::NotFound(String::new()),
            FmError::Conflict(String::new()),
            FmError::PermissionDenied {
                path: PathBuf::new(),
                context: String::new(),
            },
            FmError::Unexpected {
                op: "x",
                path: PathBuf::new(),
                detail: String::new(),
            },
        ];
        let mut codes: Vec<i32> = errs.iter().map(FmError::code).collect();
        codes.dedup();
        assert_eq!(codes.len(), 5);
    }
}
