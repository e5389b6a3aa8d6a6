//! Single-file accessor.
//!
//! A `Document` wraps one path, inside or outside the managed root, and never
//! touches a `DirectorySnapshot`. Each call is one syscall; failures are
//! mapped into the same taxonomy as `FileManager` operations and logged.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::{log_failure, FmError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw contents.
    pub fn read_bytes(&self) -> Result<Vec<u8>, FmError> {
        fs::read(&self.path)
            .map_err(FmError::io("read file", &self.path))
            .inspect_err(|e| log_failure("read_file", e))
    }

    /// Contents as UTF-8 text. Non-UTF-8 content is `InvalidInput`.
    pub fn read(&self) -> Result<String, FmError> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes)
            .map_err(|_| {
                FmError::InvalidInput(format!("Error: {} is not valid UTF-8 text.", self.path.display()))
            })
            .inspect_err(|e| log_failure("read_file", e))
    }

    /// Create or truncate, then write `content`.
    pub fn write(&self, content: impl AsRef<[u8]>) -> Result<String, FmError> {
        fs::write(&self.path, content.as_ref())
            .map_err(FmError::io("write file", &self.path))
            .inspect_err(|e| log_failure("write_file", e))?;
        info!(path = %self.path.display(), bytes = content.as_ref().len(), "Content written");
        Ok(format!("Content written to {} successfully.", self.path.display()))
    }

    /// Size in bytes.
    pub fn size(&self) -> Result<u64, FmError> {
        fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(FmError::io("stat file", &self.path))
            .inspect_err(|e| log_failure("file_size", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;
    use assert_fs::prelude::*;

    #[test]
    fn write_then_read_and_size() {
        let dir = assert_fs::TempDir::new().unwrap();
        let doc = Document::new(dir.path().join("notes.txt"));

        let msg = doc.write("hello world").unwrap();
        assert!(msg.contains("successfully"));
        assert_eq!(doc.read().unwrap(), "hello world");
        assert_eq!(doc.size().unwrap(), 11);
    }

    #[test]
    fn write_truncates_existing_content() {
        let dir = assert_fs::TempDir::new().unwrap();
        let f = dir.child("f.txt");
        f.write_str("a much longer original body").unwrap();
        let doc = Document::new(f.path());
        doc.write("short").unwrap();
        assert_eq!(doc.read().unwrap(), "short");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = assert_fs::TempDir::new().unwrap();
        let doc = Document::new(dir.path().join("missing.txt"));
        assert_eq!(doc.read().unwrap_err().outcome(), Outcome::NotFound);
        assert_eq!(doc.size().unwrap_err().outcome(), Outcome::NotFound);
    }

    #[test]
    fn binary_content_is_not_text() {
        let dir = assert_fs::TempDir::new().unwrap();
        let f = dir.child("blob.bin");
        f.write_binary(&[0xff, 0xfe, 0x00]).unwrap();
        let doc = Document::new(f.path());
        assert_eq!(doc.read().unwrap_err().outcome(), Outcome::InvalidInput);
        assert_eq!(doc.read_bytes().unwrap(), vec![0xff, 0xfe, 0x00]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn reading_a_directory_is_invalid_input() {
        let dir = assert_fs::TempDir::new().unwrap();
        let doc = Document::new(dir.path());
        assert_eq!(doc.read_bytes().unwrap_err().outcome(), Outcome::InvalidInput);
    }
}
