//! Config validation logic.
//! Verifies the managed root and the log file location before the session starts.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error};

use super::paths::path_has_symlink_ancestor;
use super::types::Config;

impl Config {
    /// Validate the configured root (if any) and log file location.
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = &self.root {
            ensure_dir_exists_and_is_dir(root, "root")?;
            ensure_readable(root, "root")?;
        }
        if let Some(log_file) = &self.log_file
            && log_file.is_dir()
        {
            bail!("log_file points at a directory: {}", log_file.display());
        }
        if let Some(log_file) = &self.log_file
            && path_has_symlink_ancestor(log_file).unwrap_or(false)
        {
            debug!(path = %log_file.display(), "log file has a symlinked ancestor; file logging will be refused");
        }
        Ok(())
    }
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        error!("{name} does not exist: {}", path.display());
        bail!("{name} does not exist: {}", path.display());
    }
    if !path.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).with_context(|| {
        format!("Cannot read {name} directory '{}'; check permissions", path.display())
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}
