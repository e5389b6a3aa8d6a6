//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fs_ops::CopyConflictPolicy;

use super::paths;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors (the diagnostic log)
    #[default]
    Quiet,
    /// Informational output
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for a file manager session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Managed root; None means the process working directory at startup
    pub root: Option<PathBuf>,
    /// Copy-conflict search bound
    pub max_attempts: u32,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Diagnostic log file
    pub log_file: Option<PathBuf>,
    /// Detailed operation messages
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            max_attempts: CopyConflictPolicy::DEFAULT_MAX_ATTEMPTS,
            log_level: LogLevel::Quiet,
            log_file: paths::default_log_path(),
            verbose: false,
        }
    }
}
