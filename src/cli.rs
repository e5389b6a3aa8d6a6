//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Flags override values from the XML config.
//! - --debug is a shorthand for --log-level debug and wins over it.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Interactive manager for the entries of one directory.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "Interactive file management for a single directory"
)]
pub struct Args {
    /// Directory to manage (defaults to the current working directory).
    #[arg(long, value_hint = ValueHint::DirPath, help = "Directory to manage (default: current directory)")]
    pub root: Option<PathBuf>,

    /// Upper bound on `_copyN` suffixes tried when a copy target exists.
    #[arg(long, value_name = "N", help = "Maximum copy suffix attempts (default 10)")]
    pub max_attempts: Option<u32>,

    /// Start with verbose operation messages.
    #[arg(short = 'v', long, help = "Start in verbose mode")]
    pub verbose: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_parser = clap::value_parser!(LogLevel), help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Diagnostic log file (defaults to the platform data dir).
    #[arg(long, value_hint = ValueHint::FilePath, help = "Write the diagnostic log to this file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where the config file is looked up (or FMS_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.clone()
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.root {
            cfg.root = Some(root.clone());
        }
        if let Some(n) = self.max_attempts {
            cfg.max_attempts = n;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.verbose {
            cfg.verbose = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
