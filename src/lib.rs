//! Core library for `file_manager`.
//!
//! Manages the entries of a single directory: create, delete, rename, move
//! and copy files and directories, with collision-free copy naming and a
//! cached snapshot of the directory kept in step with every change.
//!
//! Every operation returns an `OperationResult` instead of an error; failures
//! are logged through `tracing` and folded into an `Outcome`.

pub mod cli;
pub mod config;
pub mod document;
pub mod errors;
pub mod fs_ops;
pub mod manager;
pub mod menu;
pub mod outcome;
pub mod output;
pub mod platform;
pub mod sanitize;
pub mod shutdown;
pub mod snapshot;

pub use config::{
    default_config_path, default_log_path, load_config, load_config_from_xml_path,
    path_has_symlink_ancestor, Config, LogLevel,
};
pub use document::Document;
pub use errors::FmError;
pub use fs_ops::{CopyConflictPolicy, EntryKind};
pub use manager::FileManager;
pub use outcome::{OperationResult, Outcome};
pub use sanitize::sanitize;
pub use snapshot::DirectorySnapshot;
