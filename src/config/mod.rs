//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FMS_CONFIG";
/// Directory name used under the platform config/data dirs.
pub const APP_DIR: &str = "file_manager";
/// File name of the diagnostic log.
pub const LOG_FILE_NAME: &str = "fms_errors.log";
