//! XML configuration support.
//!
//! Uses quick-xml + serde to parse an optional <config> file:
//! <config>
//!   <root>/path/to/manage</root>
//!   <max_attempts>10</max_attempts>
//!   <log_level>quiet</log_level>
//!   <log_file>/path/to/fms_errors.log</log_file>
//!   <verbose>false</verbose>
//! </config>
//!
//! Notes:
//! - The file is never created by us; a missing file means defaults.
//! - Unknown fields and unparsable values are errors, surfaced at startup.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "root")]
    root: Option<String>,
    #[serde(rename = "max_attempts", default, deserialize_with = "de_u32_trimmed_opt")]
    max_attempts: Option<u32>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "verbose")]
    verbose: Option<bool>,
}

// Trims surrounding whitespace; empty means "not set", garbage is an error.
fn de_u32_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<u32>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("max_attempts must be a non-negative integer, got '{s}'"))),
    }
}

fn non_empty_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim).filter(|t| !t.is_empty()).map(PathBuf::from)
}

/// Map XmlConfig onto defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(root) = non_empty_path(parsed.root.as_deref()) {
        cfg.root = Some(root);
    }
    if let Some(n) = parsed.max_attempts {
        cfg.max_attempts = n;
    }
    if let Some(s) = parsed.log_level.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        match LogLevel::parse(s) {
            Some(level) => cfg.log_level = level,
            None => bail!("invalid log_level '{s}'; expected quiet, normal, info or debug"),
        }
    }
    if let Some(log_file) = non_empty_path(parsed.log_file.as_deref()) {
        cfg.log_file = Some(log_file);
    }
    if let Some(v) = parsed.verbose {
        cfg.verbose = v;
    }
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid config xml '{}'", path.display()))
}

/// Load the config from `$FMS_CONFIG` or the default location.
/// Ok(None) when no file exists there.
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }
    debug!(path = %path.display(), "loading config");
    load_config_from_xml_path(&path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn full_config_is_read() {
        let dir = assert_fs::TempDir::new().unwrap();
        let cfg_file = dir.child("config.xml");
        cfg_file
            .write_str(
                "<config>\n  <root>/srv/share</root>\n  <max_attempts> 3 </max_attempts>\n  <log_level>debug</log_level>\n  <log_file>/var/log/fms.log</log_file>\n  <verbose>true</verbose>\n</config>\n",
            )
            .unwrap();

        let cfg = load_config_from_xml_path(cfg_file.path()).unwrap();
        assert_eq!(cfg.root, Some(PathBuf::from("/srv/share")));
        assert_eq!(cfg.max_attempts, 3);
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/var/log/fms.log")));
        assert!(cfg.verbose);
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let dir = assert_fs::TempDir::new().unwrap();
        let cfg_file = dir.child("config.xml");
        cfg_file.write_str("<config><max_attempts>4</max_attempts></config>").unwrap();

        let cfg = load_config_from_xml_path(cfg_file.path()).unwrap();
        assert_eq!(cfg.max_attempts, 4);
        assert_eq!(cfg.log_level, LogLevel::Quiet);
        assert!(cfg.root.is_none());
        assert!(!cfg.verbose);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let dir = assert_fs::TempDir::new().unwrap();
        let cfg_file = dir.child("config.xml");
        cfg_file.write_str("<config><colour>blue</colour></config>").unwrap();
        assert!(load_config_from_xml_path(cfg_file.path()).is_err());
    }

    #[test]
    fn negative_max_attempts_is_rejected() {
        let dir = assert_fs::TempDir::new().unwrap();
        let cfg_file = dir.child("config.xml");
        cfg_file.write_str("<config><max_attempts>-2</max_attempts></config>").unwrap();
        let err = load_config_from_xml_path(cfg_file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("max_attempts"), "err: {err:#}");
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let dir = assert_fs::TempDir::new().unwrap();
        let cfg_file = dir.child("config.xml");
        cfg_file.write_str("<config><log_level>shouty</log_level></config>").unwrap();
        assert!(load_config_from_xml_path(cfg_file.path()).is_err());
    }
}
