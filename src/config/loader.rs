// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks the date format and numeric bounds.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the configuration for a run.
///
/// An explicitly requested file must exist. Otherwise `Taskplanner.toml` in
/// the current directory is used if present, and built-in defaults if not.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return load_and_validate(path);
    }

    let path = default_config_path();
    if path.is_file() {
        load_and_validate(&path)
    } else {
        debug!(path = ?path, "no config file found; using defaults");
        Ok(ConfigFile::default())
    }
}

/// Default config location: `Taskplanner.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Taskplanner.toml")
}
