// src/config/mod.rs

//! Configuration loading and validation for taskplanner.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate values serde cannot check on its own (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, resolve_config};
pub use model::{ConfigFile, ConfigSection, HistorySection, RawConfigFile, WatchSection};
