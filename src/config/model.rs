// src/config/model.rs

use serde::Deserialize;

use crate::types::{OutputFormat, SortBy, SortOrder};

/// Configuration as read from `Taskplanner.toml`, before validation.
///
/// ```toml
/// [config]
/// format = "text"
/// date_format = "%Y-%m-%d"
///
/// [history]
/// sort_by = "date"
/// sort_order = "desc"
/// preview_tasks = 3
///
/// [watch]
/// use_hash = true
/// day_check_secs = 60
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub history: HistorySection,

    #[serde(default)]
    pub watch: WatchSection,
}

/// Validated configuration. Build one through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub history: HistorySection,
    pub watch: WatchSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        history: HistorySection,
        watch: WatchSection,
    ) -> Self {
        Self {
            config,
            history,
            watch,
        }
    }
}

/// `[config]` section: timeline output.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Output format used when `--format` is not given.
    #[serde(default)]
    pub format: OutputFormat,

    /// `chrono` strftime pattern for dates in text output.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            date_format: default_date_format(),
        }
    }
}

/// `[history]` section: defaults for the history listing.
#[derive(Debug, Clone, Deserialize)]
pub struct HistorySection {
    #[serde(default)]
    pub sort_by: SortBy,

    #[serde(default)]
    pub sort_order: SortOrder,

    /// Number of tasks previewed per plan unless `--expand` is given.
    #[serde(default = "default_preview_tasks")]
    pub preview_tasks: usize,
}

fn default_preview_tasks() -> usize {
    3
}

impl Default for HistorySection {
    fn default() -> Self {
        Self {
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            preview_tasks: default_preview_tasks(),
        }
    }
}

/// `[watch]` section: behaviour of `timeline --watch`.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Skip re-rendering when the plan file's content hash is unchanged.
    #[serde(default = "default_use_hash")]
    pub use_hash: bool,

    /// How often to check whether the calendar day has rolled over.
    #[serde(default = "default_day_check_secs")]
    pub day_check_secs: u64,
}

fn default_use_hash() -> bool {
    true
}

fn default_day_check_secs() -> u64 {
    60
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            use_hash: default_use_hash(),
            day_check_secs: default_day_check_secs(),
        }
    }
}
