// src/config/validate.rs

use std::fmt::Write as _;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{PlannerError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PlannerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.history, raw.watch))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_date_format(&cfg.config.date_format)?;
    validate_history(cfg)?;
    validate_watch(cfg)?;
    Ok(())
}

fn validate_date_format(fmt: &str) -> Result<()> {
    // format and sort enums are strongly typed and validated during
    // deserialization, so only the free-form pattern is checked here.
    if fmt.trim().is_empty() {
        return Err(PlannerError::ConfigError(
            "[config].date_format must not be empty".to_string(),
        ));
    }

    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(PlannerError::ConfigError(format!(
            "[config].date_format is not a valid strftime pattern: {fmt:?}"
        )));
    }

    // Time and offset specifiers parse fine but cannot be filled from a date.
    let mut sample = String::new();
    if write!(sample, "{}", NaiveDate::MIN.format(fmt)).is_err() {
        return Err(PlannerError::ConfigError(format!(
            "[config].date_format must only use date fields: {fmt:?}"
        )));
    }

    Ok(())
}

fn validate_history(cfg: &RawConfigFile) -> Result<()> {
    if cfg.history.preview_tasks == 0 {
        return Err(PlannerError::ConfigError(
            "[history].preview_tasks must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_watch(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.day_check_secs == 0 {
        return Err(PlannerError::ConfigError(
            "[watch].day_check_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
