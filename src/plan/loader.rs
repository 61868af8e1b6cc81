// src/plan/loader.rs

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::errors::{PlannerError, Result};
use crate::fs::FileSystem;
use crate::plan::model::{HistoryResponse, Plan, Task};

/// On-disk encoding of a plan or history document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(DocumentFormat::Json),
            Some("toml") => Ok(DocumentFormat::Toml),
            _ => Err(PlannerError::PlanError(format!(
                "unsupported plan document {:?} (expected a .json or .toml file)",
                path
            ))),
        }
    }
}

/// Load a single plan.
///
/// JSON documents may be either a full plan object (as returned by the
/// planning service) or a bare array of tasks. TOML documents must be a plan
/// table with `[[plan]]` entries.
pub fn load_plan(fs: &dyn FileSystem, path: &Path) -> Result<Plan> {
    let contents = fs.read_to_string(path)?;
    let plan = parse_plan(&contents, DocumentFormat::from_path(path)?)?;
    debug!(path = ?path, tasks = plan.tasks.len(), "loaded plan");
    Ok(plan)
}

/// Load a history document: `{ "plans": [...] }` or a bare array of plans.
pub fn load_history(fs: &dyn FileSystem, path: &Path) -> Result<Vec<Plan>> {
    let contents = fs.read_to_string(path)?;
    let plans = parse_history(&contents, DocumentFormat::from_path(path)?)?;
    debug!(path = ?path, plans = plans.len(), "loaded plan history");
    Ok(plans)
}

pub fn parse_plan(contents: &str, format: DocumentFormat) -> Result<Plan> {
    match format {
        DocumentFormat::Toml => Ok(toml::from_str(contents)?),
        DocumentFormat::Json => {
            let value: Value = serde_json::from_str(contents)?;
            if value.is_array() {
                Ok(Plan::from_tasks(from_value::<Vec<Task>>(value)?))
            } else {
                from_value(value)
            }
        }
    }
}

pub fn parse_history(contents: &str, format: DocumentFormat) -> Result<Vec<Plan>> {
    match format {
        DocumentFormat::Toml => Ok(toml::from_str::<HistoryResponse>(contents)?.plans),
        DocumentFormat::Json => {
            let value: Value = serde_json::from_str(contents)?;
            if value.is_array() {
                from_value(value)
            } else {
                Ok(from_value::<HistoryResponse>(value)?.plans)
            }
        }
    }
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}
