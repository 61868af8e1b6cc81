// src/types.rs

use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

/// How a timeline is written to stdout.
///
/// - `Text`: human-readable timeline with a summary footer (default).
/// - `Json`: scheduled tasks plus summary as a JSON document.
/// - `Gantt`: JSON array of Gantt bars (`id`, `name`, `start`, `end`, `progress`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Gantt,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "gantt" => Ok(OutputFormat::Gantt),
            other => Err(format!(
                "invalid format: {other} (expected \"text\", \"json\" or \"gantt\")"
            )),
        }
    }
}

/// Key used to order plans in the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Creation timestamp.
    Date,
    /// Title, falling back to the goal text.
    Title,
    /// Number of tasks in the plan.
    Tasks,
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::Date
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortBy::Date),
            "title" => Ok(SortBy::Title),
            "tasks" => Ok(SortBy::Tasks),
            other => Err(format!(
                "invalid sort_by: {other} (expected \"date\", \"title\" or \"tasks\")"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!(
                "invalid sort_order: {other} (expected \"asc\" or \"desc\")"
            )),
        }
    }
}

