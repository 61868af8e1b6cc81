// src/plan/model.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Duration used when a task carries no usable positive duration.
pub const DEFAULT_DURATION_DAYS: u64 = 1;

/// A single task as produced by the planning service.
///
/// Wire form:
///
/// ```json
/// { "task": "Write outline", "duration_days": 2, "depends_on": ["Research"] }
/// ```
///
/// `duration` is accepted as an alternative to `duration_days`; the latter
/// wins when both carry a usable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display name, and the key other tasks use in `depends_on`.
    #[serde(rename = "task")]
    pub name: String,

    #[serde(
        default,
        deserialize_with = "lenient_days",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_days: Option<i64>,

    #[serde(
        default,
        deserialize_with = "lenient_days",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<i64>,

    /// Names of tasks that must finish before this one starts.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub depends_on: Vec<String>,
}

impl Task {
    pub fn new(name: impl Into<String>, duration_days: i64) -> Self {
        Self {
            name: name.into(),
            duration_days: Some(duration_days),
            duration: None,
            depends_on: Vec::new(),
        }
    }

    pub fn depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(deps.into_iter().map(Into::into));
        self
    }

    /// First positive value of `duration_days`, then `duration`.
    pub fn declared_duration(&self) -> Option<u64> {
        self.duration_days
            .filter(|d| *d > 0)
            .or(self.duration.filter(|d| *d > 0))
            .map(|d| d as u64)
    }

    /// Number of calendar days the task occupies on a timeline.
    pub fn effective_duration_days(&self) -> u64 {
        self.declared_duration().unwrap_or(DEFAULT_DURATION_DAYS)
    }

    /// Estimate shown in history listings: the first non-zero duration
    /// field, or zero. Unlike the timeline there is no 1-day floor.
    pub fn estimated_days(&self) -> i64 {
        self.duration_days
            .filter(|d| *d != 0)
            .or(self.duration.filter(|d| *d != 0))
            .unwrap_or(0)
    }
}

/// A goal plus its breakdown into tasks.
///
/// Plans are owned by the planning service; this crate only reads them.
/// Every field except the task list is optional on input so that hand-written
/// plan files stay short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Plan {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub goal: String,

    #[serde(default, rename = "plan")]
    pub tasks: Vec<Task>,

    #[serde(default, rename = "createdAt")]
    pub created_at: String,
}

impl Plan {
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    /// Title if present and non-blank, otherwise the goal text.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.goal,
        }
    }

    /// Parse `createdAt`.
    ///
    /// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC) or a
    /// bare `YYYY-MM-DD`. Returns `None` for anything else.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// Body of the planning service's history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HistoryResponse {
    #[serde(default)]
    pub plans: Vec<Plan>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDays {
    Whole(i64),
    Fractional(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Accept integers, floats (truncated) and numeric strings; anything else is
/// treated as absent so the task falls back to its default duration.
fn lenient_days<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawDays::deserialize(deserializer)? {
        RawDays::Whole(n) => Some(n),
        RawDays::Fractional(f) if f.is_finite() => Some(f.trunc() as i64),
        RawDays::Text(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        RawDays::Fractional(_) | RawDays::Other(_) => None,
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
