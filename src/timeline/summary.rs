// src/timeline/summary.rs

use chrono::NaiveDate;
use serde::Serialize;

use crate::timeline::scheduler::ScheduledTask;

/// Aggregate figures shown in a timeline header and footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineSummary {
    pub task_count: usize,
    /// Calendar days from `today` through the last end date, inclusive.
    /// Zero for an empty timeline.
    pub total_days: i64,
    /// Latest end date across all tasks.
    pub project_end_date: Option<NaiveDate>,
}

impl TimelineSummary {
    pub fn from_scheduled(tasks: &[ScheduledTask], today: NaiveDate) -> Self {
        let project_end_date = tasks.iter().map(|t| t.end_date).max();
        let total_days = project_end_date
            .map(|end| (end - today).num_days() + 1)
            .unwrap_or(0);

        Self {
            task_count: tasks.len(),
            total_days,
            project_end_date,
        }
    }
}
