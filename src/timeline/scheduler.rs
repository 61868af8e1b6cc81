// src/timeline/scheduler.rs

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::{debug, trace};

use crate::plan::Task;
use crate::timeline::palette::{color_for, PaletteColor, PALETTE_SIZE};

/// A task placed on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledTask {
    #[serde(flatten)]
    pub task: Task,
    pub start_date: NaiveDate,
    /// Inclusive: `start_date + days - 1`.
    pub end_date: NaiveDate,
    /// Effective duration used for placement.
    pub days: u64,
    /// Position in processing order modulo the palette size.
    pub color_index: usize,
    /// Number of declared dependencies (not a graph depth).
    pub level: usize,
}

impl ScheduledTask {
    pub fn name(&self) -> &str {
        &self.task.name
    }

    pub fn color(&self) -> &'static PaletteColor {
        color_for(self.color_index)
    }

    /// Whole days from `today` until the task starts, never negative.
    pub fn starts_in_days(&self, today: NaiveDate) -> i64 {
        (self.start_date - today).num_days().max(0)
    }
}

/// Order in which tasks are placed: a stable sort by number of declared
/// dependencies.
///
/// This is not a topological order. A task whose dependency sorts at or after
/// it finds no recorded end date for that dependency and ignores it.
pub fn processing_order(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|task| task.depends_on.len());
    ordered
}

/// Place every task on the calendar relative to `today`.
///
/// Each task starts on `today`, or on the day after the latest end date among
/// its dependencies that have already been placed. Unknown and not-yet-placed
/// dependencies are skipped. Output follows [`processing_order`].
pub fn schedule(tasks: &[Task], today: NaiveDate) -> Vec<ScheduledTask> {
    let mut completion: HashMap<&str, NaiveDate> = HashMap::with_capacity(tasks.len());
    let mut scheduled = Vec::with_capacity(tasks.len());

    for (index, task) in processing_order(tasks).into_iter().enumerate() {
        let latest_dependency_end = task
            .depends_on
            .iter()
            .filter_map(|dep| completion.get(dep.as_str()).copied())
            .max();

        let start_date = match latest_dependency_end {
            Some(end) => add_days(end, 1),
            None => today,
        };
        let days = task.effective_duration_days();
        let end_date = add_days(start_date, days - 1);

        trace!(
            task = %task.name,
            %start_date,
            %end_date,
            days,
            "placed task"
        );

        // Duplicate names: the later placement wins for later dependents.
        completion.insert(task.name.as_str(), end_date);

        scheduled.push(ScheduledTask {
            task: task.clone(),
            start_date,
            end_date,
            days,
            color_index: index % PALETTE_SIZE,
            level: task.depends_on.len(),
        });
    }

    debug!(tasks = scheduled.len(), %today, "scheduled timeline");
    scheduled
}

/// `date + days`, saturating at the last representable date.
pub(crate) fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}
