// src/timeline/mod.rs

//! Calendar layout of a plan's tasks.
//!
//! - [`scheduler`] places tasks on dates using the dependency-count ordering.
//! - [`summary`] derives total duration and completion date.
//! - [`palette`] maps processing positions to display colours.

pub mod palette;
pub mod scheduler;
pub mod summary;

use chrono::NaiveDate;
use serde::Serialize;

use crate::plan::Task;

pub use palette::{color_for, PaletteColor, PALETTE, PALETTE_SIZE};
pub use scheduler::{processing_order, schedule, ScheduledTask};
pub use summary::TimelineSummary;

/// Scheduled tasks plus their summary, computed for one reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub today: NaiveDate,
    pub tasks: Vec<ScheduledTask>,
    pub summary: TimelineSummary,
}

impl Timeline {
    pub fn build(tasks: &[Task], today: NaiveDate) -> Self {
        let tasks = schedule(tasks, today);
        let summary = TimelineSummary::from_scheduled(&tasks, today);
        Self {
            today,
            tasks,
            summary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
