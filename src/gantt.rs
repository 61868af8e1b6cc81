// src/gantt.rs

//! Gantt chart export.
//!
//! Bars use the dates computed by the timeline scheduler, so a Gantt view and
//! the text timeline always agree.

use serde::Serialize;

use crate::timeline::Timeline;

const GANTT_DATE_FORMAT: &str = "%Y-%m-%d";

/// One bar of a Gantt chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttTask {
    /// Position in processing order, as a string.
    pub id: String,
    pub name: String,
    /// `YYYY-MM-DD`, inclusive.
    pub start: String,
    /// `YYYY-MM-DD`, inclusive.
    pub end: String,
    /// Percent complete. Plans carry no progress, so this is always zero.
    pub progress: u8,
}

pub fn to_gantt(timeline: &Timeline) -> Vec<GanttTask> {
    timeline
        .tasks
        .iter()
        .enumerate()
        .map(|(index, task)| GanttTask {
            id: index.to_string(),
            name: task.name().to_string(),
            start: task.start_date.format(GANTT_DATE_FORMAT).to_string(),
            end: task.end_date.format(GANTT_DATE_FORMAT).to_string(),
            progress: 0,
        })
        .collect()
}
