// src/render.rs

//! Writing timelines, diagnostics and history listings.
//!
//! Everything here writes to a caller-supplied `Write` so stdout stays the
//! only place rendered output goes, and tests can capture it.

use std::fmt::Write as _;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::dag::{Diagnostic, PlanGraph, Severity};
use crate::errors::{PlannerError, Result};
use crate::gantt::to_gantt;
use crate::history::HistoryListing;
use crate::plan::Plan;
use crate::timeline::{ScheduledTask, Timeline, TimelineSummary};
use crate::types::OutputFormat;

const EMPTY_TIMELINE: &str = "No tasks generated yet. Create a plan to see your timeline!";

/// Renders timelines in one output format.
#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    date_format: String,
}

impl Renderer {
    /// `date_format` must already be validated (see `config::validate`).
    pub fn new(format: OutputFormat, date_format: impl Into<String>) -> Self {
        Self {
            format,
            date_format: date_format.into(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn render_timeline(
        &self,
        plan: &Plan,
        timeline: &Timeline,
        out: &mut dyn Write,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text(plan, timeline, out)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &TimelineDocument::new(plan, timeline))?;
                writeln!(out)?;
            }
            OutputFormat::Gantt => {
                serde_json::to_writer_pretty(&mut *out, &to_gantt(timeline))?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    fn date(&self, date: NaiveDate) -> Result<String> {
        let mut formatted = String::new();
        write!(formatted, "{}", date.format(&self.date_format)).map_err(|_| {
            PlannerError::ConfigError(format!(
                "date_format {:?} cannot format a calendar date",
                self.date_format
            ))
        })?;
        Ok(formatted)
    }

    fn write_text(&self, plan: &Plan, timeline: &Timeline, out: &mut dyn Write) -> Result<()> {
        if timeline.is_empty() {
            writeln!(out, "{EMPTY_TIMELINE}")?;
            return Ok(());
        }

        let title = plan.display_title();
        if title.trim().is_empty() {
            writeln!(out, "Project Timeline")?;
        } else {
            writeln!(out, "Project Timeline: {title}")?;
        }

        let summary = &timeline.summary;
        let mut header = format!(
            "{} tasks scheduled | Total days: {}",
            summary.task_count, summary.total_days
        );
        if let Some(end) = summary.project_end_date {
            header.push_str(&format!(" | Completion: {}", self.date(end)?));
        }
        writeln!(out, "{header}")?;
        writeln!(out)?;

        let name_width = timeline
            .tasks
            .iter()
            .map(|t| t.name().chars().count())
            .max()
            .unwrap_or(0);

        for (index, task) in timeline.tasks.iter().enumerate() {
            self.write_task_line(index, task, name_width, timeline.today, out)?;
        }

        writeln!(out)?;
        writeln!(out, "{}", self.footer(summary)?)?;
        Ok(())
    }

    fn write_task_line(
        &self,
        index: usize,
        task: &ScheduledTask,
        name_width: usize,
        today: NaiveDate,
        out: &mut dyn Write,
    ) -> Result<()> {
        writeln!(
            out,
            "{:>3}. {:<name_width$}  {:>8}  {} - {}  starts in {} days  [{}]",
            index + 1,
            task.name(),
            days_label(task.days),
            self.date(task.start_date)?,
            self.date(task.end_date)?,
            task.starts_in_days(today),
            task.color().name,
        )?;
        if !task.task.depends_on.is_empty() {
            writeln!(out, "     depends on: {}", task.task.depends_on.join(", "))?;
        }
        Ok(())
    }

    fn footer(&self, summary: &TimelineSummary) -> Result<String> {
        let mut footer = format!(
            "Complete all {} tasks in {} days",
            summary.task_count, summary.total_days
        );
        if let Some(end) = summary.project_end_date {
            footer.push_str(&format!(". Estimated completion: {}", self.date(end)?));
        }
        Ok(footer)
    }
}

/// JSON shape of a rendered timeline.
#[derive(Debug, Serialize)]
struct TimelineDocument<'a> {
    title: &'a str,
    goal: &'a str,
    today: NaiveDate,
    tasks: Vec<TaskView<'a>>,
    summary: &'a TimelineSummary,
}

#[derive(Debug, Serialize)]
struct TaskView<'a> {
    #[serde(flatten)]
    task: &'a ScheduledTask,
    color: &'static str,
    color_name: &'static str,
    starts_in_days: i64,
}

impl<'a> TimelineDocument<'a> {
    fn new(plan: &'a Plan, timeline: &'a Timeline) -> Self {
        Self {
            title: plan.display_title(),
            goal: &plan.goal,
            today: timeline.today,
            tasks: timeline
                .tasks
                .iter()
                .map(|task| TaskView {
                    task,
                    color: task.color().hex,
                    color_name: task.color().name,
                    starts_in_days: task.starts_in_days(timeline.today),
                })
                .collect(),
            summary: &timeline.summary,
        }
    }
}

/// Output of `taskplanner check`.
pub fn render_check(
    graph: &PlanGraph,
    diagnostics: &[Diagnostic],
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(
        out,
        "{} tasks, {} dependency edges",
        graph.len(),
        graph.edge_count()
    )?;
    if graph.is_empty() {
        writeln!(out, "  plan has no tasks")?;
    } else {
        writeln!(out, "  roots: {}", graph.roots().join(", "))?;
        writeln!(out, "  leaves: {}", graph.leaves().join(", "))?;
    }

    if diagnostics.is_empty() {
        writeln!(out, "no issues found")?;
    } else {
        writeln!(out)?;
        for diagnostic in diagnostics {
            let tag = match diagnostic.severity() {
                Severity::Warning => "warning",
                Severity::Info => "info",
            };
            writeln!(out, "{tag}: {diagnostic}")?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Output of `taskplanner history`.
///
/// `preview` limits the tasks shown per plan; `None` shows all of them.
pub fn render_history(
    listing: &HistoryListing<'_>,
    preview: Option<usize>,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "{}", listing.count_label())?;

    if listing.entries.is_empty() {
        if listing.total == 0 {
            writeln!(out, "No plans yet.")?;
        } else {
            writeln!(out, "No plans match your current search criteria.")?;
        }
        out.flush()?;
        return Ok(());
    }

    for (index, entry) in listing.entries.iter().enumerate() {
        let plan = entry.plan;
        let mut line = format!(
            "{:>3}. {} ({} tasks, {} days estimated",
            index + 1,
            plan.display_title(),
            plan.tasks.len(),
            entry.total_days
        );
        if let Some(age) = &entry.age {
            line.push_str(&format!(", {age}"));
        }
        line.push(')');
        writeln!(out, "{line}")?;

        let limit = preview.unwrap_or(plan.tasks.len());
        for task in plan.tasks.iter().take(limit) {
            writeln!(out, "       - {} ({}d)", task.name, task.estimated_days())?;
            if preview.is_none() && !task.depends_on.is_empty() {
                writeln!(out, "         depends on: {}", task.depends_on.join(", "))?;
            }
        }
        if plan.tasks.len() > limit {
            writeln!(out, "       +{} more tasks", plan.tasks.len() - limit)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn days_label(days: u64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}
