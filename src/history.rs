// src/history.rs

//! Searching, ordering and summarising saved plans.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::plan::Plan;
use crate::types::{SortBy, SortOrder};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Search and ordering applied to a history listing.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// Case-insensitive substring matched against title and goal.
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl HistoryQuery {
    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(|q| q.to_lowercase())
    }
}

/// One plan as shown in a listing.
#[derive(Debug, Clone)]
pub struct HistoryEntry<'a> {
    pub plan: &'a Plan,
    pub total_days: i64,
    /// `None` when `createdAt` cannot be parsed.
    pub age: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HistoryListing<'a> {
    pub entries: Vec<HistoryEntry<'a>>,
    /// Number of plans before filtering.
    pub total: usize,
}

impl HistoryListing<'_> {
    pub fn count_label(&self) -> String {
        count_label(self.entries.len(), self.total)
    }
}

/// Filter by `query.search`, then stable-sort by `query.sort_by`.
pub fn filter_and_sort<'a>(plans: &'a [Plan], query: &HistoryQuery) -> Vec<&'a Plan> {
    let mut selected: Vec<&Plan> = match query.needle() {
        Some(needle) => plans
            .iter()
            .filter(|plan| matches_search(plan, &needle))
            .collect(),
        None => plans.iter().collect(),
    };

    selected.sort_by(|a, b| {
        let ordering = compare_plans(a, b, query.sort_by);
        match query.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    selected
}

pub fn build_listing<'a>(
    plans: &'a [Plan],
    query: &HistoryQuery,
    now: DateTime<Utc>,
) -> HistoryListing<'a> {
    let entries: Vec<HistoryEntry<'a>> = filter_and_sort(plans, query)
        .into_iter()
        .map(|plan| HistoryEntry {
            plan,
            total_days: plan_total_days(plan),
            age: plan.created_at_utc().map(|created| relative_age(created, now)),
        })
        .collect();

    debug!(
        shown = entries.len(),
        total = plans.len(),
        sort_by = ?query.sort_by,
        order = ?query.order,
        "built history listing"
    );

    HistoryListing {
        entries,
        total: plans.len(),
    }
}

/// Sum of the tasks' estimated days.
pub fn plan_total_days(plan: &Plan) -> i64 {
    plan.tasks.iter().map(|t| t.estimated_days()).sum()
}

/// Human-friendly age of a plan, e.g. `Yesterday` or `3 weeks ago`.
///
/// The difference is measured in whole days rounded up, in either direction.
pub fn relative_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - created).num_milliseconds().abs();
    let days = (diff_ms + DAY_MS - 1) / DAY_MS;

    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{d} days ago"),
        d if d < 30 => plural_ago(ceil_div(d, 7), "week"),
        d if d < 365 => plural_ago(ceil_div(d, 30), "month"),
        _ => created.format("%b %-d, %Y").to_string(),
    }
}

/// `N plans` when nothing is filtered out, `M of N plans` otherwise.
pub fn count_label(shown: usize, total: usize) -> String {
    if shown == total {
        format!("{total} plan{}", if total == 1 { "" } else { "s" })
    } else {
        format!("{shown} of {total} plans")
    }
}

fn matches_search(plan: &Plan, needle: &str) -> bool {
    plan.title
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains(needle))
        || plan.goal.to_lowercase().contains(needle)
}

fn compare_plans(a: &Plan, b: &Plan, sort_by: SortBy) -> Ordering {
    match sort_by {
        // Unparsable timestamps compare as the oldest.
        SortBy::Date => a.created_at_utc().cmp(&b.created_at_utc()),
        SortBy::Title => title_key(a).cmp(&title_key(b)),
        SortBy::Tasks => a.tasks.len().cmp(&b.tasks.len()),
    }
}

fn title_key(plan: &Plan) -> String {
    match plan.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_lowercase(),
        _ => plan.goal.to_lowercase(),
    }
}

fn ceil_div(n: i64, d: i64) -> i64 {
    (n + d - 1) / d
}

fn plural_ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
