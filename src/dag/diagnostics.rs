// src/dag/diagnostics.rs

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::dag::graph::PlanGraph;
use crate::plan::{Task, DEFAULT_DURATION_DAYS};
use crate::timeline::processing_order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// Something the scheduler will silently work around.
///
/// None of these stop a timeline from being built; they explain why a task
/// lands where it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// `depends_on` names a task that is not in the plan.
    UnknownDependency { task: String, dependency: String },
    /// The dependency exists but is placed at or after this task, so its end
    /// date is not known yet and it is ignored.
    ForwardReference { task: String, dependency: String },
    SelfDependency { task: String },
    DuplicateName { name: String, occurrences: usize },
    /// The dependencies among known tasks contain a cycle through `task`.
    Cycle { task: String },
    /// No usable positive duration; the default was used.
    DefaultedDuration { task: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::DefaultedDuration { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownDependency { task, dependency } => write!(
                f,
                "task '{task}' depends on unknown task '{dependency}'; ignored"
            ),
            Diagnostic::ForwardReference { task, dependency } => write!(
                f,
                "task '{task}' depends on '{dependency}', which is placed later; ignored"
            ),
            Diagnostic::SelfDependency { task } => {
                write!(f, "task '{task}' depends on itself")
            }
            Diagnostic::DuplicateName { name, occurrences } => write!(
                f,
                "task name '{name}' appears {occurrences} times; the last one wins"
            ),
            Diagnostic::Cycle { task } => {
                write!(f, "dependency cycle involving task '{task}'")
            }
            Diagnostic::DefaultedDuration { task } => write!(
                f,
                "task '{task}' has no positive duration; using {DEFAULT_DURATION_DAYS} day"
            ),
        }
    }
}

/// Lint a plan's task list.
///
/// Walks tasks in the scheduler's processing order so that forward references
/// are reported exactly where the scheduler drops them.
pub fn diagnose(tasks: &[Task]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for task in tasks {
        let count = occurrences.entry(task.name.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(task.name.as_str());
        }
        *count += 1;
    }
    for name in &first_seen {
        let count = occurrences[name];
        if count > 1 {
            diagnostics.push(Diagnostic::DuplicateName {
                name: name.to_string(),
                occurrences: count,
            });
        }
    }

    let mut placed: HashSet<&str> = HashSet::new();
    for task in processing_order(tasks) {
        let mut seen_deps: HashSet<&str> = HashSet::new();
        for dep in &task.depends_on {
            if !seen_deps.insert(dep.as_str()) {
                continue;
            }
            if *dep == task.name {
                diagnostics.push(Diagnostic::SelfDependency {
                    task: task.name.clone(),
                });
            } else if !occurrences.contains_key(dep.as_str()) {
                diagnostics.push(Diagnostic::UnknownDependency {
                    task: task.name.clone(),
                    dependency: dep.clone(),
                });
            } else if !placed.contains(dep.as_str()) {
                diagnostics.push(Diagnostic::ForwardReference {
                    task: task.name.clone(),
                    dependency: dep.clone(),
                });
            }
        }

        if task.declared_duration().is_none() {
            diagnostics.push(Diagnostic::DefaultedDuration {
                task: task.name.clone(),
            });
        }

        placed.insert(task.name.as_str());
    }

    if let Some(task) = find_cycle(&PlanGraph::from_tasks(tasks)) {
        diagnostics.push(Diagnostic::Cycle { task });
    }

    debug!(count = diagnostics.len(), "plan diagnostics complete");
    diagnostics
}

/// Return a task on a dependency cycle, ignoring self-edges (those are
/// reported separately).
fn find_cycle(graph: &PlanGraph) -> Option<String> {
    // Edge direction: dep -> task
    let mut dag: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in graph.tasks() {
        dag.add_node(name);
    }
    for name in graph.tasks() {
        for dep in graph.dependencies_of(name) {
            if dep != name {
                dag.add_edge(dep.as_str(), name, ());
            }
        }
    }

    match toposort(&dag, None) {
        Ok(_order) => None,
        Err(cycle) => Some(cycle.node_id().to_string()),
    }
}

/// Emit diagnostics through `tracing`: warnings at `warn`, the rest at `debug`.
pub fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        if diagnostic.is_warning() {
            warn!(%diagnostic, "plan diagnostic");
        } else {
            debug!(%diagnostic, "plan diagnostic");
        }
    }
}
