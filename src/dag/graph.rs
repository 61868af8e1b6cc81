// src/dag/graph.rs

use std::collections::HashMap;

use crate::plan::Task;

/// Internal node structure: stores immediate deps and dependents.
#[derive(Debug, Clone, Default)]
struct PlanNode {
    /// Declared dependencies that name a task in the plan.
    deps: Vec<String>,
    /// Tasks that declare this one as a dependency.
    dependents: Vec<String>,
}

/// Dependency graph over the tasks of one plan, keyed by task name.
///
/// Only edges between tasks that exist in the plan are kept; unknown
/// dependency names are dropped here and reported by
/// [`crate::dag::diagnose`]. When a name occurs more than once the last
/// occurrence defines its dependencies, matching the scheduler's
/// last-write-wins lookup.
#[derive(Debug, Clone)]
pub struct PlanGraph {
    nodes: HashMap<String, PlanNode>,
    /// Task names in first-seen input order.
    order: Vec<String>,
}

impl PlanGraph {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut nodes: HashMap<String, PlanNode> = HashMap::new();
        let mut order = Vec::new();

        // First pass: one node per distinct name.
        for task in tasks {
            if !nodes.contains_key(&task.name) {
                order.push(task.name.clone());
                nodes.insert(task.name.clone(), PlanNode::default());
            }
        }

        // Second pass: known dependencies, last occurrence wins.
        for task in tasks {
            let mut deps: Vec<String> = Vec::new();
            for dep in &task.depends_on {
                if nodes.contains_key(dep) && !deps.contains(dep) {
                    deps.push(dep.clone());
                }
            }
            if let Some(node) = nodes.get_mut(&task.name) {
                node.deps = deps;
            }
        }

        // Third pass: populate dependents based on deps.
        for name in &order {
            let deps = nodes
                .get(name)
                .map(|n| n.deps.clone())
                .unwrap_or_default();

            for dep in deps {
                if let Some(dep_node) = nodes.get_mut(&dep) {
                    dep_node.dependents.push(name.clone());
                }
            }
        }

        Self { nodes, order }
    }

    /// All distinct task names in first-seen order.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Immediate known dependencies of a task.
    pub fn dependencies_of(&self, name: &str) -> &[String] {
        self.nodes
            .get(name)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a task (tasks that list this one in `depends_on`).
    pub fn dependents_of(&self, name: &str) -> &[String] {
        self.nodes
            .get(name)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Tasks with no known dependencies.
    pub fn roots(&self) -> Vec<&str> {
        self.tasks()
            .filter(|name| self.dependencies_of(name).is_empty())
            .collect()
    }

    /// Tasks nothing else depends on.
    pub fn leaves(&self) -> Vec<&str> {
        self.tasks()
            .filter(|name| self.dependents_of(name).is_empty())
            .collect()
    }

    /// Number of known dependency edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.deps.len()).sum()
    }
}
