#![allow(dead_code)]

use taskplanner::config::{ConfigFile, RawConfigFile};
use taskplanner::plan::{Plan, Task};
use taskplanner::types::{OutputFormat, SortBy, SortOrder};

/// Builder for `Task`.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    /// A task with no duration fields set.
    pub fn new(name: &str) -> Self {
        Self {
            task: Task {
                name: name.to_string(),
                duration_days: None,
                duration: None,
                depends_on: vec![],
            },
        }
    }

    pub fn days(mut self, days: i64) -> Self {
        self.task.duration_days = Some(days);
        self
    }

    /// Set the generic `duration` field.
    pub fn duration(mut self, days: i64) -> Self {
        self.task.duration = Some(days);
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.depends_on.push(dep.to_string());
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for `Plan`.
pub struct PlanBuilder {
    plan: Plan,
}

impl PlanBuilder {
    pub fn new(goal: &str) -> Self {
        Self {
            plan: Plan {
                goal: goal.to_string(),
                ..Plan::default()
            },
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.plan.id = id.to_string();
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.plan.title = Some(title.to_string());
        self
    }

    pub fn created_at(mut self, created_at: &str) -> Self {
        self.plan.created_at = created_at.to_string();
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.plan.tasks.push(task);
        self
    }

    pub fn build(self) -> Plan {
        self.plan
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.config.format = format;
        self
    }

    pub fn date_format(mut self, fmt: &str) -> Self {
        self.config.config.date_format = fmt.to_string();
        self
    }

    pub fn history_sort(mut self, sort_by: SortBy, order: SortOrder) -> Self {
        self.config.history.sort_by = sort_by;
        self.config.history.sort_order = order;
        self
    }

    pub fn preview_tasks(mut self, n: usize) -> Self {
        self.config.history.preview_tasks = n;
        self
    }

    pub fn use_hash(mut self, val: bool) -> Self {
        self.config.watch.use_hash = val;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
