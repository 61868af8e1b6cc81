// src/engine/core.rs

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::{RenderReason, RuntimeEvent, RuntimeOptions};

/// A side effect requested by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Load the plan and render its timeline as of `today`.
    Render { reason: RenderReason, today: NaiveDate },
}

/// Result of feeding one event into the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
    pub keep_running: bool,
}

impl CoreStep {
    fn idle() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }

    fn render(reason: RenderReason, today: NaiveDate) -> Self {
        Self {
            commands: vec![CoreCommand::Render { reason, today }],
            keep_running: true,
        }
    }
}

/// Pure state machine deciding when a timeline must be re-rendered.
///
/// It owns the date timelines are computed for, so every render after a
/// rollover uses the new date.
#[derive(Debug)]
pub struct CoreRuntime {
    today: NaiveDate,
    last_hash: Option<String>,
    rendered: bool,
    options: RuntimeOptions,
}

impl CoreRuntime {
    pub fn new(today: NaiveDate, options: RuntimeOptions) -> Self {
        Self {
            today,
            last_hash: None,
            rendered: false,
            options,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Whether at least one render has been requested.
    pub fn has_rendered(&self) -> bool {
        self.rendered
    }

    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::PlanChanged { content_hash } => self.on_plan_changed(content_hash),
            RuntimeEvent::PlanUnreadable { error } => {
                warn!(%error, "plan file unreadable; keeping previous output");
                CoreStep::idle()
            }
            RuntimeEvent::DayTick { today } => self.on_day_tick(today),
            RuntimeEvent::ShutdownRequested => {
                info!("shutdown requested");
                CoreStep {
                    commands: Vec::new(),
                    keep_running: false,
                }
            }
        }
    }

    fn on_plan_changed(&mut self, content_hash: String) -> CoreStep {
        if self.options.use_hash && self.last_hash.as_deref() == Some(content_hash.as_str()) {
            debug!(hash = %content_hash, "plan content unchanged; skipping render");
            return CoreStep::idle();
        }

        let reason = if self.rendered {
            RenderReason::PlanChanged
        } else {
            RenderReason::Initial
        };
        self.last_hash = Some(content_hash);
        self.rendered = true;
        CoreStep::render(reason, self.today)
    }

    fn on_day_tick(&mut self, today: NaiveDate) -> CoreStep {
        if today == self.today {
            return CoreStep::idle();
        }

        info!(from = %self.today, to = %today, "calendar day rolled over");
        self.today = today;

        // Nothing to refresh until the plan has been rendered once.
        if self.rendered {
            CoreStep::render(RenderReason::DayRollover, today)
        } else {
            CoreStep::idle()
        }
    }
}
