// src/engine/runtime.rs

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::dag::{diagnose, log_diagnostics};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::plan::load_plan;
use crate::render::Renderer;
use crate::timeline::Timeline;

use super::core::CoreRuntime;
use super::{CoreCommand, RenderReason, RuntimeEvent};

/// Drives the core in response to `RuntimeEvent`s and performs the renders
/// it requests.
///
/// This is a pure IO shell around `CoreRuntime`: it reads events from a
/// channel, loads the plan through a [`FileSystem`] and writes to `out`.
pub struct Runtime<W: Write + Send> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    fs: Arc<dyn FileSystem>,
    plan_path: PathBuf,
    renderer: Renderer,
    out: W,
}

impl<W: Write + Send> fmt::Debug for Runtime<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("plan_path", &self.plan_path)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send> Runtime<W> {
    pub fn new(
        core: CoreRuntime,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        fs: Arc<dyn FileSystem>,
        plan_path: impl Into<PathBuf>,
        renderer: Renderer,
        out: W,
    ) -> Self {
        Self {
            core,
            event_rx,
            fs,
            plan_path: plan_path.into(),
            renderer,
            out,
        }
    }

    /// Main event loop. Returns the output sink once the loop ends.
    pub async fn run(mut self) -> Result<W> {
        info!(plan = ?self.plan_path, "taskplanner watch runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command)?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        Ok(self.out)
    }

    fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::Render { reason, today } => self.render(reason, today),
        }
    }

    fn render(&mut self, reason: RenderReason, today: chrono::NaiveDate) -> Result<()> {
        // A plan that fails to parse mid-edit must not stop the watch loop.
        let plan = match load_plan(self.fs.as_ref(), &self.plan_path) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(plan = ?self.plan_path, error = %err, "failed to load plan; skipping render");
                return Ok(());
            }
        };

        log_diagnostics(&diagnose(&plan.tasks));

        let timeline = Timeline::build(&plan.tasks, today);
        info!(
            ?reason,
            %today,
            tasks = timeline.tasks.len(),
            total_days = timeline.summary.total_days,
            "rendering timeline"
        );

        self.renderer
            .render_timeline(&plan, &timeline, &mut self.out)
    }
}
