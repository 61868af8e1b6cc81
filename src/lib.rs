// src/lib.rs

pub mod cli;
pub mod clock;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod gantt;
pub mod history;
pub mod logging;
pub mod plan;
pub mod render;
pub mod timeline;
pub mod types;
pub mod watch;

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::{CheckArgs, CliArgs, Command, HistoryArgs, TimelineArgs};
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::{resolve_config, ConfigFile};
use crate::dag::{diagnose, log_diagnostics, Diagnostic, PlanGraph};
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent, RuntimeOptions};
use crate::errors::PlannerError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::history::{build_listing, HistoryQuery};
use crate::plan::{load_history, load_plan};
use crate::render::{render_check, render_history, Renderer};
use crate::timeline::Timeline;
use crate::watch::{observe_plan, spawn_day_ticker, spawn_plan_watcher};

/// High-level entry point used by `main.rs`.
///
/// Resolves configuration, then dispatches to the requested subcommand.
/// All rendered output goes to stdout.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref())?;
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    match args.command {
        Command::Timeline(t) => run_timeline(&cfg, fs, t).await,
        Command::Check(c) => {
            run_check(fs.as_ref(), &c, &mut io::stdout().lock())?;
            Ok(())
        }
        Command::History(h) => {
            run_history(&cfg, fs.as_ref(), &SystemClock, &h, &mut io::stdout().lock())?;
            Ok(())
        }
    }
}

async fn run_timeline(cfg: &ConfigFile, fs: Arc<dyn FileSystem>, args: TimelineArgs) -> Result<()> {
    // A pinned `--today` also pins every re-render in watch mode.
    let clock: Arc<dyn Clock> = match args.today {
        Some(date) => Arc::new(FixedClock::at_date(date)),
        None => Arc::new(SystemClock),
    };
    let renderer = Renderer::new(
        args.format.unwrap_or(cfg.config.format),
        cfg.config.date_format.clone(),
    );

    if !args.watch {
        render_once(
            fs.as_ref(),
            &args,
            clock.as_ref(),
            &renderer,
            &mut io::stdout().lock(),
        )?;
        return Ok(());
    }

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let _watcher_handle = spawn_plan_watcher(&args.plan, Arc::clone(&fs), rt_tx.clone())?;

    let _ticker = if args.today.is_none() {
        Some(spawn_day_ticker(
            Arc::clone(&clock),
            Duration::from_secs(cfg.watch.day_check_secs),
            rt_tx.clone(),
        ))
    } else {
        None
    };

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    // Seed the first render from the file as it is now.
    rt_tx.send(observe_plan(fs.as_ref(), &args.plan)).await?;

    let options = RuntimeOptions {
        use_hash: cfg.watch.use_hash,
    };
    let core = CoreRuntime::new(clock.today(), options);
    let runtime = Runtime::new(core, rt_rx, fs, args.plan.clone(), renderer, io::stdout());
    runtime.run().await?;
    Ok(())
}

/// Load, schedule and render a plan once.
pub fn render_once(
    fs: &dyn FileSystem,
    args: &TimelineArgs,
    clock: &dyn Clock,
    renderer: &Renderer,
    out: &mut dyn Write,
) -> errors::Result<Timeline> {
    let plan = load_plan(fs, &args.plan)?;
    log_diagnostics(&diagnose(&plan.tasks));

    let today = clock.today();
    let timeline = Timeline::build(&plan.tasks, today);
    info!(
        %today,
        tasks = timeline.tasks.len(),
        total_days = timeline.summary.total_days,
        "timeline built"
    );

    renderer.render_timeline(&plan, &timeline, out)?;
    Ok(timeline)
}

/// Print plan diagnostics; with `--strict`, any warning is an error.
pub fn run_check(
    fs: &dyn FileSystem,
    args: &CheckArgs,
    out: &mut dyn Write,
) -> errors::Result<Vec<Diagnostic>> {
    let plan = load_plan(fs, &args.plan)?;
    let graph = PlanGraph::from_tasks(&plan.tasks);
    let diagnostics = diagnose(&plan.tasks);

    render_check(&graph, &diagnostics, out)?;

    let warnings = diagnostics.iter().filter(|d| d.is_warning()).count();
    if args.strict && warnings > 0 {
        return Err(PlannerError::PlanRejected(warnings));
    }
    Ok(diagnostics)
}

/// Search, sort and print a history document.
pub fn run_history(
    cfg: &ConfigFile,
    fs: &dyn FileSystem,
    clock: &dyn Clock,
    args: &HistoryArgs,
    out: &mut dyn Write,
) -> errors::Result<()> {
    let plans = load_history(fs, &args.file)?;

    let query = HistoryQuery {
        search: args.search.clone(),
        sort_by: args.sort_by.unwrap_or(cfg.history.sort_by),
        order: args.order.unwrap_or(cfg.history.sort_order),
    };
    let preview = if args.expand {
        None
    } else {
        Some(cfg.history.preview_tasks)
    };

    let listing = build_listing(&plans, &query, clock.now());
    render_history(&listing, preview, out)
}
