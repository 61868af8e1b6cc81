// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::RuntimeEvent;
use crate::fs::FileSystem;
use crate::watch::hash::observe_plan;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Whether a notify event concerns the plan file.
///
/// Editors often save by writing a temporary file and renaming it over the
/// original, so events are matched on file name within the watched
/// directory rather than on the exact path.
pub fn is_plan_event(event: &Event, plan_file_name: &std::ffi::OsStr) -> bool {
    if event.kind.is_access() {
        return false;
    }
    event
        .paths
        .iter()
        .any(|p| p.file_name() == Some(plan_file_name))
}

/// Spawn a filesystem watcher on the directory containing `plan_path` and
/// send a `PlanChanged` (or `PlanUnreadable`) event whenever the plan file is
/// touched.
pub fn spawn_plan_watcher(
    plan_path: impl AsRef<Path>,
    fs: Arc<dyn FileSystem>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let plan_path = plan_path.as_ref().to_path_buf();
    let plan_file_name = plan_path
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or_else(|| anyhow::anyhow!("plan path {:?} has no file name", plan_path))?;
    let dir = watch_dir(&plan_path);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // We can't log via tracing here easily, so fallback to stderr.
                    eprintln!("taskplanner: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("taskplanner: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    info!("watching {:?} for changes", plan_path);

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if !is_plan_event(&event, &plan_file_name) {
                continue;
            }
            debug!(?event, "plan file event");

            let observed = observe_plan(fs.as_ref(), &plan_path);
            if runtime_tx.send(observed).await.is_err() {
                debug!("runtime channel closed; stopping watcher loop");
                break;
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Directory to watch for a plan path.
///
/// A bare file name like `plan.json` has an empty parent; fall back to the
/// current working directory.
fn watch_dir(plan_path: &Path) -> PathBuf {
    match plan_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
