// tests/runtime_watch.rs

use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;

use notify::event::{AccessKind, CreateKind, DataChange, EventKind, ModifyKind};
use notify::Event;
use tokio::sync::mpsc;

use taskplanner::cli::LogLevel;
use taskplanner::engine::{
    CoreCommand, CoreRuntime, RenderReason, Runtime, RuntimeEvent, RuntimeOptions,
};
use taskplanner::fs::{FileSystem, MockFileSystem};
use taskplanner::logging::resolve_level;
use taskplanner::render::Renderer;
use taskplanner::types::OutputFormat;
use taskplanner::watch::{compute_content_hash, is_plan_event, observe_plan};
use taskplanner_test_utils::capture::SharedBuffer;
use taskplanner_test_utils::{date, init_tracing, with_timeout};

const PLAN_PATH: &str = "/plans/blog.json";

const PLAN_V1: &str = r#"[
  { "task": "Research", "duration_days": 2 },
  { "task": "Draft", "duration_days": 3, "depends_on": ["Research"] }
]"#;

const PLAN_V2: &str = r#"[
  { "task": "Research", "duration_days": 4 }
]"#;

fn changed(hash: &str) -> RuntimeEvent {
    RuntimeEvent::PlanChanged {
        content_hash: hash.to_string(),
    }
}

fn render_reasons(core: &mut CoreRuntime, event: RuntimeEvent) -> Vec<RenderReason> {
    core.step(event)
        .commands
        .into_iter()
        .map(|c| match c {
            CoreCommand::Render { reason, .. } => reason,
        })
        .collect()
}

#[test]
fn first_change_is_initial_render() {
    let mut core = CoreRuntime::new(date(2024, 1, 1), RuntimeOptions::default());
    assert!(!core.has_rendered());

    let step = core.step(changed("aaa"));

    assert!(step.keep_running);
    assert_eq!(
        step.commands,
        vec![CoreCommand::Render {
            reason: RenderReason::Initial,
            today: date(2024, 1, 1),
        }]
    );
    assert!(core.has_rendered());
}

#[test]
fn unchanged_hash_is_skipped() {
    let mut core = CoreRuntime::new(date(2024, 1, 1), RuntimeOptions::default());

    assert_eq!(render_reasons(&mut core, changed("aaa")), vec![RenderReason::Initial]);
    assert!(render_reasons(&mut core, changed("aaa")).is_empty());
    assert_eq!(
        render_reasons(&mut core, changed("bbb")),
        vec![RenderReason::PlanChanged]
    );
}

#[test]
fn hash_check_can_be_disabled() {
    let mut core = CoreRuntime::new(date(2024, 1, 1), RuntimeOptions { use_hash: false });

    render_reasons(&mut core, changed("aaa"));

    assert_eq!(
        render_reasons(&mut core, changed("aaa")),
        vec![RenderReason::PlanChanged]
    );
}

#[test]
fn day_rollover_rerenders_with_new_date() {
    let mut core = CoreRuntime::new(date(2024, 1, 1), RuntimeOptions::default());
    core.step(changed("aaa"));

    let same_day = core.step(RuntimeEvent::DayTick {
        today: date(2024, 1, 1),
    });
    assert!(same_day.commands.is_empty());

    let next_day = core.step(RuntimeEvent::DayTick {
        today: date(2024, 1, 2),
    });
    assert_eq!(
        next_day.commands,
        vec![CoreCommand::Render {
            reason: RenderReason::DayRollover,
            today: date(2024, 1, 2),
        }]
    );
    assert_eq!(core.today(), date(2024, 1, 2));
}

#[test]
fn rollover_before_first_render_only_moves_date() {
    let mut core = CoreRuntime::new(date(2024, 1, 1), RuntimeOptions::default());

    let step = core.step(RuntimeEvent::DayTick {
        today: date(2024, 1, 2),
    });
    assert!(step.commands.is_empty());

    let step = core.step(changed("aaa"));
    assert_eq!(
        step.commands,
        vec![CoreCommand::Render {
            reason: RenderReason::Initial,
            today: date(2024, 1, 2),
        }]
    );
}

#[test]
fn unreadable_plan_keeps_running_without_render() {
    let mut core = CoreRuntime::new(date(2024, 1, 1), RuntimeOptions::default());

    let step = core.step(RuntimeEvent::PlanUnreadable {
        error: "gone".to_string(),
    });

    assert!(step.keep_running);
    assert!(step.commands.is_empty());
}

#[test]
fn shutdown_stops_the_core() {
    let mut core = CoreRuntime::new(date(2024, 1, 1), RuntimeOptions::default());

    let step = core.step(RuntimeEvent::ShutdownRequested);

    assert!(!step.keep_running);
}

#[test]
fn content_hash_is_stable_and_content_sensitive() {
    let a = compute_content_hash(PLAN_V1.as_bytes());

    assert_eq!(a, compute_content_hash(PLAN_V1.as_bytes()));
    assert_ne!(a, compute_content_hash(PLAN_V2.as_bytes()));
    assert_eq!(a.len(), 64);
}

#[test]
fn observe_plan_reports_missing_file() {
    let fs = MockFileSystem::new();

    match observe_plan(&fs, &PathBuf::from(PLAN_PATH)) {
        RuntimeEvent::PlanUnreadable { error } => assert!(error.contains("File not found")),
        other => panic!("expected PlanUnreadable, got {other:?}"),
    }

    fs.add_file(PLAN_PATH, PLAN_V1);
    assert_eq!(
        observe_plan(&fs, &PathBuf::from(PLAN_PATH)),
        changed(&compute_content_hash(PLAN_V1.as_bytes()))
    );

    fs.remove_file(PLAN_PATH);
    assert!(matches!(
        observe_plan(&fs, &PathBuf::from(PLAN_PATH)),
        RuntimeEvent::PlanUnreadable { .. }
    ));
}

#[test]
fn plan_events_match_by_file_name() {
    let name = OsStr::new("blog.json");

    let write = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
        .add_path(PathBuf::from("/plans/blog.json"));
    assert!(is_plan_event(&write, name));

    let other = Event::new(EventKind::Create(CreateKind::File))
        .add_path(PathBuf::from("/plans/notes.md"));
    assert!(!is_plan_event(&other, name));

    let read = Event::new(EventKind::Access(AccessKind::Any))
        .add_path(PathBuf::from("/plans/blog.json"));
    assert!(!is_plan_event(&read, name));
}

#[test]
fn log_level_priority() {
    assert_eq!(
        resolve_level(Some(LogLevel::Debug), Some("error")),
        tracing::Level::DEBUG
    );
    assert_eq!(resolve_level(None, Some(" WARN ")), tracing::Level::WARN);
    assert_eq!(resolve_level(None, Some("loud")), tracing::Level::INFO);
    assert_eq!(resolve_level(None, None), tracing::Level::INFO);
}

fn runtime_over(
    fs: Arc<MockFileSystem>,
    use_hash: bool,
) -> (mpsc::Sender<RuntimeEvent>, Runtime<SharedBuffer>, SharedBuffer) {
    let (tx, rx) = mpsc::channel(16);
    let out = SharedBuffer::new();
    let fs: Arc<dyn FileSystem> = fs;
    let runtime = Runtime::new(
        CoreRuntime::new(date(2024, 1, 1), RuntimeOptions { use_hash }),
        rx,
        fs,
        PLAN_PATH,
        Renderer::new(OutputFormat::Text, "%Y-%m-%d"),
        out.clone(),
    );
    (tx, runtime, out)
}

#[tokio::test]
async fn runtime_rerenders_on_change_and_rollover() {
    init_tracing();

    let fs = Arc::new(MockFileSystem::new());
    fs.add_file(PLAN_PATH, PLAN_V1);
    let (tx, runtime, out) = runtime_over(Arc::clone(&fs), true);
    let handle = tokio::spawn(runtime.run());

    let plan_path = PathBuf::from(PLAN_PATH);
    tx.send(observe_plan(fs.as_ref(), &plan_path)).await.unwrap();
    // Same content again: deduplicated.
    tx.send(observe_plan(fs.as_ref(), &plan_path)).await.unwrap();

    fs.add_file(PLAN_PATH, PLAN_V2);
    tx.send(observe_plan(fs.as_ref(), &plan_path)).await.unwrap();

    tx.send(RuntimeEvent::DayTick {
        today: date(2024, 1, 2),
    })
    .await
    .unwrap();
    tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();

    with_timeout(handle).await.unwrap().unwrap();

    let text = out.contents();
    assert_eq!(out.count("Project Timeline"), 3);
    assert!(text.contains("Complete all 2 tasks in 5 days. Estimated completion: 2024-01-05"));
    assert!(text.contains("Complete all 1 tasks in 4 days. Estimated completion: 2024-01-04"));
    assert!(text.contains("Complete all 1 tasks in 4 days. Estimated completion: 2024-01-05"));
}

#[tokio::test]
async fn runtime_survives_broken_plan() {
    init_tracing();

    let fs = Arc::new(MockFileSystem::new());
    fs.add_file(PLAN_PATH, "{ not json");
    let (tx, runtime, out) = runtime_over(Arc::clone(&fs), true);
    let handle = tokio::spawn(runtime.run());

    let plan_path = PathBuf::from(PLAN_PATH);
    tx.send(observe_plan(fs.as_ref(), &plan_path)).await.unwrap();

    fs.add_file(PLAN_PATH, PLAN_V2);
    tx.send(observe_plan(fs.as_ref(), &plan_path)).await.unwrap();
    tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();

    with_timeout(handle).await.unwrap().unwrap();

    assert_eq!(out.count("Project Timeline"), 1);
}

#[tokio::test]
async fn runtime_exits_when_channel_closes() {
    let fs = Arc::new(MockFileSystem::new());
    let (tx, runtime, out) = runtime_over(fs, false);
    drop(tx);

    let returned = with_timeout(runtime.run()).await.unwrap();

    assert!(returned.contents().is_empty());
    assert!(out.contents().is_empty());
}
