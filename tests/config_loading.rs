// tests/config_loading.rs

use std::error::Error;
use std::io::Write;
use std::str::FromStr;

use tempfile::NamedTempFile;
use taskplanner::config::{load_and_validate, resolve_config, ConfigFile};
use taskplanner::errors::PlannerError;
use taskplanner::types::{OutputFormat, SortBy, SortOrder};

type TestResult = Result<(), Box<dyn Error>>;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn empty_file_uses_defaults() -> TestResult {
    let file = config_file("");

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.config.format, OutputFormat::Text);
    assert_eq!(cfg.config.date_format, "%Y-%m-%d");
    assert_eq!(cfg.history.sort_by, SortBy::Date);
    assert_eq!(cfg.history.sort_order, SortOrder::Desc);
    assert_eq!(cfg.history.preview_tasks, 3);
    assert!(cfg.watch.use_hash);
    assert_eq!(cfg.watch.day_check_secs, 60);
    Ok(())
}

#[test]
fn full_file_is_read() -> TestResult {
    let file = config_file(
        r#"
[config]
format = "gantt"
date_format = "%d/%m/%Y"

[history]
sort_by = "tasks"
sort_order = "asc"
preview_tasks = 5

[watch]
use_hash = false
day_check_secs = 5
"#,
    );

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.config.format, OutputFormat::Gantt);
    assert_eq!(cfg.config.date_format, "%d/%m/%Y");
    assert_eq!(cfg.history.sort_by, SortBy::Tasks);
    assert_eq!(cfg.history.sort_order, SortOrder::Asc);
    assert_eq!(cfg.history.preview_tasks, 5);
    assert!(!cfg.watch.use_hash);
    assert_eq!(cfg.watch.day_check_secs, 5);
    Ok(())
}

#[test]
fn unknown_format_is_rejected_by_toml() {
    let file = config_file("[config]\nformat = \"pdf\"\n");

    match load_and_validate(file.path()) {
        Err(PlannerError::TomlError(_)) => {}
        other => panic!("expected TomlError, got {other:?}"),
    }
}

#[test]
fn invalid_date_format_is_config_error() {
    let file = config_file("[config]\ndate_format = \"%Q\"\n");

    match load_and_validate(file.path()) {
        Err(PlannerError::ConfigError(msg)) => assert!(msg.contains("date_format")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn zero_preview_is_config_error() {
    let file = config_file("[history]\npreview_tasks = 0\n");

    match load_and_validate(file.path()) {
        Err(PlannerError::ConfigError(msg)) => assert!(msg.contains("preview_tasks")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn zero_day_check_is_config_error() {
    let file = config_file("[watch]\nday_check_secs = 0\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(PlannerError::ConfigError(_))
    ));
}

#[test]
fn explicit_missing_config_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    assert!(matches!(
        resolve_config(Some(&missing)),
        Err(PlannerError::IoError(_))
    ));
}

#[test]
fn builder_config_is_valid() {
    let cfg: ConfigFile = taskplanner_test_utils::builders::ConfigFileBuilder::new()
        .format(OutputFormat::Json)
        .preview_tasks(2)
        .build();

    assert_eq!(cfg.config.format, OutputFormat::Json);
    assert_eq!(cfg.history.preview_tasks, 2);
}

#[test]
fn enums_parse_from_strings() -> TestResult {
    assert_eq!(OutputFormat::from_str(" JSON ")?, OutputFormat::Json);
    assert_eq!(SortBy::from_str("title")?, SortBy::Title);
    assert_eq!(SortOrder::from_str("Asc")?, SortOrder::Asc);
    assert!(SortBy::from_str("size").is_err());
    Ok(())
}

#[test]
fn time_fields_in_date_format_are_config_error() {
    for pattern in ["%Y-%m-%d %H:%M", "%s", "%d %z"] {
        let file = config_file(&format!("[config]\ndate_format = \"{pattern}\"\n"));

        match load_and_validate(file.path()) {
            Err(PlannerError::ConfigError(msg)) => assert!(msg.contains("date fields")),
            other => panic!("expected ConfigError for {pattern:?}, got {other:?}"),
        }
    }
}
