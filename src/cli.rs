// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::{OutputFormat, SortBy, SortOrder};

/// Command-line arguments for `taskplanner`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskplanner",
    version,
    about = "Lay out AI-generated task plans on a calendar.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Taskplanner.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKPLANNER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Schedule a plan and print its timeline.
    Timeline(TimelineArgs),
    /// Report dependencies the scheduler will ignore, duplicates and cycles.
    Check(CheckArgs),
    /// Search and list saved plans.
    History(HistoryArgs),
}

#[derive(Debug, Clone, Args)]
pub struct TimelineArgs {
    /// Plan document (.json or .toml).
    #[arg(long, value_name = "PATH")]
    pub plan: PathBuf,

    /// Date the timeline starts from. Defaults to the local date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    /// Output format; overrides `[config].format`.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Keep running and re-render when the plan file or the date changes.
    #[arg(long)]
    pub watch: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Plan document (.json or .toml).
    #[arg(long, value_name = "PATH")]
    pub plan: PathBuf,

    /// Exit with an error if any warning is reported.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Args)]
pub struct HistoryArgs {
    /// History document: `{"plans": [...]}` or an array of plans.
    #[arg(long, value_name = "PATH")]
    pub file: PathBuf,

    /// Only show plans whose title or goal contains this text.
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    #[arg(long, value_enum, value_name = "KEY")]
    pub sort_by: Option<SortBy>,

    #[arg(long, value_enum, value_name = "ORDER")]
    pub order: Option<SortOrder>,

    /// Show every task of every plan instead of a short preview.
    #[arg(long)]
    pub expand: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
