// src/engine/mod.rs

//! Re-render loop behind `timeline --watch`.
//!
//! This module ties together:
//! - plan file changes reported by the watcher
//! - calendar day rollovers reported by the day ticker
//! - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell that
//! loads the plan and writes output is implemented in [`runtime`].

use chrono::NaiveDate;

/// Why a timeline is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderReason {
    /// First render after startup.
    Initial,
    /// The plan file's content changed.
    PlanChanged,
    /// The calendar day changed, so every date moves.
    DayRollover,
}

/// Runtime options used by the core.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// If true, a plan change whose content hash matches the last rendered
    /// content is ignored.
    pub use_hash: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self { use_hash: true }
    }
}

/// Events flowing into the runtime from the watcher, ticker and signal handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// The plan file was (re)written; `content_hash` is its blake3 digest.
    PlanChanged { content_hash: String },
    /// The plan file could not be read (e.g. removed mid-save).
    PlanUnreadable { error: String },
    /// Periodic report of the current calendar date.
    DayTick { today: NaiveDate },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod runtime;

pub use core::{CoreCommand, CoreRuntime, CoreStep};
pub use runtime::Runtime;
