// src/dag/mod.rs

//! Dependency structure of a plan.
//!
//! - [`graph`] holds the known dependency edges between a plan's tasks.
//! - [`diagnostics`] reports what the timeline scheduler will silently work
//!   around (unknown or forward dependencies, duplicates, cycles).

pub mod diagnostics;
pub mod graph;

pub use diagnostics::{diagnose, log_diagnostics, Diagnostic, Severity};
pub use graph::PlanGraph;
