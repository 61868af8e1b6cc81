// src/watch/mod.rs

//! Sources of re-render events for `timeline --watch`.
//!
//! - [`watcher`] turns filesystem changes to the plan file into events
//!   (`notify`).
//! - [`hash`] fingerprints plan contents so unchanged saves are ignored.
//! - [`ticker`] reports the calendar date so midnight rollovers re-render.

pub mod hash;
pub mod ticker;
pub mod watcher;

pub use hash::{compute_content_hash, observe_plan};
pub use ticker::spawn_day_ticker;
pub use watcher::{is_plan_event, spawn_plan_watcher, WatcherHandle};
