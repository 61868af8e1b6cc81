// src/plan/mod.rs

//! Plan documents produced by the external planning service.
//!
//! - [`model`] mirrors the service's wire types (`Plan`, `Task`,
//!   `HistoryResponse`).
//! - [`loader`] reads plan and history documents from JSON or TOML files.

pub mod loader;
pub mod model;

pub use loader::{load_history, load_plan, parse_history, parse_plan, DocumentFormat};
pub use model::{HistoryResponse, Plan, Task, DEFAULT_DURATION_DAYS};
