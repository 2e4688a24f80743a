//! clipring - terminal clipboard history
//!
//! A bounded, most-recent-first history of clipboard text fed by a
//! background poller, with a TUI to re-copy, delete, or type new entries.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod logging;
pub mod models;
pub mod ui;
