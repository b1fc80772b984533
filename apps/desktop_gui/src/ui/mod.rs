//! UI layer: app shell, views, detail panes, and display formatting.

pub mod app;
pub mod format;

pub use app::OrderWatchApp;
