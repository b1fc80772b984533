//! Bridge between the UI command queue and the backend worker thread.

pub mod commands;
pub mod runtime;
