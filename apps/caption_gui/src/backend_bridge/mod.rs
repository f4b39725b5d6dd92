//! Backend worker: owns the tokio runtime and performs uploads off the UI thread.

pub mod commands;
pub mod runtime;
