//! UI layer for the desktop client: app shell and native dialogs.

pub mod app;
pub mod dialogs;

pub use app::CaptionApp;
