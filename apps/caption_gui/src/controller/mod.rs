//! Controller layer: UI events, form transitions, and command orchestration.

pub mod events;
pub mod orchestration;

use std::path::Path;

use client_core::{
    form::{reduce, render, FormAction, FormEffect, FormState, FormView},
    load_selected_file,
};
use crossbeam_channel::Sender;
use shared::{domain::SelectedFile, error::UploadFailure};

use crate::backend_bridge::commands::BackendCommand;
use events::UiEvent;
use orchestration::dispatch_backend_command;

/// Modal notice that holds the UI until acknowledged.
pub trait BlockingNotifier {
    fn notify(&self, message: &str);
}

/// Owns the form state on the UI thread and carries out the effects that
/// each transition asks for.
pub struct FormController {
    state: FormState,
    status: String,
    cmd_tx: Sender<BackendCommand>,
    notifier: Box<dyn BlockingNotifier>,
}

impl FormController {
    pub fn new(cmd_tx: Sender<BackendCommand>, notifier: Box<dyn BlockingNotifier>) -> Self {
        Self {
            state: FormState::new(),
            status: "Starting backend worker...".to_string(),
            cmd_tx,
            notifier,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn view(&self) -> FormView {
        render(&self.state)
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.apply(FormAction::FileSelected(file));
    }

    /// Loads the picked path. An unreadable file leaves the previous
    /// selection in place and raises a notice.
    pub fn select_path(&mut self, path: &Path) {
        match load_selected_file(path) {
            Ok(file) => self.select_file(file),
            Err(err) => {
                tracing::warn!("failed to load picked image: {err:#}");
                self.notifier.notify(&format!("Could not open the selected image: {err:#}"));
            }
        }
    }

    pub fn submit(&mut self) {
        self.apply(FormAction::SubmitRequested);
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Status(message) => {
                self.status = message;
            }
            UiEvent::UploadFinished { token, outcome } => {
                self.apply(FormAction::UploadFinished { token, outcome });
            }
        }
    }

    fn apply(&mut self, action: FormAction) {
        let (next, effect) = reduce(&self.state, action);
        self.state = next;

        match effect {
            Some(FormEffect::Notify(message)) => self.notifier.notify(message),
            Some(FormEffect::StartUpload { token, file }) => {
                tracing::info!(%token, file = file.name(), bytes = file.len(), "submitting image");
                if let Err(reason) =
                    dispatch_backend_command(&self.cmd_tx, BackendCommand::Upload { token, file })
                {
                    self.status = reason.clone();
                    self.apply(FormAction::UploadFinished {
                        token,
                        outcome: Err(UploadFailure::unexpected(reason)),
                    });
                }
            }
            None => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
