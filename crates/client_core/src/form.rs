//! Upload form state, its transitions, and the view derived from it.
//!
//! [`FormState`] is never mutated in place: [`reduce`] takes the current
//! record and an action and returns the next record plus at most one effect
//! for the shell to carry out.

use std::fmt::Write as _;

use shared::{
    domain::{RequestToken, SelectedFile},
    error::{UploadFailure, MISSING_FILE_NOTICE},
    protocol::UploadResult,
};
use tracing::{debug, info, warn};

use crate::CaptionService;

pub const NO_FILE_LABEL: &str = "No file chosen";
pub const CAPTIONS_HEADING: &str = "Captions";
pub const SONGS_HEADING: &str = "Suggested Songs";

/// What the result area currently shows. Holding result and error in one
/// enum keeps them mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormOutcome {
    #[default]
    Empty,
    Ready(UploadResult),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    selected_file: Option<SelectedFile>,
    outcome: FormOutcome,
    last_issued: RequestToken,
    in_flight: Option<RequestToken>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn outcome(&self) -> &FormOutcome {
        &self.outcome
    }

    pub fn result(&self) -> Option<&UploadResult> {
        match &self.outcome {
            FormOutcome::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            FormOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn last_issued(&self) -> RequestToken {
        self.last_issued
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[derive(Debug, Clone)]
pub enum FormAction {
    FileSelected(SelectedFile),
    SubmitRequested,
    UploadFinished {
        token: RequestToken,
        outcome: Result<UploadResult, UploadFailure>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    /// Blocking notice; the state is left untouched.
    Notify(&'static str),
    StartUpload {
        token: RequestToken,
        file: SelectedFile,
    },
}

pub fn reduce(state: &FormState, action: FormAction) -> (FormState, Option<FormEffect>) {
    match action {
        FormAction::FileSelected(file) => {
            debug!(file = file.name(), bytes = file.len(), "image selected");
            let next = FormState {
                selected_file: Some(file),
                ..state.clone()
            };
            (next, None)
        }
        FormAction::SubmitRequested => {
            let Some(file) = state.selected_file.clone() else {
                return (state.clone(), Some(FormEffect::Notify(MISSING_FILE_NOTICE)));
            };
            let token = state.last_issued.next();
            let next = FormState {
                last_issued: token,
                in_flight: Some(token),
                ..state.clone()
            };
            (next, Some(FormEffect::StartUpload { token, file }))
        }
        FormAction::UploadFinished { token, outcome } => {
            if token != state.last_issued {
                debug!(%token, latest = %state.last_issued, "discarding stale upload result");
                return (state.clone(), None);
            }
            let outcome = match outcome {
                Ok(result) => {
                    info!(
                        %token,
                        captions = result.captions.len(),
                        songs = result.songs.len(),
                        "upload succeeded"
                    );
                    FormOutcome::Ready(result)
                }
                Err(failure) => {
                    warn!(%token, "upload failed: {failure}");
                    FormOutcome::Failed(failure.user_message().to_string())
                }
            };
            let next = FormState {
                outcome,
                in_flight: None,
                ..state.clone()
            };
            (next, None)
        }
    }
}

/// Runs one submission to completion against `service`. Returns the final
/// state and the blocking notice, if one was raised instead of uploading.
pub async fn drive_submission(
    service: &dyn CaptionService,
    state: &FormState,
) -> (FormState, Option<&'static str>) {
    let (submitted, effect) = reduce(state, FormAction::SubmitRequested);
    match effect {
        Some(FormEffect::StartUpload { token, file }) => {
            let outcome = service.upload(&file).await;
            let (finished, _) = reduce(&submitted, FormAction::UploadFinished { token, outcome });
            (finished, None)
        }
        Some(FormEffect::Notify(notice)) => (submitted, Some(notice)),
        None => (submitted, None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLists {
    pub captions: Vec<String>,
    pub songs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub selected_file_label: String,
    pub uploading: bool,
    pub error_line: Option<String>,
    pub results: Option<ResultLists>,
}

pub fn render(state: &FormState) -> FormView {
    FormView {
        selected_file_label: state
            .selected_file
            .as_ref()
            .map(|file| file.name().to_string())
            .unwrap_or_else(|| NO_FILE_LABEL.to_string()),
        uploading: state.is_uploading(),
        error_line: state.error_message().map(str::to_string),
        results: state.result().map(|result| ResultLists {
            captions: result.captions.clone(),
            songs: result.songs.clone(),
        }),
    }
}

impl FormView {
    /// Plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Image: {}", self.selected_file_label);
        if self.uploading {
            let _ = writeln!(out, "Uploading...");
        }
        if let Some(error) = &self.error_line {
            let _ = writeln!(out, "Error: {error}");
        }
        if let Some(results) = &self.results {
            let _ = writeln!(out, "\n{CAPTIONS_HEADING}");
            for caption in &results.captions {
                let _ = writeln!(out, "  - {caption}");
            }
            let _ = writeln!(out, "\n{SONGS_HEADING}");
            for song in &results.songs {
                let _ = writeln!(out, "  - {song}");
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
