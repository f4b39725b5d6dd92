//! Events flowing from the backend worker back to the UI thread.

use shared::{domain::RequestToken, error::UploadFailure, protocol::UploadResult};

pub enum UiEvent {
    Status(String),
    UploadFinished {
        token: RequestToken,
        outcome: Result<UploadResult, UploadFailure>,
    },
}
