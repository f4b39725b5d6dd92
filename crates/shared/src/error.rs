use thiserror::Error;

/// Blocking notice shown when the user submits without choosing a file.
pub const MISSING_FILE_NOTICE: &str = "Please select an image file.";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to upload image. Please try again.";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Unexpected response format.";
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "Error uploading file or processing the response.";

/// Why an upload attempt ended without a result. `detail` is for logs only;
/// the form shows [`UploadFailure::user_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadFailure {
    #[error("transport failure: {detail}")]
    Transport { detail: String },
    #[error("malformed response: {detail}")]
    MalformedResponse { detail: String },
    #[error("unexpected failure: {detail}")]
    Unexpected { detail: String },
}

impl UploadFailure {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected {
            detail: detail.into(),
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Transport { .. } => TRANSPORT_FAILURE_MESSAGE,
            Self::MalformedResponse { .. } => MALFORMED_RESPONSE_MESSAGE,
            Self::Unexpected { .. } => UNEXPECTED_FAILURE_MESSAGE,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::Transport { detail }
            | Self::MalformedResponse { detail }
            | Self::Unexpected { detail } => detail,
        }
    }
}
