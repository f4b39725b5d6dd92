//! Backend commands queued from UI to backend worker.

use shared::domain::{RequestToken, SelectedFile};

pub enum BackendCommand {
    Upload {
        token: RequestToken,
        file: SelectedFile,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Upload { .. } => "upload",
        }
    }
}
