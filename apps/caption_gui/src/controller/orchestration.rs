//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` without blocking the UI thread. The error string describes
/// why the worker could not accept it.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err("ui->backend command queue is full".to_string())
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err("backend command processor disconnected (possible startup failure)".to_string())
        }
    }
}
