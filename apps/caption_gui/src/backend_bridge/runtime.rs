//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::{CaptionService, ClientSettings, HttpCaptionService};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the worker against the HTTP captioning service described by
/// `settings`. A startup failure is reported as a status event and the
/// command queue is dropped, so later submissions fail fast.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: &ClientSettings,
) -> Option<JoinHandle<()>> {
    match HttpCaptionService::new(settings) {
        Ok(service) => {
            tracing::info!(url = %service.upload_url(), "caption service configured");
            Some(spawn_with_service(cmd_rx, ui_tx, Arc::new(service)))
        }
        Err(err) => {
            tracing::error!("backend worker startup failure: {err:#}");
            let _ = ui_tx.try_send(UiEvent::Status(format!(
                "Backend worker startup failure: {err:#}"
            )));
            None
        }
    }
}

pub fn spawn_with_service(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    service: Arc<dyn CaptionService>,
) -> JoinHandle<()> {
    thread::spawn(move || serve_commands(cmd_rx, ui_tx, service))
}

fn serve_commands(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    service: Arc<dyn CaptionService>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!("failed to build backend runtime: {err}");
            let _ = ui_tx.try_send(UiEvent::Status(format!(
                "Backend worker startup failure: failed to build runtime: {err}"
            )));
            return;
        }
    };
    let _ = ui_tx.try_send(UiEvent::Status("Ready".to_string()));

    runtime.block_on(async move {
        // Each upload runs as its own task; overlapping submissions are
        // independent and ordered later by request token.
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Upload { token, file } => {
                    let service = Arc::clone(&service);
                    let ui_tx = ui_tx.clone();
                    tokio::spawn(async move {
                        let outcome = service.upload(&file).await;
                        match ui_tx.try_send(UiEvent::UploadFinished { token, outcome }) {
                            Ok(()) => {}
                            Err(TrySendError::Full(_)) => {
                                tracing::warn!(%token, "ui event queue is full; dropping upload result");
                            }
                            Err(TrySendError::Disconnected(_)) => {
                                tracing::debug!(%token, "ui closed before upload finished");
                            }
                        }
                    });
                }
            }
        }
        tracing::debug!("ui->backend command queue closed; backend worker exiting");
    });
}
