//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::ReviewBackend;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorKind, UiEvent};

/// Spawns the worker thread. Commands are served one at a time, and every
/// `Analyze` is answered with exactly one `AnalysisFinished`.
pub fn launch<B>(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, backend: B)
where
    B: ReviewBackend + 'static,
{
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorKind::WorkerStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::ProbeHealth => {
                        tracing::info!("backend: probe_health");
                        let status = backend.probe_health().await;
                        if ui_tx.send(UiEvent::HealthProbed(status)).is_err() {
                            break;
                        }
                    }
                    BackendCommand::Analyze { file } => {
                        tracing::info!(filename = file.name(), "backend: analyze");
                        let outcome = backend.analyze(&file).await;
                        if let Err(err) = &outcome {
                            tracing::warn!("backend: analyze failed: {err}");
                        }
                        if ui_tx.send(UiEvent::AnalysisFinished(outcome)).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::info!("backend worker stopped");
        });
    });
}
