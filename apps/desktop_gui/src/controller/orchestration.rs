//! Command orchestration helpers from UI actions to the backend command queue.

use client_core::{AnalysisError, ReviewSession, SubmitRejection};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    QueueFull,
    WorkerGone,
}

impl DispatchError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::QueueFull => "UI command queue is full; please retry",
            Self::WorkerGone => {
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
            }
        }
    }
}

impl From<DispatchError> for UiError {
    fn from(err: DispatchError) -> Self {
        let kind = match err {
            DispatchError::QueueFull => UiErrorKind::QueueFull,
            DispatchError::WorkerGone => UiErrorKind::WorkerLost,
        };
        UiError::new(kind, err.message())
    }
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), DispatchError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue full");
            Err(DispatchError::QueueFull)
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            Err(DispatchError::WorkerGone)
        }
    }
}

/// Starts a submission and hands it to the worker. If the worker cannot take
/// it, the submission is settled immediately so it never stays in flight.
pub fn submit_analysis(
    session: &mut ReviewSession,
    cmd_tx: &Sender<BackendCommand>,
) -> Result<(), SubmitRejection> {
    let file = session.begin_submit()?;
    if let Err(err) = dispatch_backend_command(cmd_tx, BackendCommand::Analyze { file }) {
        session.settle(Err(AnalysisError::WorkerUnavailable(
            err.message().to_string(),
        )));
    }
    Ok(())
}
