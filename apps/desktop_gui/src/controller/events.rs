//! UI/backend events and error modeling for the desktop controller.

use client_core::{AnalysisError, AnalysisResult, HealthStatus};

pub enum UiEvent {
    Info(String),
    HealthProbed(HealthStatus),
    AnalysisFinished(Result<AnalysisResult, AnalysisError>),
    Error(UiError),
}

/// Failures of the worker plumbing itself. Analysis failures never become a
/// `UiError`; they settle the session instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorKind {
    WorkerStartup,
    WorkerLost,
    QueueFull,
}

#[derive(Debug, Clone)]
pub struct UiError {
    kind: UiErrorKind,
    message: String,
}

impl UiError {
    pub fn new(kind: UiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The worker cannot serve requests until the app is restarted.
    pub fn requires_restart(&self) -> bool {
        matches!(self.kind, UiErrorKind::WorkerStartup | UiErrorKind::WorkerLost)
    }

    pub fn kind(&self) -> UiErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(kind: UiErrorKind) -> &'static str {
    match kind {
        UiErrorKind::WorkerStartup => "Startup",
        UiErrorKind::WorkerLost => "Backend worker",
        UiErrorKind::QueueFull => "Busy",
    }
}
