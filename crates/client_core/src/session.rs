//! Interaction state for one user working through select → submit → result.
//!
//! `ReviewSession` is the single owner of the flow's state. The GUI drives it
//! from its event loop with [`ReviewSession::begin_submit`] and
//! [`ReviewSession::settle`] around a request that runs elsewhere; headless
//! callers use [`ReviewSession::submit`], which awaits the backend directly.

use shared::domain::{AnalysisResult, HealthStatus};
use tracing::{debug, info, warn};

use crate::{
    error::AnalysisError,
    transport::ReviewBackend,
    types::{FileCandidate, SelectedFile},
};

pub const INVALID_FILE_MESSAGE: &str = "Please select a valid PDF file";
pub const MISSING_FILE_MESSAGE: &str = "Please select a file first";
pub const BACKEND_NOT_CONFIGURED_MESSAGE: &str =
    "Backend API is not configured. Please check GROQ_API_KEY in backend .env file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
}

/// Why a submit did not start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    AlreadyInFlight,
    MissingFile,
    BackendUnavailable,
}

impl SubmitRejection {
    /// Message recorded in the error state, if the rejection records one.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyInFlight => None,
            Self::MissingFile => Some(MISSING_FILE_MESSAGE),
            Self::BackendUnavailable => Some(BACKEND_NOT_CONFIGURED_MESSAGE),
        }
    }
}

#[derive(Debug, Default)]
pub struct ReviewSession {
    selected_file: Option<SelectedFile>,
    submission: SubmissionState,
    result: Option<AnalysisResult>,
    error: Option<String>,
    /// `None` until the startup probe reports.
    health: Option<HealthStatus>,
    drag_over: bool,
    reveal_pending: bool,
    max_upload_bytes: Option<u64>,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects PDFs larger than `limit` at selection time. `None` disables the check.
    pub fn with_upload_limit(limit: Option<u64>) -> Self {
        Self {
            max_upload_bytes: limit,
            ..Self::default()
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn is_in_flight(&self) -> bool {
        self.submission == SubmissionState::InFlight
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn health(&self) -> Option<HealthStatus> {
        self.health
    }

    pub fn backend_usable(&self) -> bool {
        self.health.is_some_and(|health| health.usable())
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn max_upload_bytes(&self) -> Option<u64> {
        self.max_upload_bytes
    }

    /// Whether the submit affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.is_in_flight()
    }

    /// Probes the backend once and records the outcome.
    pub async fn start<B: ReviewBackend + ?Sized>(&mut self, backend: &B) -> HealthStatus {
        let status = backend.probe_health().await;
        self.record_health(status);
        status
    }

    pub fn record_health(&mut self, status: HealthStatus) {
        if !status.usable() {
            warn!(
                healthy = status.healthy,
                api_configured = status.api_configured,
                "backend is not usable"
            );
        }
        self.health = Some(status);
    }

    /// Validation shared by the file picker and drop gestures. `None` means the
    /// gesture produced no usable file and is treated as invalid.
    pub fn select_file(&mut self, candidate: Option<FileCandidate>) -> bool {
        match candidate {
            Some(candidate) if candidate.is_pdf() => {
                if let Some(limit) = self.max_upload_bytes {
                    if candidate.size_bytes > limit {
                        debug!(
                            name = %candidate.name,
                            size_bytes = candidate.size_bytes,
                            limit,
                            "rejected oversized file"
                        );
                        self.selected_file = None;
                        self.error = Some(upload_limit_message(limit));
                        return false;
                    }
                }
                debug!(name = %candidate.name, size_bytes = candidate.size_bytes, "file selected");
                self.selected_file = Some(SelectedFile::accept(candidate));
                self.error = None;
                self.clear_result();
                true
            }
            other => {
                debug!(
                    media_type = ?other.as_ref().map(|c| c.media_type.as_str()),
                    "rejected non-PDF selection"
                );
                self.selected_file = None;
                self.error = Some(INVALID_FILE_MESSAGE.to_string());
                false
            }
        }
    }

    pub fn drag_enter(&mut self) {
        self.drag_over = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    pub fn drop_file(&mut self, candidate: Option<FileCandidate>) -> bool {
        self.drag_over = false;
        self.select_file(candidate)
    }

    /// Runs the submit guards and, if they pass, marks the session in flight and
    /// hands back the file to upload. Every `Ok` must be followed by [`Self::settle`].
    pub fn begin_submit(&mut self) -> Result<SelectedFile, SubmitRejection> {
        if self.is_in_flight() {
            return Err(SubmitRejection::AlreadyInFlight);
        }
        let Some(file) = self.selected_file.clone() else {
            return Err(self.reject(SubmitRejection::MissingFile));
        };
        if !self.backend_usable() {
            return Err(self.reject(SubmitRejection::BackendUnavailable));
        }

        self.error = None;
        self.clear_result();
        self.submission = SubmissionState::InFlight;
        info!(filename = file.name(), "analysis submitted");
        Ok(file)
    }

    /// Records the outcome of the request started by [`Self::begin_submit`].
    /// The session is always idle afterwards.
    pub fn settle(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        if !self.is_in_flight() {
            debug!("settling a submission that was not in flight");
        }
        self.submission = SubmissionState::Idle;
        match outcome {
            Ok(result) => {
                if self.result.is_none() {
                    self.reveal_pending = true;
                }
                self.result = Some(result);
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, "analysis failed");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Guards, uploads and records the outcome in one call.
    pub async fn submit<B: ReviewBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<(), SubmitRejection> {
        let file = self.begin_submit()?;
        let guard = InFlightGuard { session: self };
        let outcome = backend.analyze(&file).await;
        guard.settle(outcome);
        Ok(())
    }

    /// True exactly once after a result first appears.
    pub fn take_result_reveal(&mut self) -> bool {
        std::mem::take(&mut self.reveal_pending)
    }

    fn reject(&mut self, rejection: SubmitRejection) -> SubmitRejection {
        if let Some(message) = rejection.message() {
            self.error = Some(message.to_string());
        }
        rejection
    }

    fn clear_result(&mut self) {
        self.result = None;
        self.reveal_pending = false;
    }
}

/// Returns the session to idle even if the awaiting future is dropped.
struct InFlightGuard<'a> {
    session: &'a mut ReviewSession,
}

impl InFlightGuard<'_> {
    fn settle(self, outcome: Result<AnalysisResult, AnalysisError>) {
        self.session.settle(outcome);
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.submission = SubmissionState::Idle;
    }
}

pub fn upload_limit_message(limit: u64) -> String {
    format!("File exceeds the {} upload limit", format_megabytes(limit))
}

fn format_megabytes(bytes: u64) -> String {
    let megabytes = bytes as f64 / (1024.0 * 1024.0);
    if megabytes.fract() == 0.0 {
        format!("{megabytes:.0}MB")
    } else {
        format!("{megabytes:.1}MB")
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
