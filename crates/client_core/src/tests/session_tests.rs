use super::*;

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use shared::domain::PDF_MEDIA_TYPE;

use crate::error::NETWORK_ERROR_MESSAGE;

struct FakeBackend {
    health: HealthStatus,
    outcome: Result<AnalysisResult, AnalysisError>,
    probe_calls: AtomicUsize,
    analyze_calls: AtomicUsize,
}

impl FakeBackend {
    fn healthy_with(outcome: Result<AnalysisResult, AnalysisError>) -> Self {
        Self {
            health: HealthStatus {
                healthy: true,
                api_configured: true,
            },
            outcome,
            probe_calls: AtomicUsize::new(0),
            analyze_calls: AtomicUsize::new(0),
        }
    }

    fn unhealthy() -> Self {
        let mut backend = Self::healthy_with(Ok(good_result()));
        backend.health = HealthStatus::UNHEALTHY;
        backend
    }

    fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewBackend for FakeBackend {
    async fn probe_health(&self) -> HealthStatus {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.health
    }

    async fn analyze(&self, _file: &SelectedFile) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Healthy backend whose analyze call never completes.
struct StalledBackend;

#[async_trait]
impl ReviewBackend for StalledBackend {
    async fn probe_health(&self) -> HealthStatus {
        HealthStatus {
            healthy: true,
            api_configured: true,
        }
    }

    async fn analyze(&self, _file: &SelectedFile) -> Result<AnalysisResult, AnalysisError> {
        std::future::pending().await
    }
}

fn good_result() -> AnalysisResult {
    AnalysisResult {
        analysis: "Good structure...".to_string(),
        filename: "resume.pdf".to_string(),
        model: None,
    }
}

fn pdf(name: &str) -> FileCandidate {
    FileCandidate::from_bytes(name, Some(PDF_MEDIA_TYPE), b"%PDF-1.4".to_vec())
}

fn png(name: &str) -> FileCandidate {
    FileCandidate::from_bytes(name, Some("image/png"), b"\x89PNG".to_vec())
}

fn healthy_session() -> ReviewSession {
    let mut session = ReviewSession::new();
    session.record_health(HealthStatus {
        healthy: true,
        api_configured: true,
    });
    session
}

#[test]
fn non_pdf_selection_sets_error_and_clears_file() {
    let mut session = healthy_session();
    assert!(session.select_file(Some(pdf("resume.pdf"))));

    for candidate in [
        png("photo.png"),
        FileCandidate::from_bytes("notes.txt", None, b"text".to_vec()),
        FileCandidate::from_bytes("resume.pdf", Some("application/x-pdf"), Vec::new()),
    ] {
        assert!(!session.select_file(Some(candidate)));
        assert_eq!(session.error(), Some(INVALID_FILE_MESSAGE));
        assert!(session.selected_file().is_none());
        assert!(!session.can_submit());
    }
}

#[test]
fn absent_candidate_is_invalid() {
    let mut session = ReviewSession::new();
    assert!(!session.select_file(None));
    assert_eq!(session.error(), Some(INVALID_FILE_MESSAGE));
}

#[tokio::test]
async fn pdf_selection_clears_previous_error_and_result() {
    let backend = FakeBackend::healthy_with(Ok(good_result()));
    let mut session = healthy_session();
    session.select_file(Some(pdf("resume.pdf")));
    session.submit(&backend).await.expect("submitted");
    assert!(session.result().is_some());

    session.select_file(Some(png("photo.png")));
    assert!(session.error().is_some());

    assert!(session.select_file(Some(pdf("resume-v2.pdf"))));
    assert_eq!(session.error(), None);
    assert!(session.result().is_none());
    assert_eq!(
        session.selected_file().map(SelectedFile::name),
        Some("resume-v2.pdf")
    );
    assert!(session.can_submit());
}

#[test]
fn drag_gestures_toggle_flag_and_drop_validates_like_picker() {
    let mut session = ReviewSession::new();
    session.drag_enter();
    assert!(session.is_drag_over());
    session.drag_leave();
    assert!(!session.is_drag_over());

    session.drag_enter();
    assert!(!session.drop_file(Some(png("photo.png"))));
    assert!(!session.is_drag_over());
    assert_eq!(session.error(), Some(INVALID_FILE_MESSAGE));

    session.drag_enter();
    assert!(session.drop_file(Some(pdf("resume.pdf"))));
    assert!(!session.is_drag_over());
    assert_eq!(session.error(), None);
    assert!(session.selected_file().is_some());
}

#[tokio::test]
async fn submit_without_file_never_reaches_backend() {
    let backend = FakeBackend::healthy_with(Ok(good_result()));
    let mut session = healthy_session();

    let rejection = session.submit(&backend).await.expect_err("rejected");
    assert_eq!(rejection, SubmitRejection::MissingFile);
    assert_eq!(session.error(), Some(MISSING_FILE_MESSAGE));
    assert_eq!(backend.analyze_calls(), 0);
}

#[tokio::test]
async fn submit_with_unusable_backend_never_reaches_backend() {
    let backend = FakeBackend::healthy_with(Ok(good_result()));

    // Probe still outstanding.
    let mut unknown = ReviewSession::new();
    unknown.select_file(Some(pdf("resume.pdf")));
    assert_eq!(
        unknown.submit(&backend).await,
        Err(SubmitRejection::BackendUnavailable)
    );
    assert_eq!(unknown.error(), Some(BACKEND_NOT_CONFIGURED_MESSAGE));

    let mut unconfigured = ReviewSession::new();
    unconfigured.record_health(HealthStatus {
        healthy: true,
        api_configured: false,
    });
    unconfigured.select_file(Some(pdf("resume.pdf")));
    assert_eq!(
        unconfigured.submit(&backend).await,
        Err(SubmitRejection::BackendUnavailable)
    );

    assert_eq!(backend.analyze_calls(), 0);
    assert_eq!(unconfigured.submission(), SubmissionState::Idle);
}

#[tokio::test]
async fn failed_startup_probe_blocks_submit_with_configuration_message() {
    let backend = FakeBackend::unhealthy();
    let mut session = ReviewSession::new();

    let health = session.start(&backend).await;
    assert!(!health.usable());
    assert!(!session.backend_usable());

    assert!(session.select_file(Some(pdf("resume.pdf"))));
    session.submit(&backend).await.expect_err("rejected");

    assert_eq!(session.error(), Some(BACKEND_NOT_CONFIGURED_MESSAGE));
    assert_eq!(backend.probe_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.analyze_calls(), 0);
}

#[tokio::test]
async fn successful_submit_stores_result_and_returns_to_idle() {
    let backend = FakeBackend::healthy_with(Ok(good_result()));
    let mut session = ReviewSession::new();
    session.start(&backend).await;
    session.select_file(Some(pdf("resume.pdf")));
    assert!(session.can_submit());

    session.submit(&backend).await.expect("submitted");

    assert_eq!(session.submission(), SubmissionState::Idle);
    assert_eq!(session.error(), None);
    assert_eq!(session.result(), Some(&good_result()));
    assert_eq!(backend.analyze_calls(), 1);
    // The file stays selected so the user can resubmit.
    assert!(session.can_submit());
}

#[tokio::test]
async fn failed_submit_records_message_and_returns_to_idle() {
    for (error, expected) in [
        (
            AnalysisError::rejected(500, Some("file too large".to_string())),
            "file too large",
        ),
        (AnalysisError::rejected(400, None), "Analysis failed"),
        (AnalysisError::Unreachable, NETWORK_ERROR_MESSAGE),
    ] {
        let backend = FakeBackend::healthy_with(Err(error));
        let mut session = healthy_session();
        session.select_file(Some(pdf("resume.pdf")));

        session.submit(&backend).await.expect("submitted");

        assert_eq!(session.error(), Some(expected));
        assert!(session.result().is_none());
        assert_eq!(session.submission(), SubmissionState::Idle);
    }
}

#[test]
fn begin_submit_clears_previous_outcome_and_blocks_second_submit() {
    let mut session = healthy_session();
    session.select_file(Some(pdf("resume.pdf")));
    session.begin_submit().expect("first submit");
    session.settle(Err(AnalysisError::Unreachable));
    assert!(session.error().is_some());

    let file = session.begin_submit().expect("retry");
    assert_eq!(file.name(), "resume.pdf");
    assert_eq!(session.error(), None);
    assert!(session.is_in_flight());
    assert!(!session.can_submit());

    assert_eq!(
        session.begin_submit().expect_err("second submit"),
        SubmitRejection::AlreadyInFlight
    );
    assert_eq!(session.error(), None);
    assert!(session.is_in_flight());

    session.settle(Ok(good_result()));
    assert_eq!(session.submission(), SubmissionState::Idle);
}

#[tokio::test]
async fn dropping_pending_submit_returns_to_idle() {
    let mut session = healthy_session();
    session.select_file(Some(pdf("resume.pdf")));

    let outcome =
        tokio::time::timeout(Duration::from_millis(20), session.submit(&StalledBackend)).await;
    assert!(outcome.is_err(), "stalled backend must not complete");

    assert_eq!(session.submission(), SubmissionState::Idle);
    assert!(session.result().is_none());
}

#[test]
fn result_reveal_fires_once_per_appearance() {
    let mut session = healthy_session();
    session.select_file(Some(pdf("resume.pdf")));
    assert!(!session.take_result_reveal());

    session.begin_submit().expect("submit");
    session.settle(Ok(good_result()));
    assert!(session.take_result_reveal());
    assert!(!session.take_result_reveal());

    session.begin_submit().expect("resubmit");
    session.settle(Ok(good_result()));
    assert!(session.take_result_reveal());

    // A failure never reveals.
    session.begin_submit().expect("third submit");
    session.settle(Err(AnalysisError::Unreachable));
    assert!(!session.take_result_reveal());
}

#[test]
fn upload_limit_is_opt_in() {
    let big = FileCandidate::from_bytes("big.pdf", Some(PDF_MEDIA_TYPE), vec![0u8; 6 * 1024 * 1024]);

    let mut unlimited = ReviewSession::new();
    assert!(unlimited.select_file(Some(big.clone())));

    let mut limited = ReviewSession::with_upload_limit(Some(5 * 1024 * 1024));
    assert!(!limited.select_file(Some(big)));
    assert_eq!(limited.error(), Some("File exceeds the 5MB upload limit"));
    assert!(limited.selected_file().is_none());

    assert!(limited.select_file(Some(pdf("small.pdf"))));
}

#[test]
fn upload_limit_message_formats_fractional_megabytes() {
    assert_eq!(upload_limit_message(1536 * 1024), "File exceeds the 1.5MB upload limit");
}
