//! Applies backend events to the interaction state.

use client_core::{AnalysisError, ReviewSession};

use crate::controller::events::{UiError, UiErrorKind, UiEvent};

/// Status shown outside the review flow itself.
#[derive(Debug, Default)]
pub struct ViewStatus {
    pub status: String,
    pub banner: Option<UiError>,
}

pub fn apply_ui_event(session: &mut ReviewSession, view: &mut ViewStatus, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            view.status = message;
        }
        UiEvent::HealthProbed(health) => {
            session.record_health(health);
            view.status = if health.usable() {
                "Backend ready".to_string()
            } else if health.healthy {
                "Backend reachable but not configured".to_string()
            } else {
                "Backend unreachable".to_string()
            };
        }
        UiEvent::AnalysisFinished(outcome) => {
            view.status = match &outcome {
                Ok(result) => format!("Analysis received for {}", result.filename),
                Err(_) => "Analysis failed".to_string(),
            };
            session.settle(outcome);
        }
        UiEvent::Error(err) => {
            view.status = err.message().to_string();
            view.banner = Some(err);
        }
    }
}

/// Called once the worker's event channel disconnects.
pub fn handle_worker_exit(session: &mut ReviewSession, view: &mut ViewStatus) {
    let message = "backend worker stopped unexpectedly";
    tracing::error!("{message}");
    if session.is_in_flight() {
        session.settle(Err(AnalysisError::WorkerUnavailable(message.to_string())));
    }
    if view.banner.is_none() {
        view.banner = Some(UiError::new(
            UiErrorKind::WorkerLost,
            format!("{message}; restart the app"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use client_core::{AnalysisResult, FileCandidate, HealthStatus, SubmissionState};
    use shared::domain::PDF_MEDIA_TYPE;

    const HEALTHY: HealthStatus = HealthStatus {
        healthy: true,
        api_configured: true,
    };

    fn in_flight_session() -> ReviewSession {
        let mut session = ReviewSession::new();
        session.record_health(HEALTHY);
        session.select_file(Some(FileCandidate::from_bytes(
            "resume.pdf",
            Some(PDF_MEDIA_TYPE),
            b"%PDF".to_vec(),
        )));
        session.begin_submit().expect("submit");
        session
    }

    #[test]
    fn health_event_records_status() {
        let mut session = ReviewSession::new();
        let mut view = ViewStatus::default();
        assert!(session.health().is_none());

        apply_ui_event(
            &mut session,
            &mut view,
            UiEvent::HealthProbed(HealthStatus {
                healthy: true,
                api_configured: false,
            }),
        );
        assert!(!session.backend_usable());
        assert_eq!(view.status, "Backend reachable but not configured");

        apply_ui_event(&mut session, &mut view, UiEvent::HealthProbed(HEALTHY));
        assert!(session.backend_usable());
        assert_eq!(view.status, "Backend ready");
    }

    #[test]
    fn analysis_success_settles_and_requests_reveal() {
        let mut session = in_flight_session();
        let mut view = ViewStatus::default();

        apply_ui_event(
            &mut session,
            &mut view,
            UiEvent::AnalysisFinished(Ok(AnalysisResult {
                analysis: "Good structure...".to_string(),
                filename: "resume.pdf".to_string(),
                model: None,
            })),
        );

        assert_eq!(session.submission(), SubmissionState::Idle);
        assert_eq!(
            session.result().map(|r| r.filename.as_str()),
            Some("resume.pdf")
        );
        assert!(session.take_result_reveal());
        assert_eq!(view.status, "Analysis received for resume.pdf");
    }

    #[test]
    fn analysis_failure_settles_with_message() {
        let mut session = in_flight_session();
        let mut view = ViewStatus::default();

        apply_ui_event(
            &mut session,
            &mut view,
            UiEvent::AnalysisFinished(Err(AnalysisError::rejected(
                500,
                Some("file too large".to_string()),
            ))),
        );

        assert_eq!(session.submission(), SubmissionState::Idle);
        assert_eq!(session.error(), Some("file too large"));
        assert!(session.result().is_none());
    }

    #[test]
    fn worker_exit_releases_in_flight_submission() {
        let mut session = in_flight_session();
        let mut view = ViewStatus::default();

        handle_worker_exit(&mut session, &mut view);

        assert!(!session.is_in_flight());
        assert!(session
            .error()
            .is_some_and(|e| e.contains("backend worker stopped unexpectedly")));
        assert!(view.banner.as_ref().is_some_and(UiError::requires_restart));
    }

    #[test]
    fn error_event_sets_banner() {
        let mut session = ReviewSession::new();
        let mut view = ViewStatus::default();

        apply_ui_event(
            &mut session,
            &mut view,
            UiEvent::Error(UiError::new(
                UiErrorKind::WorkerStartup,
                "backend worker startup failure: failed to build runtime",
            )),
        );

        assert!(view.banner.is_some());
        assert!(view.status.starts_with("backend worker startup failure"));
    }
}
