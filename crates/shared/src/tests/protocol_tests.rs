use super::*;
use crate::domain::{AnalysisResult, HealthStatus};

#[test]
fn health_response_without_api_flag_is_not_usable() {
    let response: HealthResponse =
        serde_json::from_str(r#"{"status":"healthy"}"#).expect("health json");
    assert!(!response.api_configured);

    let status = HealthStatus::from(response);
    assert!(status.healthy);
    assert!(!status.usable());
}

#[test]
fn health_is_usable_only_when_healthy_and_configured() {
    let configured = HealthStatus::from(HealthResponse::healthy(true));
    assert!(configured.usable());

    let degraded = HealthStatus::from(HealthResponse {
        status: "degraded".to_string(),
        api_configured: true,
    });
    assert!(!degraded.healthy);
    assert!(!degraded.usable());

    assert!(!HealthStatus::UNHEALTHY.usable());
}

#[test]
fn analyze_response_carries_optional_model() {
    let response: AnalyzeResponse = serde_json::from_str(
        r#"{"analysis":"Good structure...","filename":"resume.pdf","model":"llama-3.3-70b"}"#,
    )
    .expect("analyze json");
    let result = AnalysisResult::from(response);
    assert_eq!(result.analysis, "Good structure...");
    assert_eq!(result.filename, "resume.pdf");
    assert_eq!(result.model.as_deref(), Some("llama-3.3-70b"));
}

#[test]
fn analyze_response_requires_analysis_and_filename() {
    assert!(serde_json::from_str::<AnalyzeResponse>(r#"{"analysis":"only text"}"#).is_err());
    assert!(serde_json::from_str::<AnalyzeResponse>(r#"{"filename":"resume.pdf"}"#).is_err());
}
