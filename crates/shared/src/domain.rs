use serde::{Deserialize, Serialize};

use crate::protocol::{AnalyzeResponse, HealthResponse};

/// The only media type the client accepts for upload.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Size the UI advertises as the upload guidance ("up to 5MB").
pub const ADVERTISED_UPLOAD_LIMIT_BYTES: u64 = 5 * 1024 * 1024;

/// Backend readiness as reported by the health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub api_configured: bool,
}

impl HealthStatus {
    pub const UNHEALTHY: Self = Self {
        healthy: false,
        api_configured: false,
    };

    /// A backend is usable only when it is both up and configured.
    pub fn usable(&self) -> bool {
        self.healthy && self.api_configured
    }
}

impl From<HealthResponse> for HealthStatus {
    fn from(value: HealthResponse) -> Self {
        Self {
            healthy: value.status == HealthResponse::HEALTHY,
            api_configured: value.api_configured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl From<AnalyzeResponse> for AnalysisResult {
    fn from(value: AnalyzeResponse) -> Self {
        Self {
            analysis: value.analysis,
            filename: value.filename,
            model: value.model,
        }
    }
}
