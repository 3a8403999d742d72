use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const HEALTH_PATH: &str = "/health";
pub const ANALYZE_PATH: &str = "/analyze";
/// Multipart form field carrying the résumé.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub api_configured: bool,
}

impl HealthResponse {
    pub const HEALTHY: &'static str = "healthy";

    pub fn healthy(api_configured: bool) -> Self {
        Self {
            status: Self::HEALTHY.to_string(),
            api_configured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Body of `GET /`: a short description of the service and its endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceIndex {
    pub message: String,
    pub endpoints: BTreeMap<String, String>,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
