use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    domain::{AnalysisResult, HealthStatus},
    error::ApiError,
    protocol::{AnalyzeResponse, HealthResponse, ANALYZE_PATH, HEALTH_PATH, UPLOAD_FIELD},
};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    error::{AnalysisError, ClientSetupError},
    settings::ClientSettings,
    types::SelectedFile,
};

/// The two calls the interaction flow makes against the analysis backend.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Never fails; any transport problem reports [`HealthStatus::UNHEALTHY`].
    async fn probe_health(&self) -> HealthStatus;

    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReviewClient {
    http: Client,
    base_url: String,
}

impl ReviewClient {
    pub fn new(base_url: &str) -> Result<Self, ClientSetupError> {
        Self::with_timeout(base_url, None)
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientSetupError> {
        Self::with_timeout(&settings.api_base_url, settings.request_timeout())
    }

    pub fn with_timeout(
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientSetupError> {
        let base_url = normalize_base_url(base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Validates an origin and strips trailing slashes so paths can be appended.
pub fn normalize_base_url(raw: &str) -> Result<String, ClientSetupError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|source| ClientSetupError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        _ => Err(ClientSetupError::UnsupportedScheme(raw.to_string())),
    }
}

#[async_trait]
impl ReviewBackend for ReviewClient {
    async fn probe_health(&self) -> HealthStatus {
        let url = self.endpoint(HEALTH_PATH);
        let response = match self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
        {
            Ok(response) => response,
            Err(error) => {
                warn!(%url, %error, "health probe failed");
                return HealthStatus::UNHEALTHY;
            }
        };

        match response.json::<HealthResponse>().await {
            Ok(body) => {
                let status = HealthStatus::from(body);
                info!(
                    healthy = status.healthy,
                    api_configured = status.api_configured,
                    "health probe completed"
                );
                status
            }
            Err(error) => {
                warn!(%url, %error, "health probe returned an undecodable body");
                HealthStatus::UNHEALTHY
            }
        }
    }

    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, AnalysisError> {
        let unreadable = |reason: String| AnalysisError::UnreadableFile {
            filename: file.name().to_string(),
            reason,
        };
        let bytes = file
            .read_bytes()
            .await
            .map_err(|err| unreadable(err.to_string()))?;
        let part = Part::bytes(bytes)
            .file_name(file.name().to_string())
            .mime_str(file.media_type())
            .map_err(|err| unreadable(err.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = self.endpoint(ANALYZE_PATH);
        debug!(
            %url,
            filename = file.name(),
            size_bytes = file.size_bytes(),
            "submitting resume for analysis"
        );
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|error| {
                warn!(%url, %error, "analyze request got no response");
                AnalysisError::Unreachable
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let detail = ApiError::from_body(&body).message();
            warn!(status = status.as_u16(), ?detail, "analysis rejected by backend");
            return Err(AnalysisError::rejected(status.as_u16(), detail));
        }

        let body = response.bytes().await.map_err(|error| {
            warn!(%url, %error, "analyze response body was cut off");
            AnalysisError::Unreachable
        })?;
        let payload: AnalyzeResponse = serde_json::from_slice(&body)
            .map_err(|err| AnalysisError::MalformedResponse(err.to_string()))?;
        info!(filename = %payload.filename, model = ?payload.model, "analysis received");
        Ok(payload.into())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
