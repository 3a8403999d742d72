use thiserror::Error;

pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please ensure the backend is running.";

/// Failure of a single analyze call. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// No response was received at all.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Unreachable,
    /// The backend answered 2xx but the body was not an analysis payload.
    #[error("Unexpected response from backend: {0}")]
    MalformedResponse(String),
    #[error("Could not read {filename}: {reason}")]
    UnreadableFile { filename: String, reason: String },
    /// The local worker that performs requests is gone.
    #[error("Backend worker unavailable: {0}")]
    WorkerUnavailable(String),
}

impl AnalysisError {
    pub fn rejected(status: u16, detail: Option<String>) -> Self {
        Self::Rejected {
            status,
            message: detail.unwrap_or_else(|| ANALYSIS_FAILED_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientSetupError {
    #[error("invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
