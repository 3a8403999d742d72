use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ErrorDetail>,
}

/// `detail` is a plain string for handled errors, and a list of issues when the
/// request itself failed validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Issues(Vec<ValidationIssue>),
    Other(Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<Value>,
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(ErrorDetail::Message(detail.into())),
        }
    }

    /// Parses an error body, tolerating bodies that are not JSON at all.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Human-readable detail, if the server supplied a usable one.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            ErrorDetail::Message(text) if !text.trim().is_empty() => Some(text.clone()),
            ErrorDetail::Message(_) => None,
            ErrorDetail::Issues(issues) => {
                let joined = issues
                    .iter()
                    .map(|issue| issue.msg.trim())
                    .filter(|msg| !msg.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ");
                (!joined.is_empty()).then_some(joined)
            }
            ErrorDetail::Other(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
