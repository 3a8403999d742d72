//! Local stand-in for the résumé analysis service. Speaks the same HTTP contract
//! and returns canned feedback, so the clients can be exercised end to end.

use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use serde_json::json;
use shared::{
    domain::ADVERTISED_UPLOAD_LIMIT_BYTES,
    error::{ApiError, ErrorDetail, ValidationIssue},
    protocol::{
        AnalyzeResponse, HealthResponse, ServiceIndex, ANALYZE_PATH, HEALTH_PATH, UPLOAD_FIELD,
    },
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Requests above this are refused before the handler sees them.
const MAX_REQUEST_BYTES: usize = 64 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "elevatecv-mock-backend")]
struct Cli {
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: String,
    /// Presence of a key is what marks the AI service as configured.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    groq_api_key: Option<String>,
    /// Report the AI service as configured even without a key.
    #[arg(long)]
    assume_configured: bool,
    #[arg(long, default_value_t = ADVERTISED_UPLOAD_LIMIT_BYTES)]
    max_file_bytes: u64,
    /// Fail every analysis with this detail message.
    #[arg(long)]
    fail_with: Option<String>,
    #[arg(long, default_value = "mock-analyzer")]
    model: String,
}

#[derive(Debug, Clone)]
struct MockSettings {
    api_configured: bool,
    max_file_bytes: u64,
    fail_with: Option<String>,
    model: String,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            api_configured: true,
            max_file_bytes: ADVERTISED_UPLOAD_LIMIT_BYTES,
            fail_with: None,
            model: "mock-analyzer".to_string(),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = MockSettings {
        api_configured: cli.assume_configured
            || cli
                .groq_api_key
                .as_deref()
                .is_some_and(|key| !key.trim().is_empty()),
        max_file_bytes: cli.max_file_bytes,
        fail_with: cli.fail_with,
        model: cli.model,
    };
    info!(
        api_configured = settings.api_configured,
        max_file_bytes = settings.max_file_bytes,
        "mock backend settings"
    );

    let app = build_router(Arc::new(settings));
    let addr: SocketAddr = cli.bind.parse()?;
    info!(%addr, "mock backend listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(settings: Arc<MockSettings>) -> Router {
    Router::new()
        .route("/", get(index))
        .route(HEALTH_PATH, get(health))
        .route(ANALYZE_PATH, post(analyze))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(settings)
}

async fn index() -> Json<ServiceIndex> {
    let endpoints = BTreeMap::from([
        (
            format!("POST {ANALYZE_PATH}"),
            "Upload and analyze a resume (PDF only)".to_string(),
        ),
        (
            format!("GET {HEALTH_PATH}"),
            "Health check endpoint".to_string(),
        ),
    ]);
    Json(ServiceIndex {
        message: "Resume Review AI API".to_string(),
        endpoints,
    })
}

async fn health(State(settings): State<Arc<MockSettings>>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(settings.api_configured))
}

async fn analyze(
    State(settings): State<Arc<MockSettings>>,
    mut multipart: Multipart,
) -> ApiResult<AnalyzeResponse> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| reject(StatusCode::BAD_REQUEST, format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| {
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read file: {e}"),
            )
        })?;
        upload = Some((filename, bytes));
        break;
    }

    let Some((filename, bytes)) = upload else {
        return Err(missing_upload_field());
    };

    if !filename.ends_with(".pdf") {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Only PDF files are supported",
        ));
    }
    if bytes.len() as u64 > settings.max_file_bytes {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            format!(
                "File too large. Maximum size: {:.1}MB",
                settings.max_file_bytes as f64 / (1024.0 * 1024.0)
            ),
        ));
    }
    if !bytes.starts_with(b"%PDF") {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Could not extract text from PDF. Please ensure the PDF contains selectable text.",
        ));
    }
    if !settings.api_configured {
        return Err(reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            "AI service not configured. Please set GROQ_API_KEY.",
        ));
    }
    if let Some(detail) = &settings.fail_with {
        return Err(reject(StatusCode::INTERNAL_SERVER_ERROR, detail.clone()));
    }

    info!(%filename, size_bytes = bytes.len(), "serving canned analysis");
    Ok(Json(AnalyzeResponse {
        analysis: canned_analysis(&filename, bytes.len()),
        filename,
        model: Some(settings.model.clone()),
    }))
}

fn canned_analysis(filename: &str, size_bytes: usize) -> String {
    format!(
        "Overall Assessment\n\
         {filename} ({size_bytes} bytes) was received and read successfully.\n\n\
         Strengths\n\
         - Clear section headings make the document easy to scan.\n\
         - Experience is listed in reverse chronological order.\n\n\
         Suggestions\n\
         - Quantify achievements with concrete numbers where possible.\n\
         - Tailor the summary to the role you are applying for.\n"
    )
}

fn reject(status: StatusCode, detail: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    let detail = detail.into();
    warn!(status = status.as_u16(), %detail, "rejecting analysis request");
    (status, Json(ApiError::new(detail)))
}

fn missing_upload_field() -> (StatusCode, Json<ApiError>) {
    warn!("analysis request had no file field");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiError {
            detail: Some(ErrorDetail::Issues(vec![ValidationIssue {
                msg: "Field required".to_string(),
                loc: Some(json!(["body", UPLOAD_FIELD])),
            }])),
        }),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
