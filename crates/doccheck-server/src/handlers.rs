//! HTTP request handlers for the analysis service.
//!
//! Implements the document upload and health check endpoints using axum.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use doccheck_domain::UploadedDocument;
use doccheck_extractor::{AnalysisError, Analyzer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};

/// Multipart field carrying the uploaded documents
pub const FILES_FIELD: &str = "files";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Analysis pipeline shared by all requests
    pub analyzer: Arc<Analyzer>,
    /// Largest accepted `/analyze` body, in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create state with the default 25 MiB upload limit
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }

    /// Override the upload limit
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Model provider name
    pub provider: String,
    /// Model identifier
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Analysis pipeline error
    Analysis(AnalysisError),
    /// The multipart body could not be read
    Upload(MultipartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Analysis(e) => {
                let status = if e.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else if e.is_upstream_error() {
                    StatusCode::BAD_GATEWAY
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, e.to_string())
            }
            AppError::Upload(e) => (e.status(), format!("Failed to read upload: {}", e.body_text())),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        AppError::Analysis(e)
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Upload(e)
    }
}

/// POST /analyze - Find contradictions between uploaded documents
///
/// Responds with the model's JSON report as `application/json`.
async fn analyze_documents(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    // A body that is not multipart has no files part either
    let mut multipart = multipart.map_err(|rejection| {
        debug!("Rejected upload body: {}", rejection);
        AnalysisError::NoFiles
    })?;

    let uploads = read_uploads(&mut multipart).await?;
    info!("Received {} files", uploads.len());

    let body = state.analyzer.analyze(uploads).await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Collect every file part named `files`
///
/// Other fields, and `files` fields sent without a filename, are skipped.
async fn read_uploads(multipart: &mut Multipart) -> Result<Vec<UploadedDocument>, AppError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            debug!("Skipping non-file {} field", FILES_FIELD);
            continue;
        };

        let bytes = field.bytes().await?;
        debug!("Read {} ({} bytes)", filename, bytes.len());

        uploads.push(UploadedDocument::new(filename, bytes.to_vec()));
    }

    Ok(uploads)
}

/// GET /health - Liveness and model information
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let provider = state.analyzer.provider();
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        provider: provider.name().to_string(),
        model: provider.model().to_string(),
    })
}

/// Create the axum router with all routes
///
/// Every route accepts cross-origin requests from any origin.
pub fn create_router(state: AppState) -> AxumRouter {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    AxumRouter::new()
        .route(
            "/analyze",
            post(analyze_documents).layer(DefaultBodyLimit::max(state.max_upload_bytes)),
        )
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
