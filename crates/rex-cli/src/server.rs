//! Upload web server for `rex serve`.
//!
//! Serves a single page UI and a small JSON API:
//! - `GET /health`
//! - `GET /api/sample`
//! - `POST /api/extract` (multipart `file` or `text`, optional `?format=`)

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use rex_core::error::DocumentError;
use rex_core::models::resume::Resume;
use rex_core::{
    export, extract_resume, extract_text, DocumentFormat, ExportFormat, ExtractionResult,
    RexConfig, RexError, SAMPLE_RESUME,
};

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Clone)]
struct AppState {
    config: Arc<RexConfig>,
}

/// Build the application router.
pub fn router(config: RexConfig) -> Router {
    let upload_limit = config.server.max_upload_size;
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/sample", get(sample))
        .route("/api/extract", post(extract))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error returned by API handlers as `{ "error": message }`.
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            error!("Request failed: {}", message);
        } else {
            warn!("Rejected request: {}", message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<RexError> for ApiError {
    fn from(err: RexError) -> Self {
        match err {
            RexError::Document(DocumentError::TooLarge { .. }) => {
                ApiError::PayloadTooLarge(err.to_string())
            }
            RexError::Document(_) | RexError::Extraction(_) => ApiError::BadRequest(err.to_string()),
            RexError::Export(_) | RexError::Io(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::BadRequest(err.body_text())
        }
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn sample() -> Json<serde_json::Value> {
    Json(json!({ "text": SAMPLE_RESUME }))
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    format: Option<String>,
}

/// A file field from the upload form.
struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// Skills grouped under one display category.
#[derive(Debug, Serialize)]
struct SkillGroup {
    category: &'static str,
    count: usize,
    skills: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ExtractResponse {
    resume: Resume,
    warnings: Vec<String>,
    processing_time_ms: u64,
    skill_categories: Vec<SkillGroup>,
}

impl From<ExtractionResult> for ExtractResponse {
    fn from(result: ExtractionResult) -> Self {
        let skill_categories = result
            .resume
            .skill_categories()
            .into_iter()
            .map(|(category, skills)| SkillGroup {
                category: category.label(),
                count: skills.len(),
                skills,
            })
            .collect();

        Self {
            resume: result.resume,
            warnings: result.warnings,
            processing_time_ms: result.processing_time_ms,
            skill_categories,
        }
    }
}

async fn extract(
    State(state): State<AppState>,
    Query(query): Query<ExtractQuery>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let format = match query.format.as_deref() {
        Some(name) => name
            .parse::<ExportFormat>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => ExportFormat::Json,
    };

    let mut upload = None;
    let mut text = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;

                // Browsers send an empty part when no file was chosen
                if !data.is_empty() {
                    debug!("Received upload {:?} ({} bytes)", file_name, data.len());
                    upload = Some(Upload {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
            }
            "text" => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    text = Some(value);
                }
            }
            other => debug!("Ignoring form field {:?}", other),
        }
    }

    let config = Arc::clone(&state.config);
    let result = match (upload, text) {
        (Some(upload), _) => tokio::task::spawn_blocking(move || extract_upload(&upload, &config)),
        (None, Some(text)) => tokio::task::spawn_blocking(move || extract_text(&text, &config)),
        (None, None) => {
            return Err(ApiError::BadRequest(
                "No resume file or text provided".to_string(),
            ));
        }
    }
    .await
    .map_err(|e| ApiError::Internal(format!("Extraction task failed: {}", e)))??;

    info!(
        "Extracted resume in {}ms (confidence {:.2})",
        result.processing_time_ms, result.resume.metadata.confidence
    );

    match format {
        ExportFormat::Json => Ok(Json(ExtractResponse::from(result)).into_response()),
        ExportFormat::Csv | ExportFormat::Report => {
            let body = export(&result.resume, format).map_err(RexError::from)?;
            let headers = [
                (header::CONTENT_TYPE, format!("{}; charset=utf-8", format.mime_type())),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", format.file_name()),
                ),
            ];
            Ok((headers, body).into_response())
        }
    }
}

fn extract_upload(upload: &Upload, config: &RexConfig) -> rex_core::Result<ExtractionResult> {
    let format = DocumentFormat::detect(
        upload.file_name.as_deref(),
        upload.content_type.as_deref(),
        &upload.data,
    )?;
    extract_resume(&upload.data, format, config)
}
