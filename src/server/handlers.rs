// HTTP request handlers

use anyhow::anyhow;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::CrisisServer;
use crate::crisis::{CrisisAssessment, CrisisKeyword, CrisisResource};
use crate::errors::{KeywordError, SubmissionError};
use crate::storage::{Mood, NewSubmission, StressStats, Submission, SubmissionTag};

/// Create the main application router
pub fn create_router(server: Arc<CrisisServer>) -> Router {
    Router::new()
        // Crisis engine
        .route("/v1/assess", post(handle_assess))
        .route("/v1/keywords", get(list_keywords).post(add_keyword))
        .route("/v1/resources", get(list_resources))
        // Submission store
        .route(
            "/v1/submissions",
            get(list_submissions)
                .post(create_submission)
                .delete(wipe_submissions),
        )
        .route("/v1/submissions/purge", post(purge_submissions))
        .route(
            "/v1/submissions/:id",
            get(get_submission).delete(delete_submission),
        )
        .route("/v1/stats", get(get_stats))
        // Health and metrics
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .with_state(server)
}

/// Request body for /v1/assess
#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssessResponse {
    pub assessment: CrisisAssessment,
    pub resources: Vec<CrisisResource>,
}

/// Handle POST /v1/assess - Assess free text
async fn handle_assess(
    State(server): State<Arc<CrisisServer>>,
    Json(request): Json<AssessRequest>,
) -> Json<AssessResponse> {
    let detector = server.detector().read().await;
    let assessment = detector.detect_crisis(&request.text);
    let resources = detector.relevant_resources(&assessment);
    drop(detector);

    server.metrics().record_assessment(assessment.severity);

    Json(AssessResponse {
        assessment,
        resources,
    })
}

/// Handle GET /v1/keywords - Full keyword table
async fn list_keywords(State(server): State<Arc<CrisisServer>>) -> Json<Vec<CrisisKeyword>> {
    Json(server.detector().read().await.keywords())
}

/// Handle POST /v1/keywords - Append a keyword for this process
async fn add_keyword(
    State(server): State<Arc<CrisisServer>>,
    Json(keyword): Json<CrisisKeyword>,
) -> Result<(StatusCode, Json<CrisisKeyword>), AppError> {
    server
        .detector()
        .write()
        .await
        .add_keyword(keyword.clone())?;

    server.metrics().record_keyword_added();
    tracing::info!(keyword = %keyword.keyword, severity = %keyword.severity, "Keyword appended via API");

    Ok((StatusCode::CREATED, Json(keyword)))
}

/// Handle GET /v1/resources - All crisis resources
async fn list_resources(State(server): State<Arc<CrisisServer>>) -> Json<Vec<CrisisResource>> {
    Json(server.detector().read().await.all_resources())
}

/// Request body for POST /v1/submissions
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub content: String,
    pub mood: u8,
    #[serde(default)]
    pub tags: Vec<SubmissionTag>,
}

/// Handle POST /v1/submissions - Assess and store a submission
async fn create_submission(
    State(server): State<Arc<CrisisServer>>,
    Json(request): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<Submission>), AppError> {
    let mood = Mood::new(request.mood)?;

    let assessment = server.detector().read().await.detect_crisis(&request.content);
    let severity = assessment.severity;

    let submission = NewSubmission::new(request.content, mood)
        .with_tags(request.tags)
        .with_assessment(assessment);

    let store = Arc::clone(server.store());
    let stored = run_blocking(move || store.save(submission)).await?;

    // Rejected submissions are not counted as assessments
    server.metrics().record_assessment(severity);
    server.metrics().record_submission();

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Handle GET /v1/submissions - Non-expired submissions, newest first
async fn list_submissions(
    State(server): State<Arc<CrisisServer>>,
) -> Result<Json<Vec<Submission>>, AppError> {
    let store = Arc::clone(server.store());
    Ok(Json(run_blocking(move || store.list()).await?))
}

/// Handle GET /v1/submissions/:id
async fn get_submission(
    State(server): State<Arc<CrisisServer>>,
    Path(id): Path<String>,
) -> Result<Json<Submission>, AppError> {
    let store = Arc::clone(server.store());
    let lookup = id.clone();
    match run_blocking(move || store.get(&lookup)).await? {
        Some(submission) => Ok(Json(submission)),
        None => Err(AppError::not_found(format!("Submission not found: {}", id))),
    }
}

/// Handle DELETE /v1/submissions/:id
async fn delete_submission(
    State(server): State<Arc<CrisisServer>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let store = Arc::clone(server.store());
    let target = id.clone();
    if run_blocking(move || store.delete(&target)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("Submission not found: {}", id)))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PurgeResponse {
    pub deleted: usize,
}

/// Handle POST /v1/submissions/purge - Drop expired submissions
async fn purge_submissions(
    State(server): State<Arc<CrisisServer>>,
) -> Result<Json<PurgeResponse>, AppError> {
    let store = Arc::clone(server.store());
    let deleted = run_blocking(move || store.delete_expired()).await?;
    Ok(Json(PurgeResponse { deleted }))
}

/// Handle DELETE /v1/submissions - Emergency wipe
async fn wipe_submissions(State(server): State<Arc<CrisisServer>>) -> Result<StatusCode, AppError> {
    let store = Arc::clone(server.store());
    run_blocking(move || store.clear_all()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle GET /v1/stats
async fn get_stats(State(server): State<Arc<CrisisServer>>) -> Result<Json<StressStats>, AppError> {
    let store = Arc::clone(server.store());
    Ok(Json(run_blocking(move || store.stats()).await?))
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub keyword_count: usize,
}

/// Handle GET /health - Health check endpoint
pub async fn health_check(State(server): State<Arc<CrisisServer>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: server.uptime_seconds(),
        keyword_count: server.detector().read().await.keyword_count(),
    })
}

/// Handle GET /metrics - Prometheus metrics endpoint
pub async fn metrics_endpoint(State(server): State<Arc<CrisisServer>>) -> Result<Response, AppError> {
    let body = server.metrics().render()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
        body,
    )
        .into_response())
}

// Store calls take a blocking file lock
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| anyhow!("Store task failed: {}", e))?;
    Ok(result?)
}

/// Application error wrapper for proper HTTP error responses
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: anyhow!(message.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_type = match self.status {
            StatusCode::NOT_FOUND => "not_found_error",
            s if s.is_client_error() => "invalid_request_error",
            _ => "api_error",
        };

        if self.status.is_server_error() {
            tracing::error!(error = %self.error, "Request failed");
        } else {
            tracing::warn!(status = %self.status, error = %self.error, "Request rejected");
        }

        let body = serde_json::json!({
            "error": {
                "message": self.error.to_string(),
                "type": error_type
            }
        });

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        let status = if error.downcast_ref::<SubmissionError>().is_some() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else if error.downcast_ref::<KeywordError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self { status, error }
    }
}
