//! HTTP API
//!
//! Single prediction endpoint plus health and stats. Structural request
//! validation (missing or mistyped `url`, malformed JSON) is handled by
//! axum's `Json` extractor before the service runs.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::inference::{InferenceStats, PredictionService};
use crate::UrlGuardError;

/// Shared API state.
#[derive(Clone)]
pub struct AppState {
    /// Classification service.
    pub service: Arc<PredictionService>,
}

/// Prediction request body.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// URL to classify.
    pub url: String,
}

/// Prediction response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    /// The submitted URL, echoed verbatim.
    pub url: String,
    /// 0 = malicious, 1 = safe.
    pub prediction: u8,
    /// Human-readable verdict.
    pub message: String,
}

/// Error envelope for failed requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub code: String,
    /// Error description.
    pub message: String,
}

/// Health response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Response timestamp.
    pub timestamp: String,
}

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .route("/stats", get(stats))
        // Any frontend may call this service; deliberately unrestricted.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Classify a URL.
async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let outcome = state.service.classify(&req.url)?;
    tracing::debug!(url = %req.url, label = outcome.verdict.label(), "classified url");

    Ok(Json(PredictResponse {
        url: req.url,
        prediction: outcome.verdict.label(),
        message: outcome.verdict.message().to_string(),
    }))
}

/// Health check
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Inference statistics
async fn stats(State(state): State<AppState>) -> Json<InferenceStats> {
    Json(state.service.stats())
}

/// Maps service errors onto HTTP responses.
struct ApiError(UrlGuardError);

impl From<UrlGuardError> for ApiError {
    fn from(err: UrlGuardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "prediction failed");
        let body = Json(ErrorResponse {
            code: "inference_error".into(),
            message: self.0.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
