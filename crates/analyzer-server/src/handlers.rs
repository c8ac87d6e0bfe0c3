//! HTTP Handlers

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use asset_analyzer::{
    AnalysisRequest, AnalysisResponse, AnalyzerError, ErrorKind, DISCLAIMER_TEXT,
};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct PingResponse {
    pub ok: bool,
    pub time: String,
}

#[derive(Serialize)]
pub struct DisclaimerResponse {
    pub text: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps analyzer failures onto status codes with an `{ "error": ... }` body
pub struct ApiError(AnalyzerError);

impl From<AnalyzerError> for ApiError {
    fn from(err: AnalyzerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => {
                tracing::error!("Analysis error: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Liveness check
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        time: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn disclaimer() -> Json<DisclaimerResponse> {
    Json(DisclaimerResponse {
        text: DISCLAIMER_TEXT,
    })
}

/// Classify, price and label an asset.
///
/// The body is parsed by hand so that malformed JSON gets the same
/// `{ "error": ... }` shape as every other failure.
pub async fn analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let value: Value = serde_json::from_slice(&body)
        .map_err(|e| AnalyzerError::Validation(format!("Invalid JSON body: {e}")))?;
    let request = AnalysisRequest::from_value(&value)?;

    tracing::info!(asset = %request.asset, amount = %request.amount, "analyze");
    let response = state.analyzer.analyze(&request).await?;

    Ok(Json(response))
}

/// Preflight requests answer 204 rather than the CORS layer's default 200
pub async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;

    if is_preflight && response.status().is_success() {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
