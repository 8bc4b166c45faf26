//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe (runs a query against the store)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe.
///
/// Returns 200 when the store answers a query, 503 otherwise.
pub async fn readyz(State(state): State<AppState>) -> Response {
    match state.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "healthy": true }))).into_response(),
        Err(error) => {
            tracing::error!(error = %error, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "healthy": false })),
            )
                .into_response()
        }
    }
}
