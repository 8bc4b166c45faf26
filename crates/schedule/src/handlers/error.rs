use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use schedule_core::storage::{repository_error_to_status_code, RepositoryError};

/// Application error type that wraps `anyhow::Error`.
///
/// Repository errors and JSON body rejections keep their own status code.
/// Anything answered with a 5xx is logged and replaced by a generic message.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            rejection.status()
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let detail = if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Request failed");
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        } else {
            tracing::warn!(status = %status, error = %self.0, "Request rejected");
            match self.0.downcast_ref::<JsonRejection>() {
                Some(rejection) => rejection.body_text(),
                None => self.0.to_string(),
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
