//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `DuplicateKey` -> 400 (Bad Request)
/// - `ForeignKeyViolation` -> 500 (Internal Server Error)
/// - `MalformedRow` -> 500 (Internal Server Error)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use schedule_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Subject",
///     id: 7,
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::DuplicateKey { .. } => 400,
        RepositoryError::ForeignKeyViolation { .. } => 500,
        RepositoryError::MalformedRow(_) => 500,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
    }
}
