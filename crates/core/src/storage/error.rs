use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: &'static str, id: i64 },
    #[error("{entity_type} already exists: {key}")]
    DuplicateKey {
        entity_type: &'static str,
        key: String,
    },
    #[error("Foreign key constraint violation for {entity_type}")]
    ForeignKeyViolation { entity_type: &'static str },
    #[error("Malformed row: {0}")]
    MalformedRow(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl RepositoryError {
    /// Returns true for failures the caller caused (as opposed to the server).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RepositoryError::NotFound { .. } | RepositoryError::DuplicateKey { .. }
        )
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
