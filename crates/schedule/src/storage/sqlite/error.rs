//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError` from
//! `schedule_core::storage`. Constraint failures map to their semantic variants
//! and decoding failures to `MalformedRow`.

use schedule_core::storage::RepositoryError;

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_UNIQUE` → `RepositoryError::DuplicateKey`
/// - `SQLITE_CONSTRAINT_FOREIGNKEY` → `RepositoryError::ForeignKeyViolation`
/// - Column decoding errors → `RepositoryError::MalformedRow`
/// - Connection errors → `RepositoryError::ConnectionFailed`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, entity_type: &'static str) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::DuplicateKey {
                entity_type,
                key: "unknown".to_string(), // key not available from error
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            RepositoryError::ForeignKeyViolation { entity_type }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => {
            RepositoryError::MalformedRow(format!("{entity_type}: {err}"))
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a rusqlite error with a known ID to a RepositoryError.
fn map_rusqlite_error_with_id(
    err: &rusqlite::Error,
    entity_type: &'static str,
    id: i64,
) -> RepositoryError {
    match err {
        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound { entity_type, id },
        _ => map_rusqlite_error(err, entity_type),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// This is the main entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type)
        }
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error with a known ID to a RepositoryError.
///
/// Use this variant when the entity ID is known at the call site, so that a
/// vanished row is reported as `NotFound` for that ID.
pub fn map_tokio_rusqlite_error_with_id(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: i64,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error_with_id(rusqlite_err, entity_type, id)
        }
        _ => map_tokio_rusqlite_error(err, entity_type),
    }
}

/// Fills in the natural key of a `DuplicateKey` error, which SQLite does not
/// report. Other errors pass through unchanged.
pub fn with_duplicate_key(err: RepositoryError, key: &str) -> RepositoryError {
    match err {
        RepositoryError::DuplicateKey { entity_type, .. } => RepositoryError::DuplicateKey {
            entity_type,
            key: key.to_string(),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;
    use rusqlite::types::Type;

    fn constraint(extended_code: i32) -> tokio_rusqlite::Error {
        let sqlite_err = ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code,
        };
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None))
    }

    #[test]
    fn test_unique_constraint_maps_to_duplicate_key() {
        let result = map_tokio_rusqlite_error(constraint(ffi::SQLITE_CONSTRAINT_UNIQUE), "Subject");

        assert!(matches!(
            result,
            RepositoryError::DuplicateKey {
                entity_type: "Subject",
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_key_carries_label() {
        let result = with_duplicate_key(
            map_tokio_rusqlite_error_with_id(constraint(ffi::SQLITE_CONSTRAINT_UNIQUE), "Subject", 1),
            "Math",
        );

        assert_eq!(
            result,
            RepositoryError::DuplicateKey {
                entity_type: "Subject",
                key: "Math".to_string()
            }
        );
    }

    #[test]
    fn test_with_duplicate_key_passes_other_errors() {
        let err = RepositoryError::QueryFailed("boom".to_string());
        assert_eq!(with_duplicate_key(err.clone(), "Math"), err);
    }

    #[test]
    fn test_foreign_key_maps_to_foreign_key_violation() {
        let result = map_tokio_rusqlite_error(constraint(ffi::SQLITE_CONSTRAINT_FOREIGNKEY), "Task");

        assert_eq!(
            result,
            RepositoryError::ForeignKeyViolation { entity_type: "Task" }
        );
    }

    #[test]
    fn test_conversion_failure_maps_to_malformed_row() {
        let inner = std::io::Error::other("unknown day");
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            Box::new(inner),
        ));

        let result = map_tokio_rusqlite_error(err, "Task");

        assert!(matches!(result, RepositoryError::MalformedRow(_)));
    }

    #[test]
    fn test_invalid_column_type_maps_to_malformed_row() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::InvalidColumnType(
            3,
            "archived".to_string(),
            Type::Text,
        ));

        let result = map_tokio_rusqlite_error_with_id(err, "Subject", 1);

        assert!(matches!(result, RepositoryError::MalformedRow(_)));
    }

    #[test]
    fn test_no_rows_with_id_maps_to_not_found() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows);

        let result = map_tokio_rusqlite_error_with_id(err, "Task", 12);

        assert_eq!(
            result,
            RepositoryError::NotFound {
                entity_type: "Task",
                id: 12
            }
        );
    }

    #[test]
    fn test_connection_closed_maps_to_connection_failed() {
        let result = map_tokio_rusqlite_error(tokio_rusqlite::Error::ConnectionClosed, "Subject");

        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_other_error_maps_to_query_failed() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("test error")));

        let result = map_tokio_rusqlite_error(err, "Subject");

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }
}
