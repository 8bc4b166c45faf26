//! Subject CRUD handlers.
//!
//! These handlers use repository trait objects for database access.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use schedule_core::schedule::{subject_to_view, NewSubject, Subject, SubjectUpdate, SubjectView};
use schedule_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

/// Load a subject or fail with `NotFound`.
async fn require_subject(state: &AppState, id: i64) -> Result<Subject, AppError> {
    let subject = state
        .subject_repo
        .get_subject(id)
        .await?
        .ok_or(RepositoryError::NotFound {
            entity_type: "Subject",
            id,
        })?;

    Ok(subject)
}

/// List all subjects (GET /subjects).
pub async fn list_subjects(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubjectView>>, AppError> {
    let subjects = state.subject_repo.list_subjects().await?;

    Ok(Json(subjects.into_iter().map(subject_to_view).collect()))
}

/// Get a single subject by ID (GET /subjects/{id}).
pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SubjectView>, AppError> {
    let subject = require_subject(&state, id).await?;

    Ok(Json(subject_to_view(subject)))
}

/// Create a new subject (POST /subjects/add).
///
/// Rejects a label that is already taken with 400.
pub async fn create_subject(
    State(state): State<AppState>,
    payload: Result<Json<NewSubject>, JsonRejection>,
) -> Result<Json<SubjectView>, AppError> {
    let Json(draft) = payload?;
    tracing::debug!(payload = ?draft, "Received create subject request");

    if state
        .subject_repo
        .get_subject_by_label(&draft.label)
        .await?
        .is_some()
    {
        return Err(RepositoryError::DuplicateKey {
            entity_type: "Subject",
            key: draft.label,
        }
        .into());
    }

    let subject = state.subject_repo.insert_subject(&draft).await?;

    tracing::info!(subject_id = subject.id, label = %subject.label, "Created new subject");

    Ok(Json(subject_to_view(subject)))
}

/// Update a subject (PUT /subjects/update).
///
/// Only the fields present in the body are changed.
pub async fn update_subject(
    State(state): State<AppState>,
    payload: Result<Json<SubjectUpdate>, JsonRejection>,
) -> Result<Json<SubjectView>, AppError> {
    let Json(update) = payload?;
    let (id, patch) = update.into_parts();

    let existing = require_subject(&state, id).await?;
    let subject = state.subject_repo.update_subject(&existing, patch).await?;

    tracing::info!(subject_id = id, "Updated subject");

    Ok(Json(subject_to_view(subject)))
}

/// Toggle the archived flag of a subject (PATCH /subjects/{id}/archive).
pub async fn toggle_subject_archived(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SubjectView>, AppError> {
    let existing = require_subject(&state, id).await?;
    let subject = state.subject_repo.toggle_subject_archived(&existing).await?;

    tracing::info!(subject_id = id, archived = subject.archived, "Toggled subject archive");

    Ok(Json(subject_to_view(subject)))
}

/// Delete a subject by ID (DELETE /subjects/delete/{id}).
///
/// Fails while tasks still reference the subject.
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, AppError> {
    let existing = require_subject(&state, id).await?;
    state.subject_repo.delete_subject(&existing).await?;

    tracing::info!(subject_id = id, "Deleted subject");

    Ok(Json(true))
}
