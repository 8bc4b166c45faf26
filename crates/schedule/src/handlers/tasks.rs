//! Task CRUD handlers.
//!
//! Every response embeds the task's subject, joined at read time.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use schedule_core::schedule::{task_to_view, NewTask, Task, TaskUpdate, TaskView};
use schedule_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

async fn require_task(state: &AppState, id: i64) -> Result<Task, AppError> {
    let record = state
        .task_repo
        .get_task(id)
        .await?
        .ok_or(RepositoryError::NotFound {
            entity_type: "Task",
            id,
        })?;

    Ok(record.task)
}

/// List all tasks (GET /tasks).
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskView>>, AppError> {
    let records = state.task_repo.list_tasks().await?;

    let views = records
        .into_iter()
        .map(task_to_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(views))
}

/// Get a single task by ID (GET /tasks/{id}).
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TaskView>, AppError> {
    let record = state
        .task_repo
        .get_task(id)
        .await?
        .ok_or(RepositoryError::NotFound {
            entity_type: "Task",
            id,
        })?;

    Ok(Json(task_to_view(record)?))
}

/// Create a new task (POST /tasks/add).
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<Json<TaskView>, AppError> {
    let Json(draft) = payload?;
    tracing::debug!(payload = ?draft, "Received create task request");

    let record = state.task_repo.insert_task(&draft).await?;

    tracing::info!(
        task_id = record.task.id,
        subject_id = record.task.subject_id,
        day = %record.task.day,
        "Created new task"
    );

    Ok(Json(task_to_view(record)?))
}

/// Update a task (PUT /tasks/update).
///
/// Only the fields present in the body are changed; `"description": null`
/// clears the description.
pub async fn update_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskUpdate>, JsonRejection>,
) -> Result<Json<TaskView>, AppError> {
    let Json(update) = payload?;
    let (id, patch) = update.into_parts();

    let existing = require_task(&state, id).await?;
    let record = state.task_repo.update_task(&existing, patch).await?;

    tracing::info!(task_id = id, "Updated task");

    Ok(Json(task_to_view(record)?))
}

/// Toggle the archived flag of a task (PATCH /tasks/{id}/archive).
pub async fn toggle_task_archived(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TaskView>, AppError> {
    let existing = require_task(&state, id).await?;
    let record = state.task_repo.toggle_task_archived(&existing).await?;

    tracing::info!(task_id = id, archived = record.task.archived, "Toggled task archive");

    Ok(Json(task_to_view(record)?))
}

/// Delete a task by ID (DELETE /tasks/delete/{id}).
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, AppError> {
    let existing = require_task(&state, id).await?;
    state.task_repo.delete_task(&existing).await?;

    tracing::info!(task_id = id, "Deleted task");

    Ok(Json(true))
}
