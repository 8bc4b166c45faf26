//! SQLite repository implementation.
//!
//! Implements the repository traits from `schedule_core::storage` using SQLite.
//! Each operation runs as one closure on the connection thread inside a single
//! transaction; returning early drops the transaction, which rolls it back.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection as SqlConnection, OptionalExtension, Transaction};
use tokio_rusqlite::Connection;

use schedule_core::schedule::{
    apply_subject_patch, apply_task_patch, toggle_subject, toggle_task, NewSubject, NewTask,
    Subject, SubjectPatch, Task, TaskPatch, TaskRecord,
};
use schedule_core::storage::{RepositoryError, Result, SubjectRepository, TaskRepository};

use super::conversions::{format_datetime, row_to_subject, row_to_task_record};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id, with_duplicate_key};
use super::schema;

const SUBJECT: &str = "Subject";
const TASK: &str = "Task";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for subjects and tasks.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Enable foreign keys and create the tables. Safe to run on every start.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CONNECTION_PRAGMAS)
                .map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Runs a trivial query to check the store is reachable.
    pub async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Database"))
    }

    /// Runs `f` inside one transaction and commits it.
    async fn transact<T, F>(&self, f: F) -> std::result::Result<T, tokio_rusqlite::Error>
    where
        F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let value = f(&tx).map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(value)
            })
            .await
    }
}

fn fetch_subject(conn: &SqlConnection, id: i64) -> rusqlite::Result<Option<Subject>> {
    conn.query_row(schema::SELECT_SUBJECT_BY_ID, [id], row_to_subject)
        .optional()
}

fn fetch_subject_by_label(conn: &SqlConnection, label: &str) -> rusqlite::Result<Option<Subject>> {
    conn.query_row(schema::SELECT_SUBJECT_BY_LABEL, [label], row_to_subject)
        .optional()
}

fn fetch_task(conn: &SqlConnection, id: i64) -> rusqlite::Result<Option<TaskRecord>> {
    conn.query_row(schema::SELECT_TASK_BY_ID, [id], row_to_task_record)
        .optional()
}

/// Fails with `QueryReturnedNoRows` when a write matched nothing, so the
/// caller reports `NotFound` instead of pretending the write happened.
fn require_affected(rows: usize) -> rusqlite::Result<()> {
    if rows == 0 {
        Err(rusqlite::Error::QueryReturnedNoRows)
    } else {
        Ok(())
    }
}

// ============================================================================
// SubjectRepository implementation
// ============================================================================

#[async_trait]
impl SubjectRepository for SqliteRepository {
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.transact(|tx| {
            let mut stmt = tx.prepare(schema::SELECT_SUBJECTS)?;
            let subjects = stmt
                .query_map([], row_to_subject)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(subjects)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, SUBJECT))
    }

    async fn get_subject(&self, id: i64) -> Result<Option<Subject>> {
        self.transact(move |tx| fetch_subject(tx, id))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, SUBJECT))
    }

    async fn get_subject_by_label(&self, label: &str) -> Result<Option<Subject>> {
        let label = label.to_string();

        self.transact(move |tx| fetch_subject_by_label(tx, &label))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, SUBJECT))
    }

    async fn insert_subject(&self, draft: &NewSubject) -> Result<Subject> {
        let label = draft.label.clone();
        let color = draft.color.clone();
        let ts = format_datetime(&Utc::now());
        let key = draft.label.clone();

        let inserted = self
            .transact(move |tx| {
                if fetch_subject_by_label(tx, &label)?.is_some() {
                    return Ok(None);
                }
                tx.execute(schema::INSERT_SUBJECT, params![label, color, ts])?;
                let id = tx.last_insert_rowid();
                tx.query_row(schema::SELECT_SUBJECT_BY_ID, [id], row_to_subject)
                    .map(Some)
            })
            .await
            .map_err(|e| with_duplicate_key(map_tokio_rusqlite_error(e, SUBJECT), &key))?;

        inserted.ok_or(RepositoryError::DuplicateKey {
            entity_type: SUBJECT,
            key,
        })
    }

    async fn update_subject(&self, existing: &Subject, patch: SubjectPatch) -> Result<Subject> {
        let merged = apply_subject_patch(existing, patch);
        let id = merged.id;
        let key = merged.label.clone();

        self.transact(move |tx| {
            let rows = tx.execute(
                schema::UPDATE_SUBJECT,
                params![merged.id, merged.label, merged.color, merged.archived],
            )?;
            require_affected(rows)?;
            tx.query_row(schema::SELECT_SUBJECT_BY_ID, [merged.id], row_to_subject)
        })
        .await
        .map_err(|e| with_duplicate_key(map_tokio_rusqlite_error_with_id(e, SUBJECT, id), &key))
    }

    /// Flips `archived` on the existing row, keeping its `id` and `ts`.
    ///
    /// Earlier versions of this API inserted a copy of the subject with the
    /// flag flipped; toggling now updates in place and never adds a row.
    async fn toggle_subject_archived(&self, existing: &Subject) -> Result<Subject> {
        self.update_subject(existing, toggle_subject(existing)).await
    }

    async fn delete_subject(&self, existing: &Subject) -> Result<()> {
        let id = existing.id;

        self.transact(move |tx| {
            let rows = tx.execute(schema::DELETE_SUBJECT, [id])?;
            require_affected(rows)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error_with_id(e, SUBJECT, id))
    }
}

// ============================================================================
// TaskRepository implementation
// ============================================================================

#[async_trait]
impl TaskRepository for SqliteRepository {
    async fn list_tasks(&self) -> Result<Vec<TaskRecord>> {
        self.transact(|tx| {
            let mut stmt = tx.prepare(schema::SELECT_TASKS)?;
            let records = stmt
                .query_map([], row_to_task_record)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, TASK))
    }

    async fn get_task(&self, id: i64) -> Result<Option<TaskRecord>> {
        self.transact(move |tx| fetch_task(tx, id))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, TASK))
    }

    async fn insert_task(&self, draft: &NewTask) -> Result<TaskRecord> {
        let subject_id = draft.subject_id;
        let day = draft.day.as_str();
        let description = draft.description.clone();
        let start_time = draft.start_time.clone();
        let end_time = draft.end_time.clone();
        let ts = format_datetime(&Utc::now());

        self.transact(move |tx| {
            tx.execute(
                schema::INSERT_TASK,
                params![subject_id, day, description, start_time, end_time, ts],
            )?;
            let id = tx.last_insert_rowid();
            fetch_task(tx, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, TASK))
    }

    async fn update_task(&self, existing: &Task, patch: TaskPatch) -> Result<TaskRecord> {
        let merged = apply_task_patch(existing, patch);
        let id = merged.id;

        self.transact(move |tx| {
            let rows = tx.execute(
                schema::UPDATE_TASK,
                params![
                    merged.id,
                    merged.subject_id,
                    merged.day.as_str(),
                    merged.description,
                    merged.start_time,
                    merged.end_time,
                    merged.archived
                ],
            )?;
            require_affected(rows)?;
            fetch_task(tx, merged.id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error_with_id(e, TASK, id))
    }

    /// Flips `archived` on the existing row, keeping its `id` and `ts`.
    async fn toggle_task_archived(&self, existing: &Task) -> Result<TaskRecord> {
        self.update_task(existing, toggle_task(existing)).await
    }

    async fn delete_task(&self, existing: &Task) -> Result<()> {
        let id = existing.id;

        self.transact(move |tx| {
            let rows = tx.execute(schema::DELETE_TASK, [id])?;
            require_affected(rows)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error_with_id(e, TASK, id))
    }
}
