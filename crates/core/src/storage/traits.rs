use async_trait::async_trait;

use crate::schedule::{NewSubject, NewTask, Subject, SubjectPatch, Task, TaskPatch, TaskRecord};

use super::Result;

/// Repository for subject operations.
///
/// Every method runs inside a single storage transaction.
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Lists every subject in storage order.
    async fn list_subjects(&self) -> Result<Vec<Subject>>;

    /// Gets a subject by its ID.
    async fn get_subject(&self, id: i64) -> Result<Option<Subject>>;

    /// Gets a subject by its unique label.
    async fn get_subject_by_label(&self, label: &str) -> Result<Option<Subject>>;

    /// Inserts a new subject and returns the stored row.
    ///
    /// Fails with `DuplicateKey` when the label is taken.
    async fn insert_subject(&self, draft: &NewSubject) -> Result<Subject>;

    /// Overlays `patch` onto `existing`, persists it and returns the stored row.
    ///
    /// Fails with `NotFound` when the row no longer exists.
    async fn update_subject(&self, existing: &Subject, patch: SubjectPatch) -> Result<Subject>;

    /// Flips the `archived` flag of the subject in place.
    async fn toggle_subject_archived(&self, existing: &Subject) -> Result<Subject>;

    /// Removes the subject.
    ///
    /// Fails with `ForeignKeyViolation` while tasks still reference it.
    async fn delete_subject(&self, existing: &Subject) -> Result<()>;
}

/// Repository for task operations.
///
/// Reads return the task joined with its subject.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Lists every task in storage order.
    async fn list_tasks(&self) -> Result<Vec<TaskRecord>>;

    /// Gets a task by its ID.
    async fn get_task(&self, id: i64) -> Result<Option<TaskRecord>>;

    /// Inserts a new task and returns the stored row.
    ///
    /// Fails with `ForeignKeyViolation` when `subject_id` does not exist.
    async fn insert_task(&self, draft: &NewTask) -> Result<TaskRecord>;

    /// Overlays `patch` onto `existing`, persists it and returns the stored row.
    async fn update_task(&self, existing: &Task, patch: TaskPatch) -> Result<TaskRecord>;

    /// Flips the `archived` flag of the task in place.
    async fn toggle_task_archived(&self, existing: &Task) -> Result<TaskRecord>;

    /// Removes the task.
    async fn delete_task(&self, existing: &Task) -> Result<()>;
}
