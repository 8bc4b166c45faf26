//! Patch overlay for subjects and tasks.
//!
//! A field present in the patch replaces the stored value; an absent field
//! keeps it. `id` and `ts` have no patch counterpart and are always carried
//! over from the existing entity.

use super::requests::{SubjectPatch, TaskPatch};
use super::types::{Subject, Task};

/// Returns `existing` with every field set in `patch` overwritten.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use schedule_core::schedule::{apply_subject_patch, Subject, SubjectPatch};
///
/// let existing = Subject {
///     id: 1,
///     label: "Math".to_string(),
///     color: "blue".to_string(),
///     archived: false,
///     ts: Utc::now(),
/// };
///
/// let merged = apply_subject_patch(&existing, SubjectPatch::new().with_color("red"));
/// assert_eq!(merged.color, "red");
/// assert_eq!(merged.label, "Math");
/// ```
pub fn apply_subject_patch(existing: &Subject, patch: SubjectPatch) -> Subject {
    let mut merged = existing.clone();
    if let Some(label) = patch.label {
        merged.label = label;
    }
    if let Some(color) = patch.color {
        merged.color = color;
    }
    if let Some(archived) = patch.archived {
        merged.archived = archived;
    }
    merged
}

/// Returns `existing` with every field set in `patch` overwritten.
pub fn apply_task_patch(existing: &Task, patch: TaskPatch) -> Task {
    let mut merged = existing.clone();
    if let Some(subject_id) = patch.subject_id {
        merged.subject_id = subject_id;
    }
    if let Some(day) = patch.day {
        merged.day = day;
    }
    if let Some(description) = patch.description {
        merged.description = description;
    }
    if let Some(start_time) = patch.start_time {
        merged.start_time = start_time;
    }
    if let Some(end_time) = patch.end_time {
        merged.end_time = end_time;
    }
    if let Some(archived) = patch.archived {
        merged.archived = archived;
    }
    merged
}

/// Patch that flips the subject's `archived` flag.
pub fn toggle_subject(existing: &Subject) -> SubjectPatch {
    SubjectPatch::new().with_archived(!existing.archived)
}

/// Patch that flips the task's `archived` flag.
pub fn toggle_task(existing: &Task) -> TaskPatch {
    TaskPatch::new().with_archived(!existing.archived)
}
