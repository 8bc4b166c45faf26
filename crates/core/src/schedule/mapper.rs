//! Record mapper: entities to API-facing views.
//!
//! Pure field copies. The only failure is a task whose subject could not be
//! joined, which is a data-integrity violation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{RepositoryError, Result};

use super::types::{Day, Subject, TaskRecord};

/// Subject as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectView {
    pub id: i64,
    pub label: String,
    pub color: String,
    pub archived: bool,
    pub ts: DateTime<Utc>,
}

/// Task as returned by the API, with its subject embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub id: i64,
    pub subject_id: i64,
    pub day: Day,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub archived: bool,
    pub ts: DateTime<Utc>,
    pub subject: SubjectView,
}

pub fn subject_to_view(subject: Subject) -> SubjectView {
    SubjectView {
        id: subject.id,
        label: subject.label,
        color: subject.color,
        archived: subject.archived,
        ts: subject.ts,
    }
}

/// Converts a joined task row into its view.
///
/// Fails with `MalformedRow` when the subject is missing from the join.
pub fn task_to_view(record: TaskRecord) -> Result<TaskView> {
    let TaskRecord { task, subject } = record;

    let subject = subject.ok_or_else(|| {
        RepositoryError::MalformedRow(format!(
            "task {} references missing subject {}",
            task.id, task.subject_id
        ))
    })?;

    Ok(TaskView {
        id: task.id,
        subject_id: task.subject_id,
        day: task.day,
        description: task.description,
        start_time: task.start_time,
        end_time: task.end_time,
        archived: task.archived,
        ts: task.ts,
        subject: subject_to_view(subject),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Task;

    fn ts() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-04T08:15:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn math() -> Subject {
        Subject {
            id: 1,
            label: "Math".to_string(),
            color: "blue".to_string(),
            archived: false,
            ts: ts(),
        }
    }

    fn lecture() -> Task {
        Task {
            id: 1,
            subject_id: 1,
            day: Day::Monday,
            description: None,
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            archived: false,
            ts: ts(),
        }
    }

    #[test]
    fn test_subject_to_view_copies_fields() {
        let view = subject_to_view(math());

        assert_eq!(view.id, 1);
        assert_eq!(view.label, "Math");
        assert_eq!(view.color, "blue");
        assert!(!view.archived);
        assert_eq!(view.ts, ts());
    }

    #[test]
    fn test_task_to_view_embeds_subject() {
        let record = TaskRecord {
            task: lecture(),
            subject: Some(math()),
        };

        let view = task_to_view(record).unwrap();

        assert_eq!(view.id, 1);
        assert_eq!(view.day, Day::Monday);
        assert_eq!(view.start_time, "09:00");
        assert_eq!(view.subject, subject_to_view(math()));
    }

    #[test]
    fn test_task_to_view_missing_subject_is_malformed() {
        let record = TaskRecord {
            task: lecture(),
            subject: None,
        };

        let result = task_to_view(record);

        assert!(matches!(result, Err(RepositoryError::MalformedRow(_))));
    }

    #[test]
    fn test_task_view_json_shape() {
        let view = task_to_view(TaskRecord {
            task: lecture(),
            subject: Some(math()),
        })
        .unwrap();

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["day"], "monday");
        assert_eq!(json["description"], serde_json::Value::Null);
        assert_eq!(json["subject"]["label"], "Math");
        assert_eq!(json["ts"], "2024-03-04T08:15:00Z");
    }
}
