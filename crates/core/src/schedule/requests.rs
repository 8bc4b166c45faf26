//! API request types for subject and task operations.
//!
//! Drafts carry what a client supplies on create; the server assigns `id`,
//! `ts` and `archived`. Patches carry only the fields a client wants to
//! change, each one present or absent.

use serde::{Deserialize, Serialize};

use super::types::Day;

/// Request payload for creating a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubject {
    pub label: String,
    pub color: String,
}

impl NewSubject {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub subject_id: i64,
    pub day: Day,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
}

impl NewTask {
    pub fn new(
        subject_id: i64,
        day: Day,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            subject_id,
            day,
            description: None,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Set the task description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Fields of a subject that an update may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl SubjectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.color.is_none() && self.archived.is_none()
    }
}

/// Fields of a task that an update may change.
///
/// `description` is nullable, so it uses a nested option: `None` keeps the
/// stored value, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<Day>,
    #[serde(
        default,
        deserialize_with = "crate::serde::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject_id(mut self, subject_id: i64) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    pub fn with_day(mut self, day: Day) -> Self {
        self.day = Some(day);
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_times(mut self, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self.end_time = Some(end_time.into());
        self
    }

    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.subject_id.is_none()
            && self.day.is_none()
            && self.description.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.archived.is_none()
    }
}

/// Request payload for `PUT /subjects/update`.
///
/// `id` selects the row; every other field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubjectUpdate {
    pub id: i64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
}

impl SubjectUpdate {
    /// Splits the payload into the target ID and the patch to apply.
    pub fn into_parts(self) -> (i64, SubjectPatch) {
        let patch = SubjectPatch {
            label: self.label,
            color: self.color,
            archived: self.archived,
        };
        (self.id, patch)
    }
}

/// Request payload for `PUT /tasks/update`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskUpdate {
    pub id: i64,
    #[serde(default)]
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub day: Option<Day>,
    #[serde(default, deserialize_with = "crate::serde::deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
}

impl TaskUpdate {
    /// Splits the payload into the target ID and the patch to apply.
    pub fn into_parts(self) -> (i64, TaskPatch) {
        let patch = TaskPatch {
            subject_id: self.subject_id,
            day: self.day,
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
            archived: self.archived,
        };
        (self.id, patch)
    }
}
