use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A subject that owns scheduled tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: i64,
    /// Unique across all subjects.
    pub label: String,
    /// Free-form color value.
    pub color: String,
    pub archived: bool,
    /// Creation time, never changed after insert.
    pub ts: DateTime<Utc>,
}

/// A weekly slot belonging to a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub subject_id: i64,
    pub day: Day,
    pub description: Option<String>,
    /// Time of day as sent by the client, e.g. `09:00`.
    pub start_time: String,
    pub end_time: String,
    pub archived: bool,
    pub ts: DateTime<Utc>,
}

/// A task joined with the subject it points to.
///
/// `subject` is `None` only when the join target is missing, which the
/// mapper reports as a data-integrity failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub task: Task,
    pub subject: Option<Subject>,
}

/// Day of the week a task is scheduled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Lowercase name used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known day name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown day: {0}")]
pub struct DayParseError(pub String);

impl FromStr for Day {
    type Err = DayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" => Ok(Day::Monday),
            "tuesday" => Ok(Day::Tuesday),
            "wednesday" => Ok(Day::Wednesday),
            "thursday" => Ok(Day::Thursday),
            "friday" => Ok(Day::Friday),
            "saturday" => Ok(Day::Saturday),
            "sunday" => Ok(Day::Sunday),
            _ => Err(DayParseError(s.to_string())),
        }
    }
}
