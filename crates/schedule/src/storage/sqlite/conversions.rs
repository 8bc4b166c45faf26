//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and entity types.
//! Any column that does not decode surfaces as a conversion error, which the
//! error mapping turns into `MalformedRow`.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

use schedule_core::schedule::{Day, Subject, Task, TaskRecord};

/// Column offset of the joined subject in task queries.
const JOINED_SUBJECT_OFFSET: usize = 8;

// ============================================================================
// Subject conversions
// ============================================================================

/// Convert a SQLite row to a Subject.
///
/// Expected columns: id, label, color, archived, ts
pub fn row_to_subject(row: &Row) -> rusqlite::Result<Subject> {
    subject_at(row, 0)
}

fn subject_at(row: &Row, offset: usize) -> rusqlite::Result<Subject> {
    let id: i64 = row.get(offset)?;
    let label: String = row.get(offset + 1)?;
    let color: String = row.get(offset + 2)?;
    let archived: bool = row.get(offset + 3)?;
    let ts: String = row.get(offset + 4)?;

    Ok(Subject {
        id,
        label,
        color,
        archived,
        ts: parse_datetime(&ts, offset + 4)?,
    })
}

// ============================================================================
// Task conversions
// ============================================================================

/// Convert a joined SQLite row to a TaskRecord.
///
/// Expected columns: id, subject_id, day, description, start_time, end_time,
/// archived, ts, followed by the subject columns from a LEFT JOIN (all NULL
/// when the subject is missing).
pub fn row_to_task_record(row: &Row) -> rusqlite::Result<TaskRecord> {
    let id: i64 = row.get(0)?;
    let subject_id: i64 = row.get(1)?;
    let day: String = row.get(2)?;
    let description: Option<String> = row.get(3)?;
    let start_time: String = row.get(4)?;
    let end_time: String = row.get(5)?;
    let archived: bool = row.get(6)?;
    let ts: String = row.get(7)?;

    let task = Task {
        id,
        subject_id,
        day: parse_day(&day, 2)?,
        description,
        start_time,
        end_time,
        archived,
        ts: parse_datetime(&ts, 7)?,
    };

    let joined_id: Option<i64> = row.get(JOINED_SUBJECT_OFFSET)?;
    let subject = match joined_id {
        Some(_) => Some(subject_at(row, JOINED_SUBJECT_OFFSET)?),
        None => None,
    };

    Ok(TaskRecord { task, subject })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a day from its stored name.
fn parse_day(s: &str, column: usize) -> rusqlite::Result<Day> {
    s.parse::<Day>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339, microsecond precision).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
