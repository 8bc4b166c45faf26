//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// Connection setup. Foreign keys are off by default in SQLite and must be
/// enabled on every connection, outside any transaction.
pub const CONNECTION_PRAGMAS: &str = r#"
PRAGMA foreign_keys = ON;
"#;

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Subjects table
CREATE TABLE IF NOT EXISTS subject (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    label TEXT NOT NULL UNIQUE,
    color TEXT NOT NULL,
    archived INTEGER NOT NULL DEFAULT 0,
    ts TEXT NOT NULL
);

-- Tasks table
CREATE TABLE IF NOT EXISTS task (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    subject_id INTEGER NOT NULL,
    day TEXT NOT NULL,
    description TEXT,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    archived INTEGER NOT NULL DEFAULT 0,
    ts TEXT NOT NULL,
    FOREIGN KEY (subject_id) REFERENCES subject(id)
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_subject_label ON subject(label);
CREATE INDEX IF NOT EXISTS idx_task_subject_id ON task(subject_id);
"#;

/// Liveness probe for the readiness endpoint.
pub const PING: &str = "SELECT 1";

// Subject queries
pub const INSERT_SUBJECT: &str = r#"
INSERT INTO subject (label, color, archived, ts)
VALUES (?1, ?2, 0, ?3)
"#;

pub const SELECT_SUBJECTS: &str = r#"
SELECT id, label, color, archived, ts
FROM subject
"#;

pub const SELECT_SUBJECT_BY_ID: &str = r#"
SELECT id, label, color, archived, ts
FROM subject
WHERE id = ?1
"#;

pub const SELECT_SUBJECT_BY_LABEL: &str = r#"
SELECT id, label, color, archived, ts
FROM subject
WHERE label = ?1
"#;

pub const UPDATE_SUBJECT: &str = r#"
UPDATE subject
SET label = ?2, color = ?3, archived = ?4
WHERE id = ?1
"#;

pub const DELETE_SUBJECT: &str = r#"
DELETE FROM subject
WHERE id = ?1
"#;

// Task queries
pub const INSERT_TASK: &str = r#"
INSERT INTO task (subject_id, day, description, start_time, end_time, archived, ts)
VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)
"#;

pub const SELECT_TASKS: &str = r#"
SELECT t.id, t.subject_id, t.day, t.description, t.start_time, t.end_time, t.archived, t.ts,
       s.id, s.label, s.color, s.archived, s.ts
FROM task t
LEFT JOIN subject s ON s.id = t.subject_id
"#;

pub const SELECT_TASK_BY_ID: &str = r#"
SELECT t.id, t.subject_id, t.day, t.description, t.start_time, t.end_time, t.archived, t.ts,
       s.id, s.label, s.color, s.archived, s.ts
FROM task t
LEFT JOIN subject s ON s.id = t.subject_id
WHERE t.id = ?1
"#;

pub const UPDATE_TASK: &str = r#"
UPDATE task
SET subject_id = ?2, day = ?3, description = ?4, start_time = ?5, end_time = ?6, archived = ?7
WHERE id = ?1
"#;

pub const DELETE_TASK: &str = r#"
DELETE FROM task
WHERE id = ?1
"#;
