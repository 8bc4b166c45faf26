//! Core of the schedule API.
//!
//! Pure types and functions shared by the server: the subject/task entity
//! model, request payloads and their merge rules, the record mapper, and the
//! storage contract implemented by the backends.

pub mod schedule;
pub mod serde;
pub mod storage;
