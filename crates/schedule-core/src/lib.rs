//! Core types for the exam schedule converter.
//!
//! Holds the course/allocation data model, the field normalisers used while
//! reading sheet cells, the error type and the CLI settings.

pub mod error;
pub mod models;
pub mod normalize;
pub mod ranges;
pub mod settings;
pub mod time_utils;

pub use error::{Result, ScheduleError};
pub use models::{AllocationEntry, CourseRecord, ExamSchedule, ScheduleRow, EXPECTED_COLUMNS};
