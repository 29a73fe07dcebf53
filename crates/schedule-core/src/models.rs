use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::normalize::clean;

/// Number of logical columns in an exam sheet row.
pub const EXPECTED_COLUMNS: usize = 10;

// ── ScheduleRow ───────────────────────────────────────────────────────────────

/// One cleaned spreadsheet row with its columns named by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleRow {
    pub sequence_no: String,
    pub subject_code: String,
    pub title: String,
    pub date: String,
    pub time: String,
    /// Enrolled-student total for the course.
    pub total_count: String,
    pub building: String,
    pub room: String,
    /// Seat count of the allocation, or a `"Sec ..."` section label.
    pub count_or_section: String,
    /// Student-number range seated in this allocation.
    pub range: String,
}

impl ScheduleRow {
    /// Build a row from raw cells, padding with empty cells or truncating to
    /// [`EXPECTED_COLUMNS`] and cleaning each cell.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned: Vec<String> = cells
            .into_iter()
            .take(EXPECTED_COLUMNS)
            .map(|c| clean(c.as_ref()))
            .collect();
        cleaned.resize(EXPECTED_COLUMNS, String::new());

        let mut it = cleaned.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Self {
            sequence_no: next(),
            subject_code: next(),
            title: next(),
            date: next(),
            time: next(),
            total_count: next(),
            building: next(),
            room: next(),
            count_or_section: next(),
            range: next(),
        }
    }

    /// `true` when every column is empty.
    pub fn is_blank(&self) -> bool {
        [
            &self.sequence_no,
            &self.subject_code,
            &self.title,
            &self.date,
            &self.time,
            &self.total_count,
            &self.building,
            &self.room,
            &self.count_or_section,
            &self.range,
        ]
        .iter()
        .all(|c| c.is_empty())
    }
}

// ── AllocationEntry / CourseRecord ────────────────────────────────────────────

/// One room (or section) allocation within a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub building: String,
    pub room: String,
    pub students: u64,
    pub range: String,
}

/// One exam sitting, keyed by its sequence number in the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub code: String,
    pub title: String,
    /// Exam date exactly as written in the sheet.
    pub date: String,
    /// `HH:MM-HH:MM` when recognisable, otherwise the cleaned cell text.
    pub time: String,
    pub sum_student: u64,
    pub group: Vec<AllocationEntry>,
}

// ── ExamSchedule ──────────────────────────────────────────────────────────────

/// Courses keyed by sequence number, iterated in first-seen order.
///
/// Serialises as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamSchedule {
    courses: IndexMap<String, CourseRecord>,
}

impl ExamSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn get(&self, sequence_no: &str) -> Option<&CourseRecord> {
        self.courses.get(sequence_no)
    }

    pub fn get_mut(&mut self, sequence_no: &str) -> Option<&mut CourseRecord> {
        self.courses.get_mut(sequence_no)
    }

    /// Store `record` under `sequence_no`.
    ///
    /// A new key is appended at the end. An existing key keeps its position
    /// and has its record replaced; the previous record is returned.
    pub fn insert(&mut self, sequence_no: String, record: CourseRecord) -> Option<CourseRecord> {
        self.courses.insert(sequence_no, record)
    }

    /// Iterate `(sequence_no, record)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CourseRecord)> {
        self.courses.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.courses.keys().map(String::as_str)
    }

    /// Total number of allocation entries across all courses.
    pub fn allocation_count(&self) -> usize {
        self.courses.values().map(|c| c.group.len()).sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
