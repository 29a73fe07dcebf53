//! Row-by-row assembly of course records.
//!
//! [`CourseAggregator`] owns the parser state for one run: the schedule
//! built so far, the sequence number of the open course and the building
//! carried within it.

use schedule_core::models::{CourseRecord, ExamSchedule, ScheduleRow};
use schedule_core::normalize::{extract_trailing_integer, normalize_time_range};
use tracing::{debug, warn};

use crate::classifier::{classify, RowKind};
use crate::merger::{BuildingCarry, ContinuationMerger, MergeInput};

// ── RowOutcome ────────────────────────────────────────────────────────────────

/// What happened to a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Every column was empty.
    Blank,
    /// A course was opened; `allocated` tells whether the row also
    /// contributed an allocation.
    OpenedCourse { allocated: bool },
    /// A continuation row appended an allocation.
    Allocated,
    /// A continuation row carried nothing usable.
    Suppressed,
    /// A continuation row arrived before any course was open.
    Orphan,
}

// ── AggregationStats ──────────────────────────────────────────────────────────

/// Row counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationStats {
    pub rows_seen: usize,
    pub blank_rows: usize,
    pub courses_opened: usize,
    /// Course rows whose sequence number had already been used.
    pub duplicate_courses: usize,
    pub allocations: usize,
    pub suppressed_rows: usize,
    pub orphan_rows: usize,
}

impl AggregationStats {
    fn record(&mut self, outcome: RowOutcome) {
        self.rows_seen += 1;
        match outcome {
            RowOutcome::Blank => self.blank_rows += 1,
            RowOutcome::OpenedCourse { allocated } => {
                self.courses_opened += 1;
                if allocated {
                    self.allocations += 1;
                }
            }
            RowOutcome::Allocated => self.allocations += 1,
            RowOutcome::Suppressed => self.suppressed_rows += 1,
            RowOutcome::Orphan => self.orphan_rows += 1,
        }
    }
}

// ── CourseAggregator ──────────────────────────────────────────────────────────

/// Classifies rows and merges them into an [`ExamSchedule`].
#[derive(Debug, Default)]
pub struct CourseAggregator {
    schedule: ExamSchedule,
    current: Option<String>,
    carry: BuildingCarry,
    stats: AggregationStats,
}

impl CourseAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schedule from an ordered sequence of rows.
    pub fn aggregate<I>(rows: I) -> (ExamSchedule, AggregationStats)
    where
        I: IntoIterator<Item = ScheduleRow>,
    {
        let mut aggregator = Self::new();
        for row in rows {
            aggregator.push_row(&row);
        }
        aggregator.finish()
    }

    /// Feed one cleaned, padded row.
    pub fn push_row(&mut self, row: &ScheduleRow) -> RowOutcome {
        let outcome = if row.is_blank() {
            RowOutcome::Blank
        } else {
            match classify(row) {
                RowKind::NewCourse => self.open_course(row),
                RowKind::Continuation => self.continue_course(row),
            }
        };
        self.stats.record(outcome);
        outcome
    }

    /// Sequence number of the course currently receiving rows.
    pub fn current_course(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn stats(&self) -> &AggregationStats {
        &self.stats
    }

    /// Finalise the run.
    pub fn finish(self) -> (ExamSchedule, AggregationStats) {
        debug!(
            "Aggregated {} courses with {} allocations from {} rows ({} blank, {} suppressed, {} orphan)",
            self.schedule.len(),
            self.stats.allocations,
            self.stats.rows_seen,
            self.stats.blank_rows,
            self.stats.suppressed_rows,
            self.stats.orphan_rows,
        );
        (self.schedule, self.stats)
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn open_course(&mut self, row: &ScheduleRow) -> RowOutcome {
        let key = row.sequence_no.clone();
        self.carry.reset();

        let record = CourseRecord {
            code: row.subject_code.clone(),
            title: row.title.clone(),
            date: row.date.clone(),
            time: normalize_time_range(&row.time),
            sum_student: extract_trailing_integer(&row.total_count).unwrap_or(0),
            group: Vec::new(),
        };

        if self.schedule.insert(key.clone(), record).is_some() {
            warn!("Sequence number {} appears more than once; keeping the later course", key);
            self.stats.duplicate_courses += 1;
        }

        let entry = ContinuationMerger::merge_first_row(&MergeInput::from_row(row), &mut self.carry);
        let allocated = entry.is_some();
        if let (Some(entry), Some(course)) = (entry, self.schedule.get_mut(&key)) {
            course.group.push(entry);
        }

        self.current = Some(key);
        RowOutcome::OpenedCourse { allocated }
    }

    fn continue_course(&mut self, row: &ScheduleRow) -> RowOutcome {
        let Some(key) = self.current.as_deref() else {
            debug!("Skipping continuation row before any course: {:?}", row);
            return RowOutcome::Orphan;
        };

        match ContinuationMerger::merge_continuation(&MergeInput::from_row(row), &mut self.carry) {
            Some(entry) => {
                if let Some(course) = self.schedule.get_mut(key) {
                    course.group.push(entry);
                }
                RowOutcome::Allocated
            }
            None => RowOutcome::Suppressed,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
