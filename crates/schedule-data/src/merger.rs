//! Turns the allocation columns of a row into an [`AllocationEntry`].
//!
//! The same composition rules apply to the first row of a course and to its
//! continuation rows; only the test for "does this row carry anything"
//! differs between the two paths (see [`has_any_first_row_signal`] and
//! [`has_any_continuation_signal`]).

use schedule_core::models::{AllocationEntry, ScheduleRow};
use schedule_core::normalize::extract_trailing_integer;

// ── BuildingCarry ─────────────────────────────────────────────────────────────

/// The last building named within the currently open course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildingCarry {
    last: String,
}

impl BuildingCarry {
    /// Forget the carried building. Called whenever a course opens.
    pub fn reset(&mut self) {
        self.last.clear();
    }

    /// Resolve the building for a row: a stated building wins and becomes
    /// the new carry, a blank one falls back to the carry.
    pub fn resolve(&mut self, building: &str) -> String {
        if building.is_empty() {
            self.last.clone()
        } else {
            self.last = building.to_string();
            self.last.clone()
        }
    }

    pub fn current(&self) -> &str {
        &self.last
    }
}

// ── MergeInput ────────────────────────────────────────────────────────────────

/// The allocation columns of one cleaned row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeInput<'a> {
    pub building: &'a str,
    pub room: &'a str,
    /// Source of the seat count.
    pub count: &'a str,
    /// Source of the `"Sec ..."` label appended to the room.
    pub section_source: &'a str,
    pub range: &'a str,
}

impl<'a> MergeInput<'a> {
    pub fn from_row(row: &'a ScheduleRow) -> Self {
        Self {
            building: &row.building,
            room: &row.room,
            count: &row.count_or_section,
            section_source: &row.count_or_section,
            range: &row.range,
        }
    }
}

// ── Field rules ───────────────────────────────────────────────────────────────

/// The whole section source when it starts with `sec` (any case), else `""`.
pub fn section_label(section_source: &str) -> &str {
    let is_section = section_source
        .get(..3)
        .map(|prefix| prefix.eq_ignore_ascii_case("sec"))
        .unwrap_or(false);
    if is_section {
        section_source
    } else {
        ""
    }
}

/// Room text with the section label appended after a single space.
pub fn compose_room(room: &str, label: &str) -> String {
    if label.is_empty() {
        room.trim().to_string()
    } else {
        format!("{} {}", room, label).trim().to_string()
    }
}

// ── Signal predicates ─────────────────────────────────────────────────────────

/// Whether a continuation row is worth merging at all.
///
/// Looks only at the row's own cells; the carried building is never
/// consulted here.
pub fn has_any_continuation_signal(input: &MergeInput<'_>) -> bool {
    [
        input.building,
        input.room,
        input.count,
        input.range,
        input.section_source,
    ]
    .iter()
    .any(|c| !c.is_empty())
}

/// Whether the first row of a course contributes an allocation.
///
/// A positive seat count alone is enough, even when every text column is
/// blank.
pub fn has_any_first_row_signal(building: &str, room: &str, range: &str, students: Option<u64>) -> bool {
    !building.is_empty() || !room.is_empty() || !range.is_empty() || students.is_some_and(|n| n > 0)
}

/// Whether a fully resolved continuation entry still carries nothing.
fn is_empty_allocation(building: &str, room: &str, range: &str, students: Option<u64>) -> bool {
    building.is_empty() && room.is_empty() && range.is_empty() && students.unwrap_or(0) == 0
}

// ── ContinuationMerger ────────────────────────────────────────────────────────

/// Stateless helper producing allocation entries; the building carry is
/// owned by the caller.
pub struct ContinuationMerger;

impl ContinuationMerger {
    /// Allocation carried by the row that opens a course, if any.
    pub fn merge_first_row(input: &MergeInput<'_>, carry: &mut BuildingCarry) -> Option<AllocationEntry> {
        let room = compose_room(input.room, section_label(input.section_source));
        let students = extract_trailing_integer(input.count);

        if !has_any_first_row_signal(input.building, &room, input.range, students) {
            return None;
        }

        Some(AllocationEntry {
            building: carry.resolve(input.building),
            room,
            students: students.unwrap_or(0),
            range: input.range.to_string(),
        })
    }

    /// Allocation carried by a continuation row, if any.
    pub fn merge_continuation(input: &MergeInput<'_>, carry: &mut BuildingCarry) -> Option<AllocationEntry> {
        if !has_any_continuation_signal(input) {
            return None;
        }

        let room = compose_room(input.room, section_label(input.section_source));
        let students = extract_trailing_integer(input.count);
        let building = if input.building.is_empty() {
            carry.current().to_string()
        } else {
            input.building.to_string()
        };

        if is_empty_allocation(&building, &room, input.range, students) {
            return None;
        }

        Some(AllocationEntry {
            building: carry.resolve(&building),
            room,
            students: students.unwrap_or(0),
            range: input.range.to_string(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
