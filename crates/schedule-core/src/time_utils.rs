use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::CourseRecord;

// ── Exam windows ──────────────────────────────────────────────────────────────

/// Date layouts seen in exam sheets, tried in order.
const DATE_FMTS: &[&str] = &["%a %d %b %y", "%d %b %y", "%a %d %b %Y", "%Y-%m-%d", "%d/%m/%Y"];

/// Parse a sheet date such as `"Fri 28 Nov 25"` or `"2024-05-01"`.
pub fn parse_exam_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    DATE_FMTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
}

/// Start and end of an exam from its date cell and normalised
/// `HH:MM-HH:MM` time.
///
/// Returns `None` when either the date or one of the two times fails to
/// parse.
pub fn exam_window(date: &str, time: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let day = parse_exam_date(date)?;
    let (start, end) = time.split_once('-')?;
    let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").ok()?;
    Some((day.and_time(start), day.and_time(end)))
}

impl CourseRecord {
    /// See [`exam_window`].
    pub fn window(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        exam_window(&self.date, &self.time)
    }
}

// ── Upcoming / past split ─────────────────────────────────────────────────────

/// Items partitioned around a reference instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingPast<T> {
    pub upcoming: Vec<T>,
    pub past: Vec<T>,
}

/// Sort `items` by start time and split them at `now`.
///
/// An item starting at or after `now` is upcoming. Items whose start cannot
/// be determined sort last and count as past. Ties keep their input order.
pub fn split_upcoming_past<T, F>(mut items: Vec<T>, now: NaiveDateTime, start_of: F) -> UpcomingPast<T>
where
    F: Fn(&T) -> Option<NaiveDateTime>,
{
    items.sort_by_key(|item| match start_of(item) {
        Some(start) => (0u8, Some(start)),
        None => (1u8, None),
    });

    let mut split = UpcomingPast {
        upcoming: Vec::new(),
        past: Vec::new(),
    };
    for item in items {
        match start_of(&item) {
            Some(start) if start >= now => split.upcoming.push(item),
            _ => split.past.push(item),
        }
    }
    split
}

// ── Tests ─────────────────────────────────────────────────────────────────────
