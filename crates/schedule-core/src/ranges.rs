//! Matching student ids against the `range` column of allocations.
//!
//! A range cell holds comma-separated parts, each either a single id
//! (`"6530000021"`) or an inclusive span (`"6530000021-6530000121"`).

use crate::models::{AllocationEntry, CourseRecord, ExamSchedule};

/// A course paired with the allocation a particular student sits in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentExam<'a> {
    pub sequence_no: &'a str,
    pub course: &'a CourseRecord,
    pub allocation: &'a AllocationEntry,
}

/// Parse the leading run of ASCII digits of `s` (after leading whitespace).
fn leading_integer(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

/// `true` when `student_id` falls inside any part of `range`.
///
/// A student id without a leading number never matches.
pub fn is_student_in_range(student_id: &str, range: &str) -> bool {
    let Some(id) = leading_integer(student_id) else {
        return false;
    };

    range.split(',').map(str::trim).any(|part| {
        if part.contains('-') {
            let mut bounds = part.split('-').map(leading_integer);
            match (bounds.next().flatten(), bounds.next().flatten()) {
                (Some(start), Some(end)) => start <= id && id <= end,
                _ => false,
            }
        } else {
            leading_integer(part) == Some(id)
        }
    })
}

impl ExamSchedule {
    /// Every course in which `student_id` has a seat, in schedule order,
    /// paired with the first allocation whose range contains the id.
    pub fn exams_for_student<'a>(&'a self, student_id: &str) -> Vec<StudentExam<'a>> {
        self.iter()
            .filter_map(|(sequence_no, course)| {
                course
                    .group
                    .iter()
                    .find(|g| !g.range.is_empty() && is_student_in_range(student_id, &g.range))
                    .map(|allocation| StudentExam {
                        sequence_no,
                        course,
                        allocation,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocation(room: &str, range: &str) -> AllocationEntry {
        AllocationEntry {
            building: "B1".to_string(),
            room: room.to_string(),
            students: 10,
            range: range.to_string(),
        }
    }

    #[test]
    fn test_span_is_inclusive() {
        assert!(is_student_in_range("1001", "1001-1010"));
        assert!(is_student_in_range("1010", "1001-1010"));
        assert!(is_student_in_range("1005", "1001 - 1010"));
        assert!(!is_student_in_range("1011", "1001-1010"));
    }

    #[test]
    fn test_single_ids_and_lists() {
        assert!(is_student_in_range("42", "7, 42, 99"));
        assert!(is_student_in_range("1050", "1001-1010, 1050"));
        assert!(!is_student_in_range("43", "7, 42, 99"));
    }

    #[test]
    fn test_non_numeric_inputs_never_match() {
        assert!(!is_student_in_range("abc", "1-100"));
        assert!(!is_student_in_range("", "1-100"));
        assert!(!is_student_in_range("5", "all students"));
        assert!(!is_student_in_range("5", "1-"));
        assert!(!is_student_in_range("5", ""));
    }

    #[test]
    fn test_exams_for_student_picks_first_matching_group() {
        let mut schedule = ExamSchedule::new();
        schedule.insert(
            "1".to_string(),
            CourseRecord {
                code: "101".to_string(),
                group: vec![
                    allocation("101", "1001-1010"),
                    allocation("102", "1011-1020"),
                    allocation("103", "1015-1030"),
                ],
                ..Default::default()
            },
        );
        schedule.insert(
            "2".to_string(),
            CourseRecord {
                code: "202".to_string(),
                group: vec![allocation("201", "2001-2010")],
                ..Default::default()
            },
        );
        schedule.insert(
            "3".to_string(),
            CourseRecord {
                code: "303".to_string(),
                group: vec![allocation("301", "1000-1999")],
                ..Default::default()
            },
        );

        let exams = schedule.exams_for_student("1016");
        assert_eq!(exams.len(), 2);
        assert_eq!(exams[0].sequence_no, "1");
        assert_eq!(exams[0].allocation.room, "102");
        assert_eq!(exams[1].course.code, "303");
    }

    #[test]
    fn test_exams_for_student_none() {
        let schedule = ExamSchedule::new();
        assert!(schedule.exams_for_student("1").is_empty());
    }
}
