//! Decides whether a sheet row opens a new course.

use schedule_core::models::ScheduleRow;
use schedule_core::normalize::is_decimal_digit;

/// Verdict for a single non-blank row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// The row declares a sequence number and subject code.
    NewCourse,
    /// The row adds to whichever course is currently open.
    Continuation,
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_decimal_digit)
}

/// `true` iff both columns are non-empty and made only of decimal digits,
/// in any script.
pub fn starts_new_course(sequence_no: &str, subject_code: &str) -> bool {
    all_digits(sequence_no) && all_digits(subject_code)
}

/// Classify a cleaned row by its sequence-number and subject-code columns.
pub fn classify(row: &ScheduleRow) -> RowKind {
    if starts_new_course(&row.sequence_no, &row.subject_code) {
        RowKind::NewCourse
    } else {
        RowKind::Continuation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_columns_open_course() {
        assert!(starts_new_course("1", "101"));
        assert!(starts_new_course("0012", "2110101"));
    }

    #[test]
    fn test_thai_numeral_columns_open_course() {
        assert!(starts_new_course("๑", "๒๑๑๐"));
        assert!(starts_new_course("1", "๒๑๑๐"));
        assert!(!starts_new_course("๑", "วิชา"));
    }

    #[test]
    fn test_non_digit_columns_continue() {
        assert!(!starts_new_course("", ""));
        assert!(!starts_new_course("1", ""));
        assert!(!starts_new_course("", "101"));
        assert!(!starts_new_course("1.", "101"));
        assert!(!starts_new_course("1", "CS101"));
        assert!(!starts_new_course("ที่", "รหัสวิชา"));
        assert!(!starts_new_course("-1", "101"));
        assert!(!starts_new_course("1 2", "101"));
    }

    #[test]
    fn test_classify_row() {
        let opening = ScheduleRow::from_cells(["3", "2110101", "Intro"]);
        let overflow = ScheduleRow::from_cells(["", "", "", "", "", "", "B2", "102"]);
        assert_eq!(classify(&opening), RowKind::NewCourse);
        assert_eq!(classify(&overflow), RowKind::Continuation);
    }
}
