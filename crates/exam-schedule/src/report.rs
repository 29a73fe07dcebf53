use chrono::NaiveDateTime;
use schedule_core::models::ExamSchedule;
use schedule_core::ranges::StudentExam;
use schedule_core::time_utils::split_upcoming_past;

// ── Student report ─────────────────────────────────────────────────────────────

fn exam_line(exam: &StudentExam<'_>) -> String {
    let course = exam.course;
    let seat = exam.allocation;
    let place = [seat.building.as_str(), seat.room.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "  {} {}  {} {}  {} (ids {})",
        course.date, course.time, course.code, course.title, place, seat.range
    )
}

/// Plain-text listing of every exam `student_id` sits, split at `now`.
pub fn render_student_report(schedules: &[&ExamSchedule], student_id: &str, now: NaiveDateTime) -> String {
    let exams: Vec<StudentExam<'_>> = schedules
        .iter()
        .flat_map(|s| s.exams_for_student(student_id))
        .collect();

    let split = split_upcoming_past(exams, now, |e| e.course.window().map(|(start, _)| start));

    let mut out = format!(
        "Exams for student {} ({} upcoming, {} past)\n",
        student_id,
        split.upcoming.len(),
        split.past.len()
    );
    for (heading, exams) in [("Upcoming", &split.upcoming), ("Past", &split.past)] {
        if exams.is_empty() {
            continue;
        }
        out.push_str(&format!("{}:\n", heading));
        for exam in exams {
            out.push_str(&exam_line(exam));
            out.push('\n');
        }
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
