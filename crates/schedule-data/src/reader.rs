//! CSV discovery and loading for exam sheets.
//!
//! Reads the delimited export of the schedule spreadsheet, skips the preface
//! and header rows and hands cleaned [`ScheduleRow`]s to the aggregator.

use std::io::Read;
use std::path::{Path, PathBuf};

use schedule_core::error::{Result, ScheduleError};
use schedule_core::models::{ExamSchedule, ScheduleRow};
use tracing::{debug, warn};

use crate::aggregator::{AggregationStats, CourseAggregator};

const UTF8_BOM: char = '\u{feff}';

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `dir`, sorted by path.
pub fn find_csv_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Input directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Parse sheet rows from any reader.
///
/// The first `preface_rows` rows and the header row after them are
/// skipped. Blank lines count as rows, matching how the spreadsheet
/// exports its title block.
pub fn read_rows<R: Read>(mut reader: R, preface_rows: usize) -> Result<Vec<ScheduleRow>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let raw = split_records(&bytes)?;
    let skip = preface_rows + 1;

    if let Some(header) = raw.get(preface_rows) {
        debug!("Header row: {:?}", header);
    }

    Ok(raw
        .into_iter()
        .skip(skip)
        .map(ScheduleRow::from_cells)
        .collect())
}

/// Read and parse the sheet at `path`.
pub fn read_rows_from_path(path: &Path, preface_rows: usize) -> Result<Vec<ScheduleRow>> {
    let text = std::fs::read_to_string(path).map_err(|source| ScheduleError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text);
    let rows = read_rows(text.as_bytes(), preface_rows)?;
    debug!("File {}: {} data rows", path.display(), rows.len());
    Ok(rows)
}

/// Read the sheet at `path` and aggregate it into an [`ExamSchedule`].
pub fn load_schedule(path: &Path, preface_rows: usize) -> Result<(ExamSchedule, AggregationStats)> {
    if !path.exists() {
        return Err(ScheduleError::InputNotFound(path.to_path_buf()));
    }
    let rows = read_rows_from_path(path, preface_rows)?;
    Ok(CourseAggregator::aggregate(rows))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Split delimited text into records, keeping blank lines as empty records.
///
/// The `csv` reader drops empty lines. Each record's position is the byte
/// where the reader resumed, so the line breaks between that byte and the
/// record's first cell are the blank lines it skipped.
fn split_records(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records: Vec<Vec<String>> = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let resumed_at = record.position().map_or(0, |p| p.byte() as usize);
        for _ in 0..skipped_blank_lines(bytes, resumed_at) {
            records.push(Vec::new());
        }
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(records)
}

/// Count line breaks (`\n`, `\r\n` or a bare `\r`) from `start` up to the
/// first other byte.
///
/// A `\n` at `start` that completes the previous record's `\r\n` is not a
/// blank line.
fn skipped_blank_lines(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    if i > 0 && bytes.get(i - 1) == Some(&b'\r') && bytes.get(i) == Some(&b'\n') {
        i += 1;
    }

    let mut blanks = 0;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\n' => i += 1,
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => i += 2,
            b'\r' => i += 1,
            _ => break,
        }
        blanks += 1;
    }
    blanks
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const SHEET: &str = "\
Final exam schedule,,,,,,,,,
,,,,,,,,,
No,Code,Title,Date,Time,Total,Building,Room,Count,IDs
1,101,Intro,2024-05-01,0830-1030,Sec A 30,B1,101 Sec A,10,1001-1010
,,,,,,B2,102,5,1011-1015
";

    // ── split_records ─────────────────────────────────────────────────────────

    #[test]
    fn test_split_records_keeps_blank_lines() {
        let text = "title\n\nheader\nrow\n";
        let records = split_records(text.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                vec!["title".to_string()],
                vec![],
                vec!["header".to_string()],
                vec!["row".to_string()],
            ]
        );
    }

    #[test]
    fn test_split_records_multiline_cell() {
        let text = "a,\"two\nlines\"\n\nb\n";
        let records = split_records(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0][1], "two\nlines");
        assert!(records[1].is_empty());
        assert_eq!(records[2], vec!["b".to_string()]);
    }

    #[test]
    fn test_split_records_carriage_return_inside_cell() {
        let text = "\"Final\rschedule\"\n\nNo,Code\n1,101,Intro\n";
        let records = split_records(text.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                vec!["Final\rschedule".to_string()],
                vec![],
                vec!["No".to_string(), "Code".to_string()],
                vec!["1".to_string(), "101".to_string(), "Intro".to_string()],
            ]
        );
    }

    #[test]
    fn test_split_records_crlf_line_endings() {
        let text = "title\r\n\r\nheader\r\nrow\r\n";
        let records = split_records(text.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                vec!["title".to_string()],
                vec![],
                vec!["header".to_string()],
                vec!["row".to_string()],
            ]
        );
    }

    #[test]
    fn test_split_records_blank_line_after_header() {
        let text = "t\nh\n\n1,101\n";
        let records = split_records(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert!(records[2].is_empty());
        assert_eq!(records[3][0], "1");
    }

    // ── read_rows ─────────────────────────────────────────────────────────────

    #[test]
    fn test_read_rows_skips_preface_and_header() {
        let rows = read_rows(SHEET.as_bytes(), 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sequence_no, "1");
        assert_eq!(rows[1].building, "B2");
    }

    #[test]
    fn test_read_rows_truly_empty_preface_line() {
        let text = "Final exam schedule\n\nNo,Code\n1,101,Intro\n";
        let rows = read_rows(text.as_bytes(), 2).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Intro");
    }

    #[test]
    fn test_read_rows_zero_preface() {
        let text = "No,Code\n1,101\n";
        let rows = read_rows(text.as_bytes(), 0).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_read_rows_short_input() {
        let rows = read_rows("title\n".as_bytes(), 2).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_read_rows_ragged_rows_are_padded() {
        let text = "t\n\nh\n1,101\n,,,,,,,,,,,extra,cells\n";
        let rows = read_rows(text.as_bytes(), 2).unwrap();
        assert_eq!(rows[0].range, "");
        assert!(rows[1].is_blank());
    }

    // ── read_rows_from_path / load_schedule ───────────────────────────────────

    #[test]
    fn test_read_rows_from_path_strips_bom() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "bom.csv", &format!("\u{feff}{}", SHEET));
        let rows = read_rows_from_path(&path, 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sequence_no, "1");
    }

    #[test]
    fn test_load_schedule_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_schedule(&dir.path().join("nope.csv"), 2).unwrap_err();
        assert!(matches!(err, ScheduleError::InputNotFound(_)));
    }

    #[test]
    fn test_load_schedule_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.csv");
        std::fs::write(&path, [0x66, 0xff, 0xfe, 0x0a]).unwrap();
        let err = load_schedule(&path, 2).unwrap_err();
        assert!(matches!(err, ScheduleError::FileRead { .. }));
    }

    #[test]
    fn test_load_schedule_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "sheet.csv", SHEET);
        let (schedule, stats) = load_schedule(&path, 2).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.get("1").unwrap().group.len(), 2);
        assert_eq!(stats.rows_seen, 2);
    }

    // ── find_csv_files ────────────────────────────────────────────────────────

    #[test]
    fn test_find_csv_files_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("term2");
        std::fs::create_dir_all(&sub).unwrap();
        write_file(dir.path(), "b.csv", "x");
        write_file(dir.path(), "a.CSV", "x");
        write_file(dir.path(), "notes.txt", "x");
        write_file(&sub, "c.csv", "x");

        let files = find_csv_files(dir.path());
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv", "c.csv"]);
    }

    #[test]
    fn test_find_csv_files_nonexistent_path() {
        let files = find_csv_files(Path::new("/tmp/does-not-exist-exam-schedule-xyz"));
        assert!(files.is_empty());
    }
}
