//! End-to-end conversion: CSV sheet in, JSON schedule out.

use std::path::{Path, PathBuf};

use schedule_core::error::{Result, ScheduleError};
use schedule_core::models::ExamSchedule;
use tracing::{debug, warn};

use crate::aggregator::AggregationStats;
use crate::reader::{find_csv_files, load_schedule};
use crate::writer::{write_schedule, write_schedule_to};

// ── Public types ──────────────────────────────────────────────────────────────

/// Where the JSON of a conversion goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

/// Options shared by every file of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub preface_rows: usize,
    pub pretty: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            preface_rows: 2,
            pretty: true,
        }
    }
}

/// The outcome of converting one sheet.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: OutputTarget,
    pub schedule: ExamSchedule,
    pub stats: AggregationStats,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Convert the sheet at `input` and write it to `output`.
pub fn convert_file(input: &Path, output: OutputTarget, options: ConvertOptions) -> Result<Conversion> {
    let (schedule, stats) = load_schedule(input, options.preface_rows)?;

    match &output {
        OutputTarget::File(path) => write_schedule(&schedule, path, options.pretty)?,
        OutputTarget::Stdout => write_schedule_to(&schedule, std::io::stdout().lock(), options.pretty)?,
    }

    debug!(
        "Converted {}: {} courses, {} allocations",
        input.display(),
        schedule.len(),
        schedule.allocation_count()
    );

    Ok(Conversion {
        input: input.to_path_buf(),
        output,
        schedule,
        stats,
    })
}

/// Convert every `.csv` under `dir`, writing each next to its source with a
/// `.json` extension.
///
/// A file that fails to convert is logged and skipped; the run only fails
/// when no CSV file exists at all.
pub fn convert_directory(dir: &Path, options: ConvertOptions) -> Result<Vec<Conversion>> {
    let files = find_csv_files(dir);
    if files.is_empty() {
        return Err(ScheduleError::NoInputFiles(dir.to_path_buf()));
    }

    let mut conversions = Vec::with_capacity(files.len());
    for file in &files {
        let target = OutputTarget::File(file.with_extension("json"));
        match convert_file(file, target, options) {
            Ok(conversion) => conversions.push(conversion),
            Err(e) => warn!("Failed to convert {}: {}", file.display(), e),
        }
    }

    Ok(conversions)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
