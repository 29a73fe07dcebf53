use chrono::NaiveDateTime;
use clap::Parser;
use std::path::PathBuf;

use crate::error::{Result, ScheduleError};

/// Layout accepted by `--now`.
pub const NOW_FORMAT: &str = "%Y-%m-%dT%H:%M";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Convert an exported exam-schedule sheet into per-course JSON
#[derive(Parser, Debug, Clone)]
#[command(
    name = "exam-schedule",
    about = "Convert an exported exam-schedule sheet into per-course JSON",
    version
)]
pub struct Settings {
    /// CSV file to convert, or a directory to scan for `.csv` files
    #[arg(short, long, default_value = "excel.csv")]
    pub input: PathBuf,

    /// Output JSON path (`-` for stdout); ignored for directory input
    #[arg(short, long, default_value = "sheet.json")]
    pub output: PathBuf,

    /// Rows before the header row (title, blank line, ...)
    #[arg(long, default_value = "2")]
    pub preface_rows: usize,

    /// Write single-line JSON instead of indented output
    #[arg(long)]
    pub compact: bool,

    /// Print the exams whose seating range contains this student id
    #[arg(long)]
    pub student: Option<String>,

    /// Reference time for the upcoming/past split, e.g. 2025-11-28T08:00
    #[arg(long)]
    pub now: Option<String>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when unset)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply `--debug`.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`load`](Self::load) with an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Reject settings that cannot drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(ScheduleError::Config("input path is empty".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ScheduleError::Config("output path is empty".to_string()));
        }
        if let Some(student) = &self.student {
            if student.trim().is_empty() {
                return Err(ScheduleError::Config("student id is empty".to_string()));
            }
        }
        self.reference_time()?;
        Ok(())
    }

    /// `true` when output should go to stdout.
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }

    /// The parsed `--now` value, or `None` when it was not given.
    pub fn reference_time(&self) -> Result<Option<NaiveDateTime>> {
        match &self.now {
            None => Ok(None),
            Some(raw) => NaiveDateTime::parse_from_str(raw.trim(), NOW_FORMAT)
                .map(Some)
                .map_err(|e| {
                    ScheduleError::Config(format!(
                        "invalid --now value \"{}\" (expected {}): {}",
                        raw, NOW_FORMAT, e
                    ))
                }),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
