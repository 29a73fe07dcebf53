//! JSON output for a finished [`ExamSchedule`].
//!
//! `serde_json` never escapes non-ASCII text, so Thai titles and building
//! names are written as-is.

use std::io::Write;
use std::path::Path;

use schedule_core::error::{Result, ScheduleError};
use schedule_core::models::ExamSchedule;

/// Render `schedule` as JSON, indented by two spaces when `pretty`.
pub fn to_json_string(schedule: &ExamSchedule, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(schedule)?
    } else {
        serde_json::to_string(schedule)?
    };
    Ok(json)
}

/// Write `schedule` to any writer, followed by a newline.
pub fn write_schedule_to<W: Write>(schedule: &ExamSchedule, mut out: W, pretty: bool) -> Result<()> {
    let json = to_json_string(schedule, pretty)?;
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Atomically write `schedule` to `path`, creating parent directories if
/// needed.
pub fn write_schedule(schedule: &ExamSchedule, path: &Path, pretty: bool) -> Result<()> {
    let io_err = |source| ScheduleError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = to_json_string(schedule, pretty)?;

    // Write to a temp file then rename for atomicity.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, format!("{}\n", json)).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;

    Ok(())
}

/// Read back a schedule written by [`write_schedule`].
pub fn read_schedule(path: &Path) -> Result<ExamSchedule> {
    let text = std::fs::read_to_string(path).map_err(|source| ScheduleError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}
