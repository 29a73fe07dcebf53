mod bootstrap;
mod report;

use anyhow::Result;
use schedule_core::models::ExamSchedule;
use schedule_core::settings::Settings;
use schedule_data::convert::{convert_directory, convert_file, Conversion, ConvertOptions, OutputTarget};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;
    settings.validate()?;

    tracing::info!("Exam Schedule v{} starting", env!("CARGO_PKG_VERSION"));

    let options = ConvertOptions {
        preface_rows: settings.preface_rows,
        pretty: !settings.compact,
    };

    let conversions: Vec<Conversion> = if settings.input.is_dir() {
        tracing::info!("Converting every CSV under {}", settings.input.display());
        convert_directory(&settings.input, options)?
    } else {
        let target = if settings.writes_to_stdout() {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(settings.output.clone())
        };
        vec![convert_file(&settings.input, target, options)?]
    };

    for conversion in &conversions {
        let destination = match &conversion.output {
            OutputTarget::File(path) => path.display().to_string(),
            OutputTarget::Stdout => "stdout".to_string(),
        };
        tracing::info!(
            "{} -> {}: {} courses, {} allocations",
            conversion.input.display(),
            destination,
            conversion.schedule.len(),
            conversion.schedule.allocation_count()
        );
        if conversion.stats.duplicate_courses > 0 || conversion.stats.orphan_rows > 0 {
            tracing::warn!(
                "{}: {} repeated sequence numbers, {} rows before the first course",
                conversion.input.display(),
                conversion.stats.duplicate_courses,
                conversion.stats.orphan_rows
            );
        }
    }

    if let Some(student) = &settings.student {
        let now = settings
            .reference_time()?
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        let schedules: Vec<&ExamSchedule> = conversions.iter().map(|c| &c.schedule).collect();
        print!("{}", report::render_student_report(&schedules, student.trim(), now));
    }

    Ok(())
}
