//! Report command handler
//!
//! Generates progress reports in Markdown or HTML format covering points,
//! badges, course completion, and upcoming exam bookings.

use crate::commands::{load_catalog, open_book, open_tracker};
use asteca_progress::config::Config;
use asteca_progress::core::report::{
    HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use chrono::NaiveDate;
use logger::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the report command.
///
/// # Arguments
/// * `output_file` - Optional output path
/// * `format_str` - Optional report format (markdown, html); falls back to config
/// * `config` - Configuration containing the default output directory
/// * `today` - Date the report is generated on
pub fn run(output_file: Option<&Path>, format_str: Option<&str>, config: &Config, today: NaiveDate) {
    if let Err(err) = generate_report(output_file, format_str, config, today) {
        error!("Report generation failed: {err}");
        eprintln!("{err}");
    }
}

/// Write the report to a file in the specified format
fn write_report(
    ctx: &ReportContext,
    format: ReportFormat,
    output_path: &Path,
) -> Result<(), String> {
    match format {
        ReportFormat::Markdown => {
            let reporter = MarkdownReporter::new();
            reporter
                .generate(ctx, output_path)
                .map_err(|e| format!("✗ Failed to generate Markdown report: {e}"))?;
        }
        ReportFormat::Html => {
            let reporter = HtmlReporter::new();
            reporter
                .generate(ctx, output_path)
                .map_err(|e| format!("✗ Failed to generate HTML report: {e}"))?;
        }
    }

    Ok(())
}

/// Print a summary of the report
fn print_summary(ctx: &ReportContext) {
    println!("\n=== Summary ===");
    println!("User: {}", ctx.user_name);
    println!("Points: {}", ctx.progress.points);
    println!("Level: {}", ctx.progress.level);
    println!(
        "Courses completed: {} of {}",
        ctx.completed_courses().len(),
        ctx.course_count()
    );
    println!(
        "Badges earned: {} of {}",
        ctx.earned_badges().len(),
        ctx.catalog.badges.len()
    );
    println!("Upcoming exams: {}", ctx.book.upcoming(ctx.today).len());
}

fn generate_report(
    output_file: Option<&Path>,
    format_str: Option<&str>,
    config: &Config,
    today: NaiveDate,
) -> Result<(), String> {
    // Parse the format: CLI flag first, then config, then markdown
    let format_name = format_str.map(str::to_string).or_else(|| {
        if config.report.format.is_empty() {
            None
        } else {
            Some(config.report.format.clone())
        }
    });
    let format = format_name.map_or(Ok(ReportFormat::Markdown), |name| {
        ReportFormat::from_str(&name).map_err(|e| format!("✗ {e}. Use: markdown or html"))
    })?;

    // Gather report data
    let catalog = load_catalog(config);
    let tracker = open_tracker(config)?;
    let (_store, _key, book) = open_book(config)?;

    let user_name = if config.user.name.is_empty() {
        "Colaborador"
    } else {
        &config.user.name
    };
    let ctx = ReportContext::new(
        user_name,
        tracker.progress(),
        &catalog,
        &book,
        today,
        tracker.points_per_level(),
    );

    // Determine output path
    let final_output_path: PathBuf = if let Some(output) = output_file {
        output.to_path_buf()
    } else {
        let reports_dir = PathBuf::from(&config.report.output_dir);
        std::fs::create_dir_all(&reports_dir).map_err(|e| {
            format!(
                "✗ Failed to create reports directory {}: {e}",
                reports_dir.display()
            )
        })?;

        let output_filename = format!(
            "progresso_{}.{}",
            today.format("%Y%m%d"),
            format.extension()
        );
        reports_dir.join(output_filename)
    };

    // Write the report
    write_report(&ctx, format, &final_output_path)?;

    println!("✓ Report generated: {}", final_output_path.display());
    info!("Report exported to: {}", final_output_path.display());

    print_summary(&ctx);

    Ok(())
}
