//! Courses command handler

use crate::args::CoursesSubcommand;
use crate::commands::{load_catalog, open_tracker, print_notifications};
use asteca_progress::config::Config;
use logger::{error, info};

/// Dispatch courses subcommands
pub fn run(subcommand: Option<CoursesSubcommand>, config: &Config) {
    let result = match subcommand {
        None | Some(CoursesSubcommand::List) => list(config),
        Some(CoursesSubcommand::Show { id }) => show(config, &id),
        Some(CoursesSubcommand::Complete { id }) => complete(config, &id),
    };

    if let Err(err) = result {
        error!("Courses command failed: {err}");
        eprintln!("{err}");
    }
}

/// List the catalog with completion markers
fn list(config: &Config) -> Result<(), String> {
    let catalog = load_catalog(config);
    let tracker = open_tracker(config)?;
    let record = tracker.progress();

    println!("\n=== Course Catalog ===\n");
    for course in &catalog.courses {
        let marker = if record.has_completed(&course.id) {
            "✓"
        } else {
            " "
        };
        println!(
            "{marker} {:<20} {:<40} {:>8} {:>6} pts",
            course.id,
            course.title,
            course.duration,
            course.points_reward
        );
    }
    println!(
        "\n{} of {} completed",
        catalog
            .courses
            .iter()
            .filter(|c| record.has_completed(&c.id))
            .count(),
        catalog.courses.len()
    );

    Ok(())
}

/// Show one course in detail
fn show(config: &Config, id: &str) -> Result<(), String> {
    let catalog = load_catalog(config);
    let course = catalog
        .course(id)
        .ok_or_else(|| format!("✗ Unknown course '{id}'"))?;

    println!("\n=== {} ===", course.title);
    println!("{}", course.description);
    println!("Duration: {}", course.duration);
    println!("Price: R$ {},00", course.price);
    println!("Points reward: {}", course.points_reward);

    if !course.modules.is_empty() {
        println!("Modules:");
        for (idx, module) in course.modules.iter().enumerate() {
            println!("  {}. {module}", idx + 1);
        }
    }

    Ok(())
}

/// Mark a course completed and collect its reward
fn complete(config: &Config, id: &str) -> Result<(), String> {
    let catalog = load_catalog(config);
    let course = catalog
        .course(id)
        .ok_or_else(|| format!("✗ Unknown course '{id}'"))?;

    let mut tracker = open_tracker(config)?;
    let completed = tracker
        .complete_course(&course.id, course.points_reward)
        .map_err(|e| format!("✗ Failed to save progress: {e}"))?;

    if completed {
        tracker
            .award_due_badges(&catalog.badges)
            .map_err(|e| format!("✗ Failed to save progress: {e}"))?;

        info!("Course '{}' completed", course.id);
        println!(
            "✓ Course completed: {} (+{} pts, total: {}, level {})",
            course.title,
            course.points_reward,
            tracker.progress().points,
            tracker.progress().level
        );
        print_notifications(tracker.notifications_mut());
    } else {
        println!("ℹ Course '{}' was already completed", course.id);
    }

    Ok(())
}
