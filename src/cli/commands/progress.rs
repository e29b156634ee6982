//! Progress command handler
//!
//! Shows and mutates the stored progress record: points, level, badges,
//! and completed courses.

use crate::args::ProgressSubcommand;
use crate::commands::{load_catalog, open_tracker, print_notifications};
use asteca_progress::config::Config;
use logger::{error, info};
use std::io::{self, Write};

/// Dispatch progress subcommands
pub fn run(subcommand: Option<ProgressSubcommand>, config: &Config) {
    let result = match subcommand {
        None => show(config, false),
        Some(ProgressSubcommand::Show { json }) => show(config, json),
        Some(ProgressSubcommand::Award { event }) => award_event(config, &event),
        Some(ProgressSubcommand::AddPoints { points }) => add_points(config, points),
        Some(ProgressSubcommand::Badge { id }) => award_badge(config, &id),
        Some(ProgressSubcommand::SyncBadges) => sync_badges(config),
        Some(ProgressSubcommand::Reset) => reset(config),
    };

    if let Err(err) = result {
        error!("Progress command failed: {err}");
        eprintln!("{err}");
    }
}

/// Print the progress summary, or the raw record as JSON
fn show(config: &Config, json: bool) -> Result<(), String> {
    let catalog = load_catalog(config);
    let tracker = open_tracker(config)?;
    let record = tracker.progress();
    let quantum = tracker.points_per_level();

    if json {
        let raw = serde_json::to_string_pretty(record)
            .map_err(|e| format!("✗ Failed to encode record: {e}"))?;
        println!("{raw}");
        return Ok(());
    }

    if config.user.name.is_empty() {
        println!("\n=== Progress Summary ===");
    } else {
        println!("\n=== Progress Summary for {} ===", config.user.name);
    }
    println!("Points: {}", record.points);
    println!("Level: {}", record.level);
    println!("Points to next level: {}", quantum - record.points % quantum);

    if record.badges.is_empty() {
        println!("Badges: none yet");
    } else {
        println!("Badges:");
        for id in &record.badges {
            match catalog.badge(id) {
                Some(badge) => println!("  {} {} ({id})", badge.icon, badge.name),
                None => println!("  {id}"),
            }
        }
    }

    if record.completed_courses.is_empty() {
        println!("Completed courses: none yet");
    } else {
        println!("Completed courses:");
        for id in &record.completed_courses {
            match catalog.course(id) {
                Some(course) => println!("  ✓ {} ({id})", course.title),
                None => println!("  ✓ {id}"),
            }
        }
    }

    if record.team_ranking > 0 {
        println!("Team position: {}", record.team_ranking);
    }

    Ok(())
}

/// Award the configured points for a named event
fn award_event(config: &Config, event: &str) -> Result<(), String> {
    let Some(points) = config.reward_for(event) else {
        let known: Vec<&str> = config
            .progression
            .rewards
            .keys()
            .map(String::as_str)
            .collect();
        return Err(format!(
            "✗ Unknown event '{event}'. Known events: {}",
            known.join(", ")
        ));
    };

    let catalog = load_catalog(config);
    let mut tracker = open_tracker(config)?;

    tracker
        .add_points(points)
        .map_err(|e| format!("✗ Failed to save progress: {e}"))?;
    tracker
        .award_due_badges(&catalog.badges)
        .map_err(|e| format!("✗ Failed to save progress: {e}"))?;

    info!("Awarded {points} points for event '{event}'");
    println!(
        "✓ {points} points for '{event}' (total: {}, level {})",
        tracker.progress().points,
        tracker.progress().level
    );
    print_notifications(tracker.notifications_mut());

    Ok(())
}

/// Add a raw number of points
fn add_points(config: &Config, points: u32) -> Result<(), String> {
    let catalog = load_catalog(config);
    let mut tracker = open_tracker(config)?;

    tracker
        .add_points(points)
        .map_err(|e| format!("✗ Failed to save progress: {e}"))?;
    tracker
        .award_due_badges(&catalog.badges)
        .map_err(|e| format!("✗ Failed to save progress: {e}"))?;

    info!("Added {points} points");
    println!(
        "✓ Added {points} points (total: {}, level {})",
        tracker.progress().points,
        tracker.progress().level
    );
    print_notifications(tracker.notifications_mut());

    Ok(())
}

/// Award a catalog badge by id
fn award_badge(config: &Config, id: &str) -> Result<(), String> {
    let catalog = load_catalog(config);
    let badge = catalog.badge(id).ok_or_else(|| {
        let known: Vec<&str> = catalog.badges.iter().map(|b| b.id.as_str()).collect();
        format!("✗ Unknown badge '{id}'. Catalog badges: {}", known.join(", "))
    })?;

    let mut tracker = open_tracker(config)?;
    let awarded = tracker
        .award_badge(&badge.id, &badge.name)
        .map_err(|e| format!("✗ Failed to save progress: {e}"))?;

    if awarded {
        info!("Badge '{}' awarded", badge.id);
        println!("✓ Badge awarded: {} {}", badge.icon, badge.name);
        print_notifications(tracker.notifications_mut());
    } else {
        println!("ℹ Badge '{}' was already earned", badge.id);
    }

    Ok(())
}

/// Award any catalog badges whose thresholds the stored points already meet
///
/// Reconciles a record whose points outgrew its badge list, e.g. after
/// catalog thresholds were lowered or a blob came from the old front-end.
fn sync_badges(config: &Config) -> Result<(), String> {
    let catalog = load_catalog(config);
    let mut tracker = open_tracker(config)?;

    let earned = tracker
        .award_due_badges(&catalog.badges)
        .map_err(|e| format!("✗ Failed to save progress: {e}"))?;

    if earned.is_empty() {
        println!("ℹ No new badges due at {} points", tracker.progress().points);
    } else {
        info!("Badge sync awarded: {}", earned.join(", "));
        println!("✓ {} badge(s) awarded: {}", earned.len(), earned.join(", "));
        print_notifications(tracker.notifications_mut());
    }

    Ok(())
}

/// Reset stored progress after confirmation
fn reset(config: &Config) -> Result<(), String> {
    print!("Are you sure you want to reset stored progress? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes") {
        let mut tracker = open_tracker(config)?;
        tracker
            .reset()
            .map_err(|e| format!("✗ Failed to reset progress: {e}"))?;
        println!("✓ Progress reset to a fresh record");
    } else {
        println!("✗ Reset cancelled");
    }

    Ok(())
}
