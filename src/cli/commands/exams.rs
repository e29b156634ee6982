//! Exams command handler
//!
//! Books, moves, and cancels practical exam slots. The book is persisted
//! back to the store after every mutation.

use crate::args::ExamsSubcommand;
use crate::commands::{load_catalog, open_book, open_tracker, print_notifications};
use asteca_progress::config::Config;
use asteca_progress::core::scheduling::slots_for;
use asteca_progress::core::storage::save_record;
use chrono::NaiveDate;
use logger::{error, info};

/// Dispatch exams subcommands
pub fn run(subcommand: Option<ExamsSubcommand>, config: &Config, today: NaiveDate) {
    let result = match subcommand {
        None | Some(ExamsSubcommand::List) => list(config, today),
        Some(ExamsSubcommand::Slots { date }) => slots(config, date),
        Some(ExamsSubcommand::Schedule { course, date, time }) => {
            schedule(config, &course, date, &time, today)
        }
        Some(ExamsSubcommand::Reschedule { id, date, time }) => {
            reschedule(config, id, date, &time, today)
        }
        Some(ExamsSubcommand::Cancel { id }) => cancel(config, id),
    };

    if let Err(err) = result {
        error!("Exams command failed: {err}");
        eprintln!("{err}");
    }
}

/// List all bookings, soonest first
fn list(config: &Config, today: NaiveDate) -> Result<(), String> {
    let catalog = load_catalog(config);
    let (_store, _key, book) = open_book(config)?;

    let bookings = book.all_sorted();
    if bookings.is_empty() {
        println!("ℹ No exam bookings yet");
        return Ok(());
    }

    println!("\n=== Exam Bookings ===\n");
    println!(
        "{:>4}  {:<12} {:<7} {:<40} {}",
        "Id", "Date", "Time", "Course", "Status"
    );
    for booking in bookings {
        let title = catalog
            .course(&booking.course_id)
            .map_or(booking.course_id.as_str(), |c| c.title.as_str());
        println!(
            "{:>4}  {:<12} {:<7} {:<40} {}",
            booking.id, booking.date, booking.time, title, booking.status
        );
    }
    println!("\n{} upcoming", book.upcoming(today).len());

    Ok(())
}

/// Show free slot times for a date
fn slots(config: &Config, date: NaiveDate) -> Result<(), String> {
    let (_store, _key, book) = open_book(config)?;
    let free = book.available_slots(date);

    if slots_for(date).is_empty() {
        println!("ℹ The training center is closed on Sundays");
    } else if free.is_empty() {
        println!("ℹ No free slots on {date}");
    } else {
        println!("Free slots on {date}: {}", free.join(", "));
    }

    Ok(())
}

/// Book an exam slot
fn schedule(
    config: &Config,
    course_id: &str,
    date: NaiveDate,
    time: &str,
    today: NaiveDate,
) -> Result<(), String> {
    let catalog = load_catalog(config);
    let course = catalog
        .course(course_id)
        .ok_or_else(|| format!("✗ Unknown course '{course_id}'"))?;

    let (mut store, key, mut book) = open_book(config)?;
    let id = book
        .schedule(&course.id, date, time, today)
        .map_err(|e| format!("✗ {e}"))?;
    save_record(&mut store, &key, &book)
        .map_err(|e| format!("✗ Failed to save exam bookings: {e}"))?;

    info!("Exam booked: id {id}, course '{}', {date} {time}", course.id);
    println!("✓ Exam booked: {} on {date} at {time} (id {id})", course.title);

    // Booking an exam is a rewarded event when configured
    if let Some(points) = config.reward_for("exam_scheduled") {
        let mut tracker = open_tracker(config)?;
        tracker
            .add_points(points)
            .map_err(|e| format!("✗ Failed to save progress: {e}"))?;
        tracker
            .award_due_badges(&catalog.badges)
            .map_err(|e| format!("✗ Failed to save progress: {e}"))?;
        println!(
            "✓ {points} points for booking (total: {})",
            tracker.progress().points
        );
        print_notifications(tracker.notifications_mut());
    }

    Ok(())
}

/// Move a booking to a new slot
fn reschedule(
    config: &Config,
    id: u64,
    date: NaiveDate,
    time: &str,
    today: NaiveDate,
) -> Result<(), String> {
    let (mut store, key, mut book) = open_book(config)?;
    book.reschedule(id, date, time, today)
        .map_err(|e| format!("✗ {e}"))?;
    save_record(&mut store, &key, &book)
        .map_err(|e| format!("✗ Failed to save exam bookings: {e}"))?;

    info!("Exam booking {id} moved to {date} {time}");
    println!("✓ Booking {id} moved to {date} at {time} (status back to pending)");

    Ok(())
}

/// Cancel a booking
fn cancel(config: &Config, id: u64) -> Result<(), String> {
    let (mut store, key, mut book) = open_book(config)?;
    book.cancel(id).map_err(|e| format!("✗ {e}"))?;
    save_record(&mut store, &key, &book)
        .map_err(|e| format!("✗ Failed to save exam bookings: {e}"))?;

    info!("Exam booking {id} cancelled");
    println!("✓ Booking {id} cancelled");

    Ok(())
}
