//! CLI command handlers

pub mod config;
pub mod courses;
pub mod exams;
pub mod progress;
pub mod ranking;
pub mod report;

use asteca_progress::config::Config;
use asteca_progress::core::catalog::Catalog;
use asteca_progress::core::notify::NotificationCenter;
use asteca_progress::core::progress::{ProgressTracker, DEFAULT_PROGRESS_KEY};
use asteca_progress::core::scheduling::{ExamBook, DEFAULT_EXAM_KEY};
use asteca_progress::core::storage::{load_record, FileStore, LoadOutcome};
use logger::warn;

/// Load the catalog, preferring `catalog.toml` in the data directory
///
/// A broken catalog file is reported and skipped; the embedded catalog is
/// the fallback either way.
pub fn load_catalog(config: &Config) -> Catalog {
    let path = config.data_dir().join("catalog.toml");
    if path.exists() {
        match Catalog::load(&path) {
            Ok(catalog) => return catalog,
            Err(e) => {
                warn!("Ignoring catalog file {}: {e}", path.display());
                eprintln!("ℹ Ignoring catalog file {}: {e}", path.display());
            }
        }
    }
    Catalog::builtin()
}

/// Open the progress tracker over the file-backed store
///
/// # Errors
/// Returns a printable message when the store cannot be read.
pub fn open_tracker(config: &Config) -> Result<ProgressTracker<FileStore>, String> {
    let store = FileStore::new(config.data_dir());
    let key = if config.storage.progress_key.is_empty() {
        DEFAULT_PROGRESS_KEY.to_string()
    } else {
        config.storage.progress_key.clone()
    };

    let (tracker, outcome) = ProgressTracker::initialize(
        store,
        key,
        config.points_per_level(),
        config.corrupt_policy(),
        NotificationCenter::with_system_clock(),
    )
    .map_err(|e| format!("✗ Failed to load progress: {e}"))?;

    if outcome == LoadOutcome::Recovered {
        warn!("Stored progress was unreadable; starting from a fresh record");
        eprintln!("ℹ Stored progress was unreadable; starting from a fresh record");
    }

    Ok(tracker)
}

/// Load the exam book along with the store and key used for saving it back
///
/// # Errors
/// Returns a printable message when the store cannot be read.
pub fn open_book(config: &Config) -> Result<(FileStore, String, ExamBook), String> {
    let store = FileStore::new(config.data_dir());
    let key = if config.storage.exam_key.is_empty() {
        DEFAULT_EXAM_KEY.to_string()
    } else {
        config.storage.exam_key.clone()
    };

    let (book, outcome) = load_record::<ExamBook, FileStore>(&store, &key, config.corrupt_policy())
        .map_err(|e| format!("✗ Failed to load exam bookings: {e}"))?;

    if outcome == LoadOutcome::Recovered {
        warn!("Stored exam book was unreadable; starting from an empty book");
        eprintln!("ℹ Stored exam book was unreadable; starting from an empty book");
    }

    Ok((store, key, book))
}

/// Print and clear any notifications the last operation raised
pub fn print_notifications(center: &mut NotificationCenter) {
    for notification in center.drain() {
        println!("{}", notification.kind);
    }
}
