//! Example demonstrating the verbose and file-logging features

use logger::{
    debug, enable_debug, enable_verbose, error, info, init_file_logging, set_level, verbose, warn,
    Level,
};
use std::path::PathBuf;

fn main() {
    println!("=== Logger Feature Demo ===\n");

    set_level(Level::Debug);
    enable_debug();

    let log_file = PathBuf::from("/tmp/astecaprog_demo.log");
    if init_file_logging(&log_file) {
        println!("✓ File logging enabled at: {}\n", log_file.display());
    } else {
        println!("✗ Failed to initialize file logging\n");
    }

    enable_verbose();
    println!("✓ Verbose output enabled\n");

    println!("--- Standard Log Messages (these go to file ONLY) ---");
    error!("Could not read the progress record");
    warn!("Record was corrupt; starting from defaults");
    info!("Progress saved: 120 points, level 2");
    debug!("store key = asteca_user_progress");

    println!("\n--- Verbose Output (console only, NOT in file) ---");
    verbose!("Awarding badge 'safety_expert'");
    verbose!("Adding 10 points (course link visit)");
    verbose!("Level check: {} -> {}", 1, 2);
    verbose!("Persisting record");
    verbose!("Done");

    println!("\n--- Check the log file ---");
    println!("Run: cat /tmp/astecaprog_demo.log");
    println!("The log file will contain error/warn/info/debug messages but NOT verbose output.");
}
