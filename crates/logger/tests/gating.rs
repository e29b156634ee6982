//! Integration tests for the `logger` crate: level parsing and runtime flags.

use logger::{debug, error, info, warn};
use logger::{set_level, set_level_from_str, Level};

#[test]
fn level_parse_accepts_known_names() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("ERR"));
    assert!(set_level_from_str("warning"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_unknown_names() {
    assert!(!set_level_from_str("trace"));
    assert!(!set_level_from_str(""));
}

#[test]
fn macros_do_not_panic_at_any_level() {
    set_level(Level::Debug);
    error!("error line");
    warn!("warn line");
    info!("info line");
    debug!("debug line");
    set_level(Level::Error);
    info!("suppressed info line");
}

#[cfg(feature = "log-debug")]
#[test]
fn debug_flag_toggles_emission() {
    use logger::{disable_debug, enable_debug, is_debug_enabled};
    set_level(Level::Debug);
    disable_debug();
    assert!(!is_debug_enabled());
    debug!("silent while disabled");
    enable_debug();
    assert!(is_debug_enabled());
    debug!("emitted while enabled");
}

#[cfg(feature = "verbose")]
#[test]
fn verbose_flag_toggles_emission() {
    use logger::{disable_verbose, enable_verbose, is_verbose_enabled, verbose};
    disable_verbose();
    verbose!("silent while disabled");
    assert!(!is_verbose_enabled());
    enable_verbose();
    verbose!("emitted while enabled: {}", 42);
    assert!(is_verbose_enabled());
}
