//! Core module for common functionality across all targets

pub mod catalog;
pub mod models;
pub mod notify;
pub mod progress;
pub mod ranking;
pub mod report;
pub mod scheduling;
pub mod storage;

/// Returns the current version of the `asteca-progress` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
