//! Data models for `AstecaProgress`

pub mod badge;
pub mod course;
pub mod exam;
pub mod progress;
pub mod roster;

pub use badge::Badge;
pub use course::Course;
pub use exam::{ExamBooking, ExamStatus};
pub use progress::{level_for, UserProgress};
pub use roster::{IndividualEntry, TeamEntry};
