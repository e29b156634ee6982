//! Exam booking model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an exam booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamStatus {
    /// Booked, awaiting confirmation
    Pending,
    /// Confirmed by the training center
    Confirmed,
    /// Exam taken
    Completed,
    /// Cancelled; the slot is free again
    Cancelled,
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// One exam booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamBooking {
    /// Booking id, unique within the book
    pub id: u64,

    /// Course the exam belongs to
    pub course_id: String,

    /// Exam date
    pub date: NaiveDate,

    /// Slot time as listed by the schedule tables (e.g., "08:00")
    pub time: String,

    /// Booking status
    pub status: ExamStatus,

    /// Date the booking was made
    pub created_on: NaiveDate,
}

impl ExamBooking {
    /// Create a new pending booking
    #[must_use]
    pub const fn new(
        id: u64,
        course_id: String,
        date: NaiveDate,
        time: String,
        created_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            course_id,
            date,
            time,
            status: ExamStatus::Pending,
            created_on,
        }
    }

    /// Whether the booking still occupies its slot
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.status, ExamStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_new_booking_is_pending() {
        let booking = ExamBooking::new(
            1,
            "nr35".to_string(),
            date(2026, 3, 10),
            "08:00".to_string(),
            date(2026, 3, 1),
        );

        assert_eq!(booking.status, ExamStatus::Pending);
        assert!(booking.is_active());
    }

    #[test]
    fn test_cancelled_booking_is_not_active() {
        let mut booking = ExamBooking::new(
            2,
            "nr10".to_string(),
            date(2026, 3, 11),
            "09:00".to_string(),
            date(2026, 3, 1),
        );

        booking.status = ExamStatus::Cancelled;
        assert!(!booking.is_active());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ExamStatus::Pending.to_string(), "pending");
        assert_eq!(ExamStatus::Cancelled.to_string(), "cancelled");
    }
}
