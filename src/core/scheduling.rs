//! Exam booking book
//!
//! Bookings live in a single [`ExamBook`] persisted as one JSON blob under
//! its own store key. The book never reads the system clock: `today` is
//! always passed in, so validation is reproducible in tests.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::models::{ExamBooking, ExamStatus};

/// Store key for the exam book blob
pub const DEFAULT_EXAM_KEY: &str = "asteca_exam_book";

/// Practical exam slots, Monday through Friday
pub const WEEKDAY_SLOTS: [&str; 7] = [
    "08:00", "09:00", "10:00", "14:00", "15:00", "16:00", "17:00",
];

/// Saturday morning slots
pub const SATURDAY_SLOTS: [&str; 4] = ["08:00", "09:00", "10:00", "11:00"];

/// The slot table for a date; empty on Sundays
#[must_use]
pub fn slots_for(date: NaiveDate) -> &'static [&'static str] {
    match date.weekday() {
        Weekday::Sun => &[],
        Weekday::Sat => &SATURDAY_SLOTS,
        _ => &WEEKDAY_SLOTS,
    }
}

/// Booking failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The date is today or earlier
    #[error("exam date must be in the future")]
    PastDate,

    /// No exams on Sundays
    #[error("the training center is closed on Sundays")]
    ClosedSunday,

    /// The time is not in the day's slot table
    #[error("time '{time}' is not an available slot")]
    InvalidSlot {
        /// The rejected time string
        time: String,
    },

    /// Another active booking holds the slot
    #[error("slot {date} {time} is already taken")]
    SlotTaken {
        /// Requested date
        date: NaiveDate,
        /// Requested time
        time: String,
    },

    /// No booking with that id
    #[error("booking {0} not found")]
    NotFound(u64),

    /// The booking was cancelled earlier
    #[error("booking {0} is already cancelled")]
    AlreadyCancelled(u64),
}

/// All bookings plus the id counter, persisted together
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamBook {
    #[serde(default)]
    bookings: Vec<ExamBooking>,
    #[serde(default)]
    next_id: u64,
}

impl ExamBook {
    /// Create an empty book
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All bookings, in creation order
    #[must_use]
    pub fn bookings(&self) -> &[ExamBooking] {
        &self.bookings
    }

    /// Look up a booking by id
    #[must_use]
    pub fn booking(&self, id: u64) -> Option<&ExamBooking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// All bookings sorted by date then time
    #[must_use]
    pub fn all_sorted(&self) -> Vec<&ExamBooking> {
        let mut sorted: Vec<&ExamBooking> = self.bookings.iter().collect();
        sorted.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));
        sorted
    }

    /// Active bookings on or after `today`, sorted by date then time
    #[must_use]
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&ExamBooking> {
        let mut sorted: Vec<&ExamBooking> = self
            .bookings
            .iter()
            .filter(|b| b.is_active() && b.date >= today)
            .collect();
        sorted.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));
        sorted
    }

    /// Slot times still free on a date
    ///
    /// Sundays come back empty. The date itself is not validated here;
    /// that happens on booking.
    #[must_use]
    pub fn available_slots(&self, date: NaiveDate) -> Vec<&'static str> {
        slots_for(date)
            .iter()
            .filter(|time| {
                !self
                    .bookings
                    .iter()
                    .any(|b| b.date == date && b.time == **time && b.is_active())
            })
            .copied()
            .collect()
    }

    /// Book a slot
    ///
    /// The date must be strictly after `today`, the time must be in the
    /// day's slot table, and no active booking may hold the slot. The new
    /// booking starts [`ExamStatus::Pending`]; its id comes back.
    ///
    /// # Errors
    /// Returns a [`ScheduleError`] describing the first failed check.
    pub fn schedule(
        &mut self,
        course_id: &str,
        date: NaiveDate,
        time: &str,
        today: NaiveDate,
    ) -> Result<u64, ScheduleError> {
        Self::validate_slot(date, time, today)?;
        self.ensure_free(date, time, None)?;

        let id = self.allocate_id();
        self.bookings.push(ExamBooking::new(
            id,
            course_id.to_string(),
            date,
            time.to_string(),
            today,
        ));
        Ok(id)
    }

    /// Move a booking to a new slot
    ///
    /// Runs the same validation as [`schedule`](Self::schedule), except the
    /// booking's own slot does not block it. The status goes back to
    /// [`ExamStatus::Pending`].
    ///
    /// # Errors
    /// Returns [`ScheduleError::NotFound`] for an unknown id, otherwise the
    /// first failed slot check.
    pub fn reschedule(
        &mut self,
        id: u64,
        date: NaiveDate,
        time: &str,
        today: NaiveDate,
    ) -> Result<(), ScheduleError> {
        let idx = self
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(ScheduleError::NotFound(id))?;

        Self::validate_slot(date, time, today)?;
        self.ensure_free(date, time, Some(id))?;

        let booking = &mut self.bookings[idx];
        booking.date = date;
        booking.time = time.to_string();
        booking.status = ExamStatus::Pending;
        Ok(())
    }

    /// Cancel a booking, freeing its slot
    ///
    /// # Errors
    /// Returns [`ScheduleError::NotFound`] for an unknown id or
    /// [`ScheduleError::AlreadyCancelled`] when cancelled twice.
    pub fn cancel(&mut self, id: u64) -> Result<(), ScheduleError> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(ScheduleError::NotFound(id))?;

        if booking.status == ExamStatus::Cancelled {
            return Err(ScheduleError::AlreadyCancelled(id));
        }
        booking.status = ExamStatus::Cancelled;
        Ok(())
    }

    fn validate_slot(date: NaiveDate, time: &str, today: NaiveDate) -> Result<(), ScheduleError> {
        if date <= today {
            return Err(ScheduleError::PastDate);
        }
        let slots = slots_for(date);
        if slots.is_empty() {
            return Err(ScheduleError::ClosedSunday);
        }
        if !slots.contains(&time) {
            return Err(ScheduleError::InvalidSlot {
                time: time.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_free(
        &self,
        date: NaiveDate,
        time: &str,
        exclude: Option<u64>,
    ) -> Result<(), ScheduleError> {
        let taken = self
            .bookings
            .iter()
            .any(|b| b.date == date && b.time == time && b.is_active() && exclude != Some(b.id));
        if taken {
            return Err(ScheduleError::SlotTaken {
                date,
                time: time.to_string(),
            });
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> u64 {
        if self.next_id == 0 {
            self.next_id = 1;
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2026-03-02 is a Monday; 2026-03-07 Saturday; 2026-03-08 Sunday
    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn today() -> NaiveDate {
        date(2026, 3, 2)
    }

    #[test]
    fn test_slot_tables() {
        assert_eq!(slots_for(date(2026, 3, 3)).len(), 7, "weekday");
        assert_eq!(slots_for(date(2026, 3, 7)).len(), 4, "saturday");
        assert!(slots_for(date(2026, 3, 8)).is_empty(), "sunday");
    }

    #[test]
    fn test_schedule_creates_pending_booking() {
        let mut book = ExamBook::new();

        let id = book
            .schedule("nr35", date(2026, 3, 3), "08:00", today())
            .expect("schedule");

        let booking = book.booking(id).expect("present");
        assert_eq!(booking.status, ExamStatus::Pending);
        assert_eq!(booking.course_id, "nr35");
        assert_eq!(booking.created_on, today());
    }

    #[test]
    fn test_schedule_rejects_today_and_past() {
        let mut book = ExamBook::new();

        assert_eq!(
            book.schedule("nr35", today(), "08:00", today()),
            Err(ScheduleError::PastDate)
        );
        assert_eq!(
            book.schedule("nr35", date(2026, 2, 27), "08:00", today()),
            Err(ScheduleError::PastDate)
        );
    }

    #[test]
    fn test_schedule_rejects_sunday() {
        let mut book = ExamBook::new();

        assert_eq!(
            book.schedule("nr35", date(2026, 3, 8), "08:00", today()),
            Err(ScheduleError::ClosedSunday)
        );
    }

    #[test]
    fn test_schedule_rejects_time_outside_tables() {
        let mut book = ExamBook::new();

        // 11:00 exists on Saturdays only
        assert!(matches!(
            book.schedule("nr35", date(2026, 3, 3), "11:00", today()),
            Err(ScheduleError::InvalidSlot { .. })
        ));
        assert!(book
            .schedule("nr35", date(2026, 3, 7), "11:00", today())
            .is_ok());
    }

    #[test]
    fn test_conflicting_slot_rejected() {
        let mut book = ExamBook::new();
        book.schedule("nr35", date(2026, 3, 3), "09:00", today())
            .expect("first");

        assert!(matches!(
            book.schedule("nr10", date(2026, 3, 3), "09:00", today()),
            Err(ScheduleError::SlotTaken { .. })
        ));
    }

    #[test]
    fn test_cancelled_booking_frees_its_slot() {
        let mut book = ExamBook::new();
        let id = book
            .schedule("nr35", date(2026, 3, 3), "09:00", today())
            .expect("first");

        book.cancel(id).expect("cancel");

        assert!(book
            .schedule("nr10", date(2026, 3, 3), "09:00", today())
            .is_ok());
    }

    #[test]
    fn test_cancel_twice_is_an_error() {
        let mut book = ExamBook::new();
        let id = book
            .schedule("nr35", date(2026, 3, 3), "09:00", today())
            .expect("schedule");

        book.cancel(id).expect("cancel");
        assert_eq!(book.cancel(id), Err(ScheduleError::AlreadyCancelled(id)));
    }

    #[test]
    fn test_reschedule_resets_status_and_skips_own_slot() {
        let mut book = ExamBook::new();
        let id = book
            .schedule("nr35", date(2026, 3, 3), "09:00", today())
            .expect("schedule");
        if let Some(b) = book.bookings.iter_mut().find(|b| b.id == id) {
            b.status = ExamStatus::Confirmed;
        }

        // Same slot again: its own booking does not conflict
        book.reschedule(id, date(2026, 3, 3), "09:00", today())
            .expect("reschedule to own slot");
        assert_eq!(book.booking(id).expect("present").status, ExamStatus::Pending);

        book.reschedule(id, date(2026, 3, 4), "10:00", today())
            .expect("reschedule");
        let booking = book.booking(id).expect("present");
        assert_eq!(booking.date, date(2026, 3, 4));
        assert_eq!(booking.time, "10:00");
    }

    #[test]
    fn test_reschedule_into_taken_slot_rejected() {
        let mut book = ExamBook::new();
        let first = book
            .schedule("nr35", date(2026, 3, 3), "09:00", today())
            .expect("first");
        book.schedule("nr10", date(2026, 3, 3), "10:00", today())
            .expect("second");

        assert!(matches!(
            book.reschedule(first, date(2026, 3, 3), "10:00", today()),
            Err(ScheduleError::SlotTaken { .. })
        ));
    }

    #[test]
    fn test_unknown_id_reported() {
        let mut book = ExamBook::new();

        assert_eq!(book.cancel(42), Err(ScheduleError::NotFound(42)));
        assert_eq!(
            book.reschedule(42, date(2026, 3, 3), "09:00", today()),
            Err(ScheduleError::NotFound(42))
        );
    }

    #[test]
    fn test_upcoming_sorted_by_date_then_time() {
        let mut book = ExamBook::new();
        book.schedule("cipa", date(2026, 3, 5), "08:00", today())
            .expect("a");
        book.schedule("nr35", date(2026, 3, 3), "15:00", today())
            .expect("b");
        book.schedule("nr10", date(2026, 3, 3), "09:00", today())
            .expect("c");
        let cancelled = book
            .schedule("nr18", date(2026, 3, 4), "09:00", today())
            .expect("d");
        book.cancel(cancelled).expect("cancel");

        let upcoming = book.upcoming(today());
        let order: Vec<&str> = upcoming.iter().map(|b| b.course_id.as_str()).collect();
        assert_eq!(order, vec!["nr10", "nr35", "cipa"]);
    }

    #[test]
    fn test_available_slots_skip_taken_times() {
        let mut book = ExamBook::new();
        book.schedule("nr35", date(2026, 3, 3), "08:00", today())
            .expect("schedule");

        let free = book.available_slots(date(2026, 3, 3));
        assert_eq!(free.len(), 6);
        assert!(!free.contains(&"08:00"));
        assert!(book.available_slots(date(2026, 3, 8)).is_empty(), "sunday");
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut book = ExamBook::new();

        let a = book
            .schedule("nr35", date(2026, 3, 3), "08:00", today())
            .expect("a");
        let b = book
            .schedule("nr35", date(2026, 3, 3), "09:00", today())
            .expect("b");
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn test_book_blob_round_trip() {
        let mut book = ExamBook::new();
        book.schedule("nr35", date(2026, 3, 3), "08:00", today())
            .expect("schedule");

        let blob = serde_json::to_string(&book).expect("encode");
        let reloaded: ExamBook = serde_json::from_str(&blob).expect("decode");

        assert_eq!(reloaded.bookings(), book.bookings());

        // The id counter survives, so new bookings never reuse ids
        let mut reloaded = reloaded;
        let next = reloaded
            .schedule("nr10", date(2026, 3, 4), "08:00", today())
            .expect("schedule");
        assert_eq!(next, 2);
    }
}
