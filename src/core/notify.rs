//! Notification lifecycle
//!
//! Badge and level-up notices move through an explicit state machine:
//! `Created -> Shown -> Dismissing -> Removed`. Transitions are due at fixed
//! offsets from creation and are applied by [`NotificationCenter::pump`],
//! which reads an injected [`Clock`]. Posting is fire-and-forget: there is no
//! cancellation, and overlapping notifications keep independent schedules.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// What a notification announces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    /// A badge was just awarded
    BadgeEarned {
        /// Badge display name
        display_name: String,
    },
    /// The user reached a new level
    LevelUp {
        /// The level reached
        level: u32,
    },
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadgeEarned { display_name } => {
                write!(f, "🏆 Parabéns! Você conquistou o badge: {display_name}")
            }
            Self::LevelUp { level } => {
                write!(f, "🎉 Level Up! Você alcançou o nível {level}!")
            }
        }
    }
}

/// Lifecycle states, forward-only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationState {
    /// Posted but not yet visible
    Created,
    /// Visible to the user
    Shown,
    /// Fading out; no longer counted as visible
    Dismissing,
    /// Gone; dropped from the live list
    Removed,
}

impl NotificationState {
    /// The state that follows this one, `None` after `Removed`
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Created => Some(Self::Shown),
            Self::Shown => Some(Self::Dismissing),
            Self::Dismissing => Some(Self::Removed),
            Self::Removed => None,
        }
    }
}

impl fmt::Display for NotificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Shown => "shown",
            Self::Dismissing => "dismissing",
            Self::Removed => "removed",
        };
        write!(f, "{s}")
    }
}

/// Transition offsets, all measured the way the web front-end scheduled its
/// timers: show and dismiss from creation, removal from dismissal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTimings {
    /// Creation to `Shown`
    pub show_delay: Duration,
    /// Creation to `Dismissing`
    pub dismiss_delay: Duration,
    /// `Dismissing` to `Removed`
    pub remove_delay: Duration,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            show_delay: Duration::from_millis(100),
            dismiss_delay: Duration::from_millis(3000),
            remove_delay: Duration::from_millis(300),
        }
    }
}

impl NotificationTimings {
    /// Total time from creation until the notification is gone
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        self.dismiss_delay + self.remove_delay
    }
}

/// Time source for the notification center
///
/// `now` is an offset from an arbitrary origin; only differences matter.
pub trait Clock {
    /// Current reading
    fn now(&self) -> Duration;
}

/// Monotonic wall clock
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock reading zero at construction
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests and hosts that own their event loop
///
/// Clones share the same cell, so a test can keep one handle while the
/// notification center owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock reading zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute reading
    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }

    /// Move the reading forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// One live notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Id, unique within the center
    pub id: u64,
    /// What is announced
    pub kind: NotificationKind,
    /// Current lifecycle state
    pub state: NotificationState,
    /// Clock reading at creation
    pub created_at: Duration,
}

/// Owns the live notifications and drives their lifecycle
pub struct NotificationCenter {
    timings: NotificationTimings,
    clock: Box<dyn Clock>,
    next_id: u64,
    items: Vec<Notification>,
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("timings", &self.timings)
            .field("next_id", &self.next_id)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl NotificationCenter {
    /// Create a center with explicit timings and clock
    #[must_use]
    pub fn new(timings: NotificationTimings, clock: Box<dyn Clock>) -> Self {
        Self {
            timings,
            clock,
            next_id: 1,
            items: Vec::new(),
        }
    }

    /// Create a center with default timings on the system clock
    #[must_use]
    pub fn with_system_clock() -> Self {
        Self::new(NotificationTimings::default(), Box::new(SystemClock::new()))
    }

    /// The configured timings
    #[must_use]
    pub const fn timings(&self) -> &NotificationTimings {
        &self.timings
    }

    /// Post a notification, stamped with the current clock reading
    ///
    /// Returns the id. Fire-and-forget: the notification runs its full
    /// schedule, there is no way to cancel it.
    pub fn post(&mut self, kind: NotificationKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            kind,
            state: NotificationState::Created,
            created_at: self.clock.now(),
        });
        id
    }

    /// Apply every due transition and drop removed notifications
    ///
    /// Reads the clock once. A notification far past its schedule steps
    /// through all remaining states in this single call. Returns the applied
    /// transitions in order.
    pub fn pump(&mut self) -> Vec<(u64, NotificationState)> {
        let now = self.clock.now();
        let mut transitions = Vec::new();

        for item in &mut self.items {
            while let Some(next) = item.state.next() {
                let due = match next {
                    NotificationState::Shown => item.created_at + self.timings.show_delay,
                    NotificationState::Dismissing => item.created_at + self.timings.dismiss_delay,
                    NotificationState::Removed => {
                        item.created_at + self.timings.dismiss_delay + self.timings.remove_delay
                    }
                    NotificationState::Created => item.created_at,
                };
                if now < due {
                    break;
                }
                item.state = next;
                transitions.push((item.id, next));
            }
        }

        self.items.retain(|item| item.state != NotificationState::Removed);
        transitions
    }

    /// All live notifications, oldest first
    #[must_use]
    pub fn active(&self) -> &[Notification] {
        &self.items
    }

    /// The subset of live notifications currently in `Shown`
    #[must_use]
    pub fn visible(&self) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|item| item.state == NotificationState::Shown)
            .collect()
    }

    /// Take every live notification out of the center
    ///
    /// For hosts that render immediately (the CLI prints notices inline)
    /// instead of animating through the clocked lifecycle.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.items)
    }
}
