//! Progress tracking
//!
//! [`ProgressTracker`] owns the store, the persisted [`UserProgress`] record,
//! and a [`NotificationCenter`]. Every mutating operation keeps the stored
//! level consistent with the point total and persists before returning, so a
//! crash between operations never loses an applied mutation.

use crate::core::models::progress::level_for;
use crate::core::models::{Badge, UserProgress};
use crate::core::notify::{NotificationCenter, NotificationKind};
use crate::core::storage::{
    load_record, save_record, CorruptPolicy, LoadOutcome, LocalStore, StoreError,
};

/// Store key the web front-end used for the progress blob
pub const DEFAULT_PROGRESS_KEY: &str = "asteca_user_progress";

/// Level movement reported by [`ProgressTracker::add_points`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    /// Level before the points were added
    pub from: u32,
    /// Level after
    pub to: u32,
}

impl LevelChange {
    /// Whether the addition crossed at least one level boundary
    #[must_use]
    pub const fn leveled_up(&self) -> bool {
        self.to > self.from
    }
}

/// The gamified progress core
///
/// Constructed explicitly over a store; there is no global instance. The
/// corrupt-record policy is fixed at construction so tests can exercise both
/// recovery paths.
#[derive(Debug)]
pub struct ProgressTracker<S: LocalStore> {
    store: S,
    key: String,
    points_per_level: u32,
    policy: CorruptPolicy,
    notifications: NotificationCenter,
    record: UserProgress,
}

impl<S: LocalStore> ProgressTracker<S> {
    /// Load the record under `key` and build a tracker around it
    ///
    /// A missing blob starts from defaults ([`LoadOutcome::Fresh`]); an
    /// unparseable one follows `policy`. The stored level is re-derived from
    /// the point total after loading, so a stale or hand-edited level field
    /// is corrected silently.
    ///
    /// # Errors
    /// Returns an error on store I/O failure, or on a corrupt blob under
    /// [`CorruptPolicy::Reject`]. Never panics.
    pub fn initialize(
        store: S,
        key: impl Into<String>,
        points_per_level: u32,
        policy: CorruptPolicy,
        notifications: NotificationCenter,
    ) -> Result<(Self, LoadOutcome), StoreError> {
        let key = key.into();
        let (mut record, outcome) = load_record::<UserProgress, S>(&store, &key, policy)?;
        record.recompute_level(points_per_level);

        Ok((
            Self {
                store,
                key,
                points_per_level,
                policy,
                notifications,
                record,
            },
            outcome,
        ))
    }

    /// The current record
    #[must_use]
    pub const fn progress(&self) -> &UserProgress {
        &self.record
    }

    /// The level quantum this tracker was built with
    #[must_use]
    pub const fn points_per_level(&self) -> u32 {
        self.points_per_level
    }

    /// The corrupt-record policy this tracker was built with
    #[must_use]
    pub const fn policy(&self) -> CorruptPolicy {
        self.policy
    }

    /// The notification center, for reading pending notices
    #[must_use]
    pub const fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// The notification center, for pumping or draining
    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    /// Give the store back, e.g. to hand it to another record's loader
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Award a badge by id
    ///
    /// Idempotent: when the id is already held nothing changes, nothing is
    /// posted, and `false` comes back. A fresh award appends the id, posts
    /// one badge notification carrying `display_name`, persists, and returns
    /// `true`.
    ///
    /// # Errors
    /// Returns an error when the record cannot be persisted.
    pub fn award_badge(&mut self, badge_id: &str, display_name: &str) -> Result<bool, StoreError> {
        if !self.record.add_badge(badge_id) {
            return Ok(false);
        }
        self.notifications.post(NotificationKind::BadgeEarned {
            display_name: display_name.to_string(),
        });
        self.persist()?;
        Ok(true)
    }

    /// Add points and re-derive the level
    ///
    /// Persists unconditionally, even for zero. Crossing one or several level
    /// boundaries posts exactly one level-up notification carrying the final
    /// level; the level never moves down here.
    ///
    /// # Errors
    /// Returns an error when the record cannot be persisted.
    pub fn add_points(&mut self, amount: u32) -> Result<LevelChange, StoreError> {
        let from = self.record.level;
        self.record.points = self.record.points.saturating_add(amount);
        self.check_level_up();
        self.persist()?;
        Ok(LevelChange {
            from,
            to: self.record.level,
        })
    }

    /// Raise the stored level when the point total has outgrown it
    ///
    /// One comparison, one notification: a jump across several boundaries
    /// announces only the level actually reached.
    fn check_level_up(&mut self) {
        let new_level = level_for(self.record.points, self.points_per_level);
        if new_level > self.record.level {
            self.record.level = new_level;
            self.notifications
                .post(NotificationKind::LevelUp { level: new_level });
        }
    }

    /// Record a course completion and award its points
    ///
    /// Idempotent by course id. The first completion appends the id and runs
    /// `points_reward` through the same path as [`add_points`], so a level-up
    /// earned by the reward is announced normally.
    ///
    /// # Errors
    /// Returns an error when the record cannot be persisted.
    pub fn complete_course(
        &mut self,
        course_id: &str,
        points_reward: u32,
    ) -> Result<bool, StoreError> {
        if !self.record.add_completed_course(course_id) {
            return Ok(false);
        }
        self.add_points(points_reward)?;
        Ok(true)
    }

    /// Award every catalog badge whose threshold the current points meet
    ///
    /// Already-held badges are skipped. Each new award posts its own badge
    /// notification; the record is persisted once for the whole batch.
    /// Returns the ids awarded, in catalog order.
    ///
    /// # Errors
    /// Returns an error when the record cannot be persisted.
    pub fn award_due_badges(&mut self, badges: &[Badge]) -> Result<Vec<String>, StoreError> {
        let mut earned = Vec::new();
        for badge in badges {
            if badge.earned_by(self.record.points) && self.record.add_badge(&badge.id) {
                self.notifications.post(NotificationKind::BadgeEarned {
                    display_name: badge.name.clone(),
                });
                earned.push(badge.id.clone());
            }
        }
        if !earned.is_empty() {
            self.persist()?;
        }
        Ok(earned)
    }

    /// Record the externally-computed team position
    ///
    /// # Errors
    /// Returns an error when the record cannot be persisted.
    pub fn set_team_ranking(&mut self, position: u32) -> Result<(), StoreError> {
        self.record.team_ranking = position;
        self.persist()
    }

    /// Explicit reset to a default record
    ///
    /// # Errors
    /// Returns an error when the record cannot be persisted.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.record = UserProgress::default();
        self.persist()
    }

    /// Write the record to the store as JSON
    ///
    /// Every mutating operation calls this before returning; it is public
    /// for hosts that edit the record through future batched APIs.
    ///
    /// # Errors
    /// Returns an error when encoding fails or the store cannot be written.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        save_record(&mut self.store, &self.key, &self.record)
    }
}
