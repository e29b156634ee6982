//! User progress record

use serde::{Deserialize, Serialize};

/// Compute the level for a point total
///
/// One level per full `points_per_level` earned, starting at level 1. A zero
/// quantum is treated as 1 so the formula stays total.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(level_for(0, 100), 1);
/// assert_eq!(level_for(99, 100), 1);
/// assert_eq!(level_for(100, 100), 2);
/// ```
#[must_use]
pub const fn level_for(points: u32, points_per_level: u32) -> u32 {
    let quantum = if points_per_level == 0 {
        1
    } else {
        points_per_level
    };
    points / quantum + 1
}

/// The persisted gamification record for one user
///
/// Serialized as a single JSON blob under a fixed store key. Field names are
/// camelCase so records written by the original web front-end load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    /// Ids of completed courses, in completion order
    #[serde(default)]
    pub completed_courses: Vec<String>,

    /// Ids of earned badges, in award order
    #[serde(default)]
    pub badges: Vec<String>,

    /// Accumulated points
    #[serde(default)]
    pub points: u32,

    /// Stored level; kept consistent with `points` by the tracker
    #[serde(default)]
    pub level: u32,

    /// Externally-fed team position, 0 when unranked
    #[serde(default)]
    pub team_ranking: u32,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            completed_courses: Vec::new(),
            badges: Vec::new(),
            points: 0,
            level: 1,
            team_ranking: 0,
        }
    }
}

impl UserProgress {
    /// Whether the badge id has already been awarded
    #[must_use]
    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.badges.iter().any(|b| b == badge_id)
    }

    /// Record a badge award
    ///
    /// Returns `false` without changing anything when the id is already
    /// present, so callers can tell a fresh award from a repeat.
    pub fn add_badge(&mut self, badge_id: &str) -> bool {
        if self.has_badge(badge_id) {
            return false;
        }
        self.badges.push(badge_id.to_string());
        true
    }

    /// Whether the course id has already been completed
    #[must_use]
    pub fn has_completed(&self, course_id: &str) -> bool {
        self.completed_courses.iter().any(|c| c == course_id)
    }

    /// Record a course completion
    ///
    /// Returns `false` without changing anything when the id is already
    /// present.
    pub fn add_completed_course(&mut self, course_id: &str) -> bool {
        if self.has_completed(course_id) {
            return false;
        }
        self.completed_courses.push(course_id.to_string());
        true
    }

    /// Re-derive the stored level from the point total
    pub fn recompute_level(&mut self, points_per_level: u32) {
        self.level = level_for(self.points, points_per_level);
    }
}
