//! Badge model

use serde::{Deserialize, Serialize};

/// A badge definition from the catalog
///
/// The progress record stores earned badges by id only; this type carries the
/// display name and the points threshold used for automatic awards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Badge id used in store records (e.g., "safety_expert")
    pub id: String,

    /// Display name shown in notifications (e.g., "Especialista em Segurança")
    pub name: String,

    /// How the badge is earned, shown in listings
    #[serde(default)]
    pub description: String,

    /// Points required before the badge is automatically awarded
    #[serde(default)]
    pub points_required: u32,

    /// Icon glyph shown beside the name in listings and reports
    #[serde(default)]
    pub icon: String,
}

impl Badge {
    /// Create a new badge definition
    #[must_use]
    pub const fn new(id: String, name: String, points_required: u32) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            points_required,
            icon: String::new(),
        }
    }

    /// Whether a user with `points` qualifies for this badge
    #[must_use]
    pub const fn earned_by(&self, points: u32) -> bool {
        points >= self.points_required
    }
}
