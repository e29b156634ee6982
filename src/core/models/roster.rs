//! Ranking roster models

use serde::{Deserialize, Serialize};

/// A team row in the ranking roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEntry {
    /// Team name
    pub name: String,

    /// Member count
    #[serde(default)]
    pub members: u32,

    /// Accumulated team points
    #[serde(default)]
    pub points: u32,
}

impl TeamEntry {
    /// Create a new team entry
    #[must_use]
    pub const fn new(name: String, members: u32, points: u32) -> Self {
        Self {
            name,
            members,
            points,
        }
    }
}

/// An individual row in the ranking roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualEntry {
    /// Display name
    pub name: String,

    /// Team the individual belongs to
    #[serde(default)]
    pub team: String,

    /// Accumulated points
    #[serde(default)]
    pub points: u32,
}

impl IndividualEntry {
    /// Create a new individual entry
    #[must_use]
    pub const fn new(name: String, team: String, points: u32) -> Self {
        Self { name, team, points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_entry_creation() {
        let team = TeamEntry::new("Equipe Construção A".to_string(), 5, 1250);

        assert_eq!(team.name, "Equipe Construção A");
        assert_eq!(team.members, 5);
        assert_eq!(team.points, 1250);
    }

    #[test]
    fn test_individual_entry_creation() {
        let entry = IndividualEntry::new("João Silva".to_string(), "Equipe Construção A".to_string(), 320);

        assert_eq!(entry.name, "João Silva");
        assert_eq!(entry.points, 320);
    }
}
