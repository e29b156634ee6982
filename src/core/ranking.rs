//! Computed standings
//!
//! The catalog stores rosters as plain point tallies; positions are always
//! computed here, 1-based, points descending with name as the deterministic
//! tie-break.

use crate::core::models::{IndividualEntry, TeamEntry};

/// A team with its computed position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStanding {
    /// 1-based rank
    pub position: u32,
    /// Team name
    pub name: String,
    /// Member count
    pub members: u32,
    /// Team points
    pub points: u32,
}

/// An individual with their computed position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualStanding {
    /// 1-based rank
    pub position: u32,
    /// Display name
    pub name: String,
    /// Team name
    pub team: String,
    /// Points
    pub points: u32,
}

/// Rank teams by points
#[must_use]
pub fn rank_teams(teams: &[TeamEntry]) -> Vec<TeamStanding> {
    let mut sorted: Vec<&TeamEntry> = teams.iter().collect();
    sorted.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));

    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, team)| TeamStanding {
            position: idx as u32 + 1,
            name: team.name.clone(),
            members: team.members,
            points: team.points,
        })
        .collect()
}

/// Rank individuals by points
#[must_use]
pub fn rank_individuals(individuals: &[IndividualEntry]) -> Vec<IndividualStanding> {
    let mut sorted: Vec<&IndividualEntry> = individuals.iter().collect();
    sorted.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));

    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| IndividualStanding {
            position: idx as u32 + 1,
            name: entry.name.clone(),
            team: entry.team.clone(),
            points: entry.points,
        })
        .collect()
}

/// The computed position of a named team, feeding the progress record's
/// `teamRanking` field
#[must_use]
pub fn team_position(teams: &[TeamEntry], name: &str) -> Option<u32> {
    rank_teams(teams)
        .iter()
        .find(|standing| standing.name == name)
        .map(|standing| standing.position)
}

/// Where a point total would land in the individual ranking
///
/// Ties rank below the existing entries, so matching the current leader
/// exactly yields position 2.
#[must_use]
pub fn position_for_points(individuals: &[IndividualEntry], points: u32) -> u32 {
    let ahead = individuals.iter().filter(|e| e.points >= points).count();
    ahead as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_teams() -> Vec<TeamEntry> {
        vec![
            TeamEntry::new("Soldadores Unidos".to_string(), 3, 620),
            TeamEntry::new("Equipe Construção A".to_string(), 5, 1250),
            TeamEntry::new("Eletricistas Pro".to_string(), 4, 580),
            TeamEntry::new("Pintores Pro".to_string(), 4, 980),
            TeamEntry::new("Equipe Operadores".to_string(), 6, 750),
        ]
    }

    fn roster_individuals() -> Vec<IndividualEntry> {
        vec![
            IndividualEntry::new("João Silva".to_string(), "Equipe Construção A".to_string(), 320),
            IndividualEntry::new("Aluno Teste".to_string(), "Pintores Pro".to_string(), 250),
            IndividualEntry::new("Maria Santos".to_string(), "Equipe Operadores".to_string(), 180),
            IndividualEntry::new("Carlos Oliveira".to_string(), "Soldadores Unidos".to_string(), 160),
            IndividualEntry::new("Ana Costa".to_string(), "Eletricistas Pro".to_string(), 140),
        ]
    }

    #[test]
    fn test_teams_ranked_by_points_descending() {
        let standings = rank_teams(&roster_teams());

        let names: Vec<&str> = standings.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Equipe Construção A",
                "Pintores Pro",
                "Equipe Operadores",
                "Soldadores Unidos",
                "Eletricistas Pro"
            ]
        );
        assert_eq!(standings[0].position, 1);
        assert_eq!(standings[4].position, 5);
    }

    #[test]
    fn test_ties_break_by_name() {
        let teams = vec![
            TeamEntry::new("Zeta".to_string(), 2, 500),
            TeamEntry::new("Alfa".to_string(), 2, 500),
        ];

        let standings = rank_teams(&teams);
        assert_eq!(standings[0].name, "Alfa");
        assert_eq!(standings[0].position, 1);
        assert_eq!(standings[1].name, "Zeta");
        assert_eq!(standings[1].position, 2);
    }

    #[test]
    fn test_individuals_ranked() {
        let standings = rank_individuals(&roster_individuals());

        assert_eq!(standings[0].name, "João Silva");
        assert_eq!(standings[0].position, 1);
        assert_eq!(standings[1].name, "Aluno Teste");
        assert_eq!(standings[1].position, 2);
    }

    #[test]
    fn test_team_position_lookup() {
        let teams = roster_teams();

        assert_eq!(team_position(&teams, "Pintores Pro"), Some(2));
        assert_eq!(team_position(&teams, "Eletricistas Pro"), Some(5));
        assert_eq!(team_position(&teams, "Equipe Fantasma"), None);
    }

    #[test]
    fn test_position_for_points() {
        let individuals = roster_individuals();

        assert_eq!(position_for_points(&individuals, 400), 1);
        assert_eq!(position_for_points(&individuals, 320), 2, "tie ranks below");
        assert_eq!(position_for_points(&individuals, 200), 3);
        assert_eq!(position_for_points(&individuals, 0), 6);
    }
}
