//! Course and badge catalog
//!
//! Loaded from TOML: either the built-in data set compiled into the binary
//! or an external file. Validation rejects duplicate ids and zero badge
//! thresholds before anything else sees the data.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::models::{Badge, Course, IndividualEntry, TeamEntry};

/// Built-in catalog shipped with the binary
const CATALOG_DEFAULTS: &str = include_str!("../assets/DefaultCatalog.toml");

/// Catalog loading failures
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File could not be read
    #[error("could not read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML was malformed or did not match the schema
    #[error("invalid catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two courses share an id
    #[error("duplicate course id '{0}'")]
    DuplicateCourse(String),

    /// Two badges share an id
    #[error("duplicate badge id '{0}'")]
    DuplicateBadge(String),

    /// A badge can never be earned meaningfully
    #[error("badge '{0}' must have a points threshold of at least 1")]
    ZeroThreshold(String),
}

/// The course/badge/roster data set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Available courses
    #[serde(default)]
    pub courses: Vec<Course>,

    /// Badge definitions
    #[serde(default)]
    pub badges: Vec<Badge>,

    /// Team ranking roster
    #[serde(default)]
    pub teams: Vec<TeamEntry>,

    /// Individual ranking roster
    #[serde(default)]
    pub individuals: Vec<IndividualEntry>,
}

impl Catalog {
    /// Parse a catalog from a TOML string
    ///
    /// # Errors
    /// Returns an error when the TOML is malformed, an id is duplicated, or
    /// a badge threshold is zero.
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(toml_str)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or fails
    /// [`from_toml`](Self::from_toml) validation.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The built-in catalog compiled into the binary
    ///
    /// # Panics
    /// Panics if the compiled-in catalog is invalid. This should never happen
    /// in practice since the data ships with the binary and is covered by
    /// tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml(CATALOG_DEFAULTS).expect("Failed to parse compiled-in catalog")
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut course_ids = HashSet::new();
        for course in &self.courses {
            if !course_ids.insert(course.id.as_str()) {
                return Err(CatalogError::DuplicateCourse(course.id.clone()));
            }
        }

        let mut badge_ids = HashSet::new();
        for badge in &self.badges {
            if !badge_ids.insert(badge.id.as_str()) {
                return Err(CatalogError::DuplicateBadge(badge.id.clone()));
            }
            if badge.points_required == 0 {
                return Err(CatalogError::ZeroThreshold(badge.id.clone()));
            }
        }

        Ok(())
    }

    /// Look up a course by id
    #[must_use]
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Look up a badge by id
    #[must_use]
    pub fn badge(&self, id: &str) -> Option<&Badge> {
        self.badges.iter().find(|b| b.id == id)
    }

    /// Total points available from completing every course
    #[must_use]
    pub fn total_course_points(&self) -> u32 {
        self.courses.iter().map(|c| c.points_reward).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.courses.len(), 6);
        assert_eq!(catalog.badges.len(), 4);
        assert_eq!(catalog.teams.len(), 5);
        assert_eq!(catalog.individuals.len(), 5);
    }

    #[test]
    fn test_builtin_course_data() {
        let catalog = Catalog::builtin();

        let nr35 = catalog.course("nr35").expect("nr35 present");
        assert_eq!(nr35.title, "NR-35 - Trabalho em Altura");
        assert_eq!(nr35.points_reward, 50);
        assert_eq!(nr35.module_count(), 6);
        assert_eq!(nr35.price, 180);

        let forklift = catalog.course("empilhadeira").expect("empilhadeira present");
        assert_eq!(forklift.points_reward, 80);
    }

    #[test]
    fn test_builtin_badge_thresholds() {
        let catalog = Catalog::builtin();

        let expert = catalog.badge("safety_expert").expect("badge present");
        assert_eq!(expert.name, "Especialista em Segurança");
        assert_eq!(expert.points_required, 150);

        let master = catalog.badge("safety_master").expect("badge present");
        assert_eq!(master.points_required, 400);
    }

    #[test]
    fn test_lookup_unknown_id() {
        let catalog = Catalog::builtin();

        assert!(catalog.course("nr99").is_none());
        assert!(catalog.badge("unheard_of").is_none());
    }

    #[test]
    fn test_total_course_points() {
        let catalog = Catalog::builtin();

        // 50 + 60 + 40 + 30 + 70 + 80
        assert_eq!(catalog.total_course_points(), 330);
    }

    #[test]
    fn test_duplicate_course_rejected() {
        let toml_str = r#"
            [[courses]]
            id = "nr35"
            title = "A"

            [[courses]]
            id = "nr35"
            title = "B"
        "#;

        let err = Catalog::from_toml(toml_str).expect_err("should reject");
        assert!(matches!(err, CatalogError::DuplicateCourse(id) if id == "nr35"));
    }

    #[test]
    fn test_duplicate_badge_rejected() {
        let toml_str = r#"
            [[badges]]
            id = "b"
            name = "One"
            points_required = 10

            [[badges]]
            id = "b"
            name = "Two"
            points_required = 20
        "#;

        let err = Catalog::from_toml(toml_str).expect_err("should reject");
        assert!(matches!(err, CatalogError::DuplicateBadge(id) if id == "b"));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let toml_str = r#"
            [[badges]]
            id = "free"
            name = "Free Badge"
            points_required = 0
        "#;

        let err = Catalog::from_toml(toml_str).expect_err("should reject");
        assert!(matches!(err, CatalogError::ZeroThreshold(id) if id == "free"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = Catalog::from_toml("[[courses]\nid=").expect_err("should reject");
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
