//! Integration tests for the course and badge catalog

use asteca_progress::core::catalog::{Catalog, CatalogError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_builtin_catalog_matches_the_site() {
    let catalog = Catalog::builtin();

    assert_eq!(catalog.courses.len(), 6);
    assert_eq!(catalog.badges.len(), 4);
    assert_eq!(catalog.teams.len(), 5);
    assert_eq!(catalog.individuals.len(), 5);
    assert_eq!(catalog.total_course_points(), 330);
}

#[test]
fn test_builtin_course_details() {
    let catalog = Catalog::builtin();

    let nr35 = catalog.course("nr35").expect("nr35 present");
    assert_eq!(nr35.title, "NR-35 - Trabalho em Altura");
    assert_eq!(nr35.price, 180);
    assert_eq!(nr35.points_reward, 50);
    assert_eq!(nr35.modules.len(), 6);

    let forklift = catalog.course("empilhadeira").expect("empilhadeira present");
    assert_eq!(forklift.points_reward, 80);

    assert!(catalog.course("nr99").is_none());
}

#[test]
fn test_builtin_badge_thresholds() {
    let catalog = Catalog::builtin();

    let thresholds: Vec<(&str, u32)> = catalog
        .badges
        .iter()
        .map(|b| (b.id.as_str(), b.points_required))
        .collect();

    assert_eq!(
        thresholds,
        vec![
            ("safety_expert", 150),
            ("team_player", 100),
            ("perfect_attendance", 50),
            ("safety_master", 400),
        ]
    );
}

#[test]
fn test_catalog_loads_from_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("catalog.toml");
    let toml_str = r#"
[[courses]]
id = "nr33"
title = "NR33 - Espaços Confinados"
description = "Treinamento para espaços confinados"
price = 200
duration = "16 horas"
points_reward = 45
modules = ["Introdução", "Riscos"]

[[badges]]
id = "starter"
name = "Iniciante"
description = "Primeiro curso"
icon = "⭐"
points_required = 10
"#;
    fs::write(&path, toml_str).expect("Failed to write catalog");

    let catalog = Catalog::load(&path).expect("load");

    assert_eq!(catalog.courses.len(), 1);
    assert_eq!(catalog.badges.len(), 1);
    assert_eq!(catalog.course("nr33").expect("present").points_reward, 45);
}

#[test]
fn test_missing_file_reports_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nowhere.toml");

    let err = Catalog::load(&path).expect_err("missing file");
    assert!(matches!(err, CatalogError::Io(_)));
}
