//! Ranking command handler

use crate::args::RankingSubcommand;
use crate::commands::{load_catalog, open_tracker};
use asteca_progress::config::Config;
use asteca_progress::core::ranking::{
    position_for_points, rank_individuals, rank_teams, team_position,
};
use logger::error;

/// Dispatch ranking subcommands
pub fn run(subcommand: Option<RankingSubcommand>, config: &Config) {
    let result = match subcommand {
        None | Some(RankingSubcommand::Teams) => teams(config),
        Some(RankingSubcommand::Individuals) => individuals(config),
    };

    if let Err(err) = result {
        error!("Ranking command failed: {err}");
        eprintln!("{err}");
    }
}

/// Print the team ranking table
fn teams(config: &Config) -> Result<(), String> {
    let catalog = load_catalog(config);
    let standings = rank_teams(&catalog.teams);

    if standings.is_empty() {
        println!("ℹ The catalog has no teams");
        return Ok(());
    }

    println!("\n=== Team Ranking ===\n");
    println!("{:>4}  {:<28} {:>8} {:>8}", "Pos", "Team", "Members", "Points");
    for standing in &standings {
        let marker = if !config.user.team.is_empty() && standing.name == config.user.team {
            " ◀"
        } else {
            ""
        };
        println!(
            "{:>4}  {:<28} {:>8} {:>8}{marker}",
            standing.position, standing.name, standing.members, standing.points
        );
    }

    if !config.user.team.is_empty() {
        match team_position(&catalog.teams, &config.user.team) {
            Some(position) => {
                println!("\nYour team '{}' is at position {position}", config.user.team);
                sync_team_position(config, position);
            }
            None => println!("\nℹ Team '{}' is not in the catalog", config.user.team),
        }
    }

    Ok(())
}

/// Write the computed team position into the stored record
///
/// The position feeds the progress summary and reports; a store failure here
/// only costs the sync, so it is logged rather than propagated.
fn sync_team_position(config: &Config, position: u32) {
    let synced = open_tracker(config).and_then(|mut tracker| {
        tracker
            .set_team_ranking(position)
            .map_err(|e| format!("✗ Failed to save progress: {e}"))
    });

    if let Err(err) = synced {
        error!("Team position sync failed: {err}");
        eprintln!("{err}");
    }
}

/// Print the individual ranking table
fn individuals(config: &Config) -> Result<(), String> {
    let catalog = load_catalog(config);
    let standings = rank_individuals(&catalog.individuals);

    if standings.is_empty() {
        println!("ℹ The catalog has no individuals");
        return Ok(());
    }

    println!("\n=== Individual Ranking ===\n");
    println!("{:>4}  {:<24} {:<28} {:>8}", "Pos", "Name", "Team", "Points");
    for standing in &standings {
        println!(
            "{:>4}  {:<24} {:<28} {:>8}",
            standing.position, standing.name, standing.team, standing.points
        );
    }

    // Where the stored points would place the user among them
    let tracker = open_tracker(config)?;
    let points = tracker.progress().points;
    let position = position_for_points(&catalog.individuals, points);
    println!("\nWith {points} points you would rank at position {position}");

    Ok(())
}
