//! End-of-tournament summary and leaderboard export.

use crate::logic::standings::compute_standings;
use crate::models::{StandingRow, Tournament, TournamentError, TournamentType};
use serde::Serialize;

/// Places shown on the podium.
const PODIUM_SIZE: usize = 3;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    pub name: String,
    pub tournament_type: TournamentType,
    pub total_rounds: usize,
    pub completed_matches: usize,
    /// Top three rows (fewer with fewer players).
    pub podium: Vec<StandingRow>,
    pub standings: Vec<StandingRow>,
}

pub fn summarize(tournament: &Tournament) -> TournamentSummary {
    let standings = compute_standings(&tournament.players, &tournament.rounds);
    TournamentSummary {
        name: tournament.name.clone(),
        tournament_type: tournament.tournament_type,
        total_rounds: tournament.rounds.len(),
        completed_matches: tournament.completed_matches(),
        podium: standings.iter().take(PODIUM_SIZE).cloned().collect(),
        standings,
    }
}

/// Leaderboard as CSV, one row per player with a 1-based rank.
pub fn standings_csv(standings: &[StandingRow]) -> Result<String, TournamentError> {
    let export = |e: &dyn std::fmt::Display| TournamentError::Export(e.to_string());

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["rank", "name", "points", "matches_played", "wins", "losses", "draws"])
        .map_err(|e| export(&e))?;
    for (i, row) in standings.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            row.name.clone(),
            row.points.to_string(),
            row.matches_played.to_string(),
            row.wins.to_string(),
            row.losses.to_string(),
            row.draws.to_string(),
        ])
        .map_err(|e| export(&e))?;
    }
    let bytes = wtr.into_inner().map_err(|e| export(&e))?;
    String::from_utf8(bytes).map_err(|e| export(&e))
}
