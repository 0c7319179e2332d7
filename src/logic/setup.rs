//! Setup: validate the creation form and the player editor before touching a tournament.

use crate::models::{
    PlayerName, ScoringOption, Tournament, TournamentError, TournamentType, MAX_COURTS,
};
use serde::Deserialize;

/// Minimum players to create a tournament or save an edited player list.
pub const MIN_PLAYERS: usize = 2;

/// Creation form input.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTournament {
    pub name: String,
    #[serde(default)]
    pub tournament_type: TournamentType,
    #[serde(default = "default_courts")]
    pub number_of_courts: u32,
    pub players: Vec<String>,
    #[serde(default)]
    pub scoring_option: ScoringOption,
    /// Defaults to 21 points or 3 sets.
    #[serde(default)]
    pub target_value: Option<u32>,
}

fn default_courts() -> u32 {
    1
}

/// Trim names and drop blank entries.
fn clean_names(names: impl IntoIterator<Item = String>) -> Vec<PlayerName> {
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Validate the creation form and build a tournament with no rounds.
pub fn create_tournament(input: NewTournament) -> Result<Tournament, TournamentError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(TournamentError::MissingName);
    }

    let players = clean_names(input.players);
    if players.len() < MIN_PLAYERS {
        return Err(TournamentError::NotEnoughPlayersToCreate);
    }
    for (i, p) in players.iter().enumerate() {
        if players[..i].contains(p) {
            return Err(TournamentError::DuplicatePlayerName(p.clone()));
        }
    }

    if !(1..=MAX_COURTS).contains(&input.number_of_courts) {
        return Err(TournamentError::InvalidCourtCount(input.number_of_courts));
    }

    let scoring = input.scoring_option;
    let target_value = input
        .target_value
        .unwrap_or_else(|| scoring.default_target());
    if !(1..=scoring.max_target()).contains(&target_value) {
        return Err(TournamentError::InvalidTargetValue {
            scoring,
            value: target_value,
        });
    }

    let tournament = Tournament::new(
        name,
        input.tournament_type,
        input.number_of_courts,
        players,
        scoring,
        target_value,
    );
    log::info!(
        "Created tournament {} ({:?}, {} players, {} court(s))",
        tournament.id,
        tournament.tournament_type,
        tournament.players.len(),
        tournament.number_of_courts
    );
    Ok(tournament)
}

/// Apply the player editor: trim, drop blanks, skip names already in the list,
/// require at least 2 players. Past rounds are left as they are.
pub fn edit_players(tournament: &mut Tournament, names: Vec<String>) -> Result<(), TournamentError> {
    let mut players: Vec<PlayerName> = Vec::new();
    for name in clean_names(names) {
        if !players.contains(&name) {
            players.push(name);
        }
    }
    if players.len() < MIN_PLAYERS {
        return Err(TournamentError::NotEnoughPlayersToCreate);
    }
    tournament.replace_players(players);
    Ok(())
}
