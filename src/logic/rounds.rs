//! Round generation: court assignment and pairing for Americano and Mexicano.

use crate::logic::standings::ranked_players;
use crate::models::{GameMatch, PlayerName, Round, Tournament, TournamentError, TournamentType};
use rand::seq::SliceRandom;
use rand::Rng;

/// Players per court (2v2).
pub const PLAYERS_PER_COURT: usize = 4;

/// Courts that can be filled: `min(number_of_courts, player_count / 4)`.
pub fn courts_used(player_count: usize, number_of_courts: u32) -> usize {
    (number_of_courts as usize).min(player_count / PLAYERS_PER_COURT)
}

/// Number for the next round: highest existing round + 1, or 1 when there are none.
pub fn next_round_number(rounds: &[Round]) -> u32 {
    rounds.iter().map(|r| r.round).max().map_or(1, |n| n + 1)
}

/// Generate round 1. Always random, whatever the format, because no standings exist yet.
///
/// Returns an empty list (no round at all) when fewer than 4 players are available.
pub fn generate_first_round<R: Rng + ?Sized>(
    players: &[PlayerName],
    number_of_courts: u32,
    format: TournamentType,
    rng: &mut R,
) -> Vec<Round> {
    log::debug!("Generating first round ({:?}, {} players)", format, players.len());
    let matches = americano_matches(players, number_of_courts, 1, rng);
    if matches.is_empty() {
        return Vec::new();
    }
    vec![Round { round: 1, matches }]
}

/// Generate round `round_number` from the current players and all rounds played so far.
///
/// Americano shuffles every round. Mexicano ranks players by current standings and
/// fills courts with consecutive groups of 4; with no rounds played yet it falls back
/// to the random rule. Returns None when no court can be filled.
pub fn generate_next_round<R: Rng + ?Sized>(
    players: &[PlayerName],
    number_of_courts: u32,
    round_number: u32,
    rounds: &[Round],
    format: TournamentType,
    rng: &mut R,
) -> Option<Round> {
    let matches = match format {
        TournamentType::Mexicano if !rounds.is_empty() => {
            let ranked = ranked_players(players, rounds);
            mexicano_matches(&ranked, number_of_courts, round_number)
        }
        _ => americano_matches(players, number_of_courts, round_number, rng),
    };
    if matches.is_empty() {
        return None;
    }
    let round = Round {
        round: round_number,
        matches,
    };
    log::debug!(
        "Generated round {} ({:?}): {} court(s), {} sitting out",
        round.round,
        format,
        round.matches.len(),
        round.sitting_out(players.len())
    );
    Some(round)
}

/// Random pairing: uniform shuffle, 4 per court in shuffled order,
/// first two vs last two. Leftover players sit out.
fn americano_matches<R: Rng + ?Sized>(
    players: &[PlayerName],
    number_of_courts: u32,
    round_number: u32,
    rng: &mut R,
) -> Vec<GameMatch> {
    let courts = courts_used(players.len(), number_of_courts);
    if courts == 0 {
        return Vec::new();
    }
    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);

    shuffled
        .chunks_exact(PLAYERS_PER_COURT)
        .take(courts)
        .zip(1..)
        .map(|(group, court)| {
            GameMatch::new(
                round_number,
                court,
                [group[0].clone(), group[1].clone()],
                [group[2].clone(), group[3].clone()],
            )
        })
        .collect()
}

/// Rank pairing: court i takes ranks 4(i-1)+1..=4i; inside each group
/// #1 & #4 play #2 & #3. Players below the last full group sit out.
fn mexicano_matches(ranked: &[PlayerName], number_of_courts: u32, round_number: u32) -> Vec<GameMatch> {
    let courts = courts_used(ranked.len(), number_of_courts);

    ranked
        .chunks_exact(PLAYERS_PER_COURT)
        .take(courts)
        .zip(1..)
        .map(|(group, court)| {
            GameMatch::new(
                round_number,
                court,
                [group[0].clone(), group[3].clone()],
                [group[1].clone(), group[2].clone()],
            )
        })
        .collect()
}

/// Generate round 1 the first time a tournament is shown without rounds.
///
/// Returns true when a round was added. Does nothing if rounds already exist
/// or fewer than 4 players are registered.
pub fn ensure_first_round<R: Rng + ?Sized>(tournament: &mut Tournament, rng: &mut R) -> bool {
    if !tournament.rounds.is_empty() {
        return false;
    }
    let rounds = generate_first_round(
        &tournament.players,
        tournament.number_of_courts,
        tournament.tournament_type,
        rng,
    );
    if rounds.is_empty() {
        return false;
    }
    tournament.replace_rounds(rounds);
    log::info!("Tournament {} started with round 1", tournament.id);
    true
}

/// Append the next round to the tournament and return its number.
///
/// Previous rounds are never touched. If no court can be filled the tournament is
/// left unchanged and `NotEnoughPlayers` is returned.
pub fn generate_round<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<u32, TournamentError> {
    let round_number = next_round_number(&tournament.rounds);
    let round = generate_next_round(
        &tournament.players,
        tournament.number_of_courts,
        round_number,
        &tournament.rounds,
        tournament.tournament_type,
        rng,
    )
    .ok_or(TournamentError::NotEnoughPlayers)?;

    let mut rounds = tournament.rounds.clone();
    rounds.push(round);
    tournament.replace_rounds(rounds);
    log::info!("Tournament {} advanced to round {}", tournament.id, round_number);
    Ok(round_number)
}
