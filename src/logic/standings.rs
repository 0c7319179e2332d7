//! Standings: fold completed matches into a ranked leaderboard.

use crate::models::{PlayerName, Round, StandingRow};
use std::collections::HashMap;

/// Compute the leaderboard for `players` from every completed match in `rounds`.
///
/// 1. One zero row per player, in input order (players without matches still appear).
/// 2. Each completed match credits both members of each team with that team's score,
///    one match played, and a win, loss or draw.
/// 3. Names that are no longer in `players` are skipped; their matches stay in `rounds`.
/// 4. Stable sort by points desc, wins desc, losses asc.
///
/// A name listed twice in `players` yields a single row and its stats are merged.
pub fn compute_standings(players: &[PlayerName], rounds: &[Round]) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = Vec::with_capacity(players.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(players.len());
    for name in players {
        if !index.contains_key(name.as_str()) {
            index.insert(name.as_str(), rows.len());
            rows.push(StandingRow::new(name.as_str()));
        }
    }

    for m in rounds.iter().flat_map(|r| r.matches.iter()) {
        let Some((score1, score2)) = m.scores() else {
            continue;
        };
        for name in &m.team1 {
            if let Some(&i) = index.get(name.as_str()) {
                rows[i].record_result(score1, score2);
            }
        }
        for name in &m.team2 {
            if let Some(&i) = index.get(name.as_str()) {
                rows[i].record_result(score2, score1);
            }
        }
    }

    rows.sort_by(StandingRow::rank_cmp);
    rows
}

/// Player names in leaderboard order, best first.
pub fn ranked_players(players: &[PlayerName], rounds: &[Round]) -> Vec<PlayerName> {
    compute_standings(players, rounds)
        .into_iter()
        .map(|row| row.name)
        .collect()
}
