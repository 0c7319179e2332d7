//! Shared builders for integration tests.

#![allow(dead_code)]

use padel_tournament::{GameMatch, PlayerName, Round, ScoringOption, Tournament, TournamentType};

pub fn names(list: &[&str]) -> Vec<PlayerName> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn numbered_players(n: usize) -> Vec<PlayerName> {
    (1..=n).map(|i| format!("P{i}")).collect()
}

/// A match that is already scored `score1`-`score2` (target is their sum).
pub fn completed(round: u32, court: u32, team1: [&str; 2], team2: [&str; 2], score1: u32, score2: u32) -> GameMatch {
    let mut m = GameMatch::new(
        round,
        court,
        [team1[0].to_string(), team1[1].to_string()],
        [team2[0].to_string(), team2[1].to_string()],
    );
    m.record_score(Some(score1), score1 + score2).unwrap();
    m
}

pub fn round(number: u32, matches: Vec<GameMatch>) -> Round {
    Round { round: number, matches }
}

pub fn tournament(players: Vec<PlayerName>, courts: u32, format: TournamentType) -> Tournament {
    Tournament::new("Friday padel", format, courts, players, ScoringOption::Points, 21)
}
