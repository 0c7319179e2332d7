//! Match (one court in one round) and Round.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match (`round-{n}-court-{c}-{suffix}`).
pub type MatchId = String;

/// A pair of players sharing one side of the court.
pub type Team = [String; 2];

/// Whether a match has been scored yet.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Completed,
}

/// A single 2v2 match on one court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMatch {
    pub id: MatchId,
    /// 1-based court number.
    pub court: u32,
    pub team1: Team,
    pub team2: Team,
    /// None until the match is scored.
    #[serde(default)]
    pub score1: Option<u32>,
    #[serde(default)]
    pub score2: Option<u32>,
    #[serde(default)]
    pub status: MatchStatus,
}

impl GameMatch {
    pub fn new(round: u32, court: u32, team1: Team, team2: Team) -> Self {
        Self {
            id: format!("round-{round}-court-{court}-{}", Uuid::new_v4().simple()),
            court,
            team1,
            team2,
            score1: None,
            score2: None,
            status: MatchStatus::Upcoming,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Both scores, only for completed matches.
    pub fn scores(&self) -> Option<(u32, u32)> {
        match (self.status, self.score1, self.score2) {
            (MatchStatus::Completed, Some(s1), Some(s2)) => Some((s1, s2)),
            _ => None,
        }
    }

    /// All four players on court, team 1 first.
    pub fn players(&self) -> impl Iterator<Item = &String> {
        self.team1.iter().chain(self.team2.iter())
    }

    /// Record team 1's score; team 2 gets the remainder of `target_value`.
    ///
    /// Completion is one-way. On any error the match is left untouched.
    pub fn record_score(&mut self, score1: Option<u32>, target_value: u32) -> Result<(), TournamentError> {
        if self.is_completed() {
            return Err(TournamentError::MatchAlreadyCompleted(self.id.clone()));
        }
        let score1 = score1.ok_or(TournamentError::NoScoreSelected)?;
        if score1 > target_value {
            return Err(TournamentError::ScoreOutOfRange {
                score: score1,
                target: target_value,
            });
        }
        self.score1 = Some(score1);
        self.score2 = Some(target_value - score1);
        self.status = MatchStatus::Completed;
        Ok(())
    }
}

/// One round: all matches played at the same time across the active courts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round: u32,
    pub matches: Vec<GameMatch>,
}

impl Round {
    /// Number of players sitting out this round out of `player_count`.
    pub fn sitting_out(&self, player_count: usize) -> usize {
        player_count.saturating_sub(self.matches.len() * 4)
    }
}
