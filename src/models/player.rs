//! Player names and the derived StandingRow.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Players are identified only by their display name.
pub type PlayerName = String;

/// One row of the leaderboard. Derived from completed matches, never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub name: PlayerName,
    pub points: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl StandingRow {
    /// Zero-valued row for a player with no completed matches.
    pub fn new(name: impl Into<PlayerName>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Credit one completed match: `own` is this player's team score, `other` the opponents'.
    pub fn record_result(&mut self, own: u32, other: u32) {
        self.points += own;
        self.matches_played += 1;
        match own.cmp(&other) {
            Ordering::Greater => self.wins += 1,
            Ordering::Less => self.losses += 1,
            Ordering::Equal => self.draws += 1,
        }
    }

    /// Leaderboard order: points desc, wins desc, losses asc. Equal rows compare Equal
    /// so a stable sort keeps their input order.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.wins.cmp(&self.wins))
            .then_with(|| self.losses.cmp(&other.losses))
    }
}
