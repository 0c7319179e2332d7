//! Tournament repository: whole-value storage of tournament records.

use crate::models::{PlayerName, Round, Tournament, TournamentError, TournamentId};

/// Whole-value replacement of one part of a stored tournament.
#[derive(Clone, Debug)]
pub enum TournamentUpdate {
    Rounds(Vec<Round>),
    Players(Vec<PlayerName>),
}

/// Storage for tournaments. The core only hands whole `Tournament` values in and out.
pub trait TournamentRepository {
    /// All tournaments, oldest first.
    fn list(&self) -> Vec<Tournament>;

    fn get(&self, id: TournamentId) -> Option<Tournament>;

    /// Insert, or replace the tournament with the same id.
    fn upsert(&mut self, tournament: Tournament);

    /// Returns the removed tournament, if any.
    fn delete(&mut self, id: TournamentId) -> Option<Tournament>;

    fn clear(&mut self);

    /// Apply a whole-value update to a stored tournament and return the new record.
    fn apply(&mut self, id: TournamentId, update: TournamentUpdate) -> Result<Tournament, TournamentError> {
        let mut tournament = self.get(id).ok_or(TournamentError::NotFound(id))?;
        match update {
            TournamentUpdate::Rounds(rounds) => tournament.replace_rounds(rounds),
            TournamentUpdate::Players(players) => tournament.replace_players(players),
        }
        self.upsert(tournament.clone());
        Ok(tournament)
    }
}

/// In-memory repository, kept in insertion order. One per browser session.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    tournaments: Vec<Tournament>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }
}

impl TournamentRepository for MemoryRepository {
    fn list(&self) -> Vec<Tournament> {
        self.tournaments.clone()
    }

    fn get(&self, id: TournamentId) -> Option<Tournament> {
        self.tournaments.iter().find(|t| t.id == id).cloned()
    }

    fn upsert(&mut self, tournament: Tournament) {
        match self.tournaments.iter_mut().find(|t| t.id == tournament.id) {
            Some(existing) => *existing = tournament,
            None => self.tournaments.push(tournament),
        }
    }

    fn delete(&mut self, id: TournamentId) -> Option<Tournament> {
        let idx = self.tournaments.iter().position(|t| t.id == id)?;
        Some(self.tournaments.remove(idx))
    }

    fn clear(&mut self) {
        self.tournaments.clear();
    }
}
