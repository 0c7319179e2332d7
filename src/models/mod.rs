//! Data structures for the padel tournament: matches, rounds, tournament record, standings rows.

mod game;
mod player;
mod tournament;

pub use game::{GameMatch, MatchId, MatchStatus, Round, Team};
pub use player::{PlayerName, StandingRow};
pub use tournament::{
    ScoringOption, Tournament, TournamentError, TournamentId, TournamentType, MAX_COURTS,
};
