//! Padel tournament organizer (Americano / Mexicano): library with models, pairing and standings.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    compute_standings, courts_used, create_tournament, edit_players, ensure_first_round,
    generate_first_round, generate_next_round, generate_round, next_round_number,
    ranked_players, standings_csv, summarize, NewTournament, TournamentSummary,
};
pub use models::{
    GameMatch, MatchId, MatchStatus, PlayerName, Round, ScoringOption, StandingRow, Team,
    Tournament, TournamentError, TournamentId, TournamentType,
};
pub use store::{MemoryRepository, TournamentRepository, TournamentUpdate};
