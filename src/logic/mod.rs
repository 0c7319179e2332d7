//! Tournament business logic: setup, round generation, standings, summary.

mod rounds;
mod setup;
mod standings;
mod summary;

pub use rounds::{
    courts_used, ensure_first_round, generate_first_round, generate_next_round, generate_round,
    next_round_number, PLAYERS_PER_COURT,
};
pub use setup::{create_tournament, edit_players, NewTournament, MIN_PLAYERS};
pub use standings::{compute_standings, ranked_players};
pub use summary::{standings_csv, summarize, TournamentSummary};
