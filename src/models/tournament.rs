//! Tournament, its configuration enums, and TournamentError.

use crate::models::game::{GameMatch, Round};
use crate::models::player::PlayerName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than 4 players: no court can be filled.
    NotEnoughPlayers,
    /// Fewer than 2 players when creating or editing the player list.
    NotEnoughPlayersToCreate,
    /// Tournament name is empty.
    MissingName,
    /// A player with this name already exists.
    DuplicatePlayerName(String),
    /// Court count outside 1..=10.
    InvalidCourtCount(u32),
    /// Target value outside the range allowed for the scoring option.
    InvalidTargetValue { scoring: ScoringOption, value: u32 },
    /// Score submitted without a value.
    NoScoreSelected,
    /// Submitted score is above the target value.
    ScoreOutOfRange { score: u32, target: u32 },
    /// Match is already completed; scores are final.
    MatchAlreadyCompleted(String),
    /// No match with this id in any round.
    MatchNotFound(String),
    /// No tournament with this id in the repository.
    NotFound(TournamentId),
    /// Writing the standings export failed.
    Export(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughPlayers => write!(f, "Need at least 4 players to generate matches"),
            TournamentError::NotEnoughPlayersToCreate => write!(f, "Please add at least 2 players"),
            TournamentError::MissingName => write!(f, "Please enter a tournament name"),
            TournamentError::DuplicatePlayerName(name) => {
                write!(f, "A player named {} already exists", name)
            }
            TournamentError::InvalidCourtCount(n) => {
                write!(f, "Number of courts must be between 1 and {} (got {})", MAX_COURTS, n)
            }
            TournamentError::InvalidTargetValue { scoring, value } => write!(
                f,
                "{} target must be between 1 and {} (got {})",
                scoring.label(),
                scoring.max_target(),
                value
            ),
            TournamentError::NoScoreSelected => write!(f, "Select a score before confirming"),
            TournamentError::ScoreOutOfRange { score, target } => {
                write!(f, "Score {} is above the target of {}", score, target)
            }
            TournamentError::MatchAlreadyCompleted(_) => write!(f, "Match already has a final score"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::NotFound(_) => write!(f, "No tournament"),
            TournamentError::Export(e) => write!(f, "Could not export standings: {}", e),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Upper bound for `number_of_courts`.
pub const MAX_COURTS: u32 = 10;

/// How rounds after the first are paired.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentType {
    /// Random pairings every round.
    #[default]
    Americano,
    /// Rank-based pairings from round 2 on.
    Mexicano,
}

/// Unit of the target value. Both units force `score1 + score2 == target_value`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringOption {
    #[default]
    Points,
    Sets,
}

impl ScoringOption {
    pub fn max_target(self) -> u32 {
        match self {
            ScoringOption::Points => 21,
            ScoringOption::Sets => 6,
        }
    }

    pub fn default_target(self) -> u32 {
        match self {
            ScoringOption::Points => 21,
            ScoringOption::Sets => 3,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ScoringOption::Points => "Points",
            ScoringOption::Sets => "Sets",
        }
    }
}

/// Full tournament record as handed to and from the persistence layer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub tournament_type: TournamentType,
    pub number_of_courts: u32,
    /// Current players in entry order. Names are the identity key.
    pub players: Vec<PlayerName>,
    pub scoring_option: ScoringOption,
    /// Sum both team scores must reach once a match is completed.
    pub target_value: u32,
    #[serde(default)]
    pub rounds: Vec<Round>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a tournament with no rounds. Inputs are assumed to be validated already
    /// (see `logic::create_tournament`).
    pub fn new(
        name: impl Into<String>,
        tournament_type: TournamentType,
        number_of_courts: u32,
        players: Vec<PlayerName>,
        scoring_option: ScoringOption,
        target_value: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tournament_type,
            number_of_courts,
            players,
            scoring_option,
            target_value,
            rounds: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Replace the whole round list.
    pub fn replace_rounds(&mut self, rounds: Vec<Round>) {
        self.rounds = rounds;
    }

    /// Replace the whole player list. Past rounds keep the names they were played with.
    ///
    /// No uniqueness check happens here: a duplicated name merges into a single
    /// standings row.
    pub fn replace_players(&mut self, players: Vec<PlayerName>) {
        self.players = players;
    }

    pub fn find_match(&self, match_id: &str) -> Option<&GameMatch> {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .find(|m| m.id == match_id)
    }

    pub fn find_match_mut(&mut self, match_id: &str) -> Option<&mut GameMatch> {
        self.rounds
            .iter_mut()
            .flat_map(|r| r.matches.iter_mut())
            .find(|m| m.id == match_id)
    }

    /// Submit team 1's score for a match; team 2's is derived from the target.
    pub fn submit_score(&mut self, match_id: &str, score1: Option<u32>) -> Result<(), TournamentError> {
        let target_value = self.target_value;
        let m = self
            .find_match_mut(match_id)
            .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
        m.record_score(score1, target_value)?;
        log::debug!(
            "Match {} completed {}-{}",
            m.id,
            m.score1.unwrap_or_default(),
            m.score2.unwrap_or_default()
        );
        Ok(())
    }

    /// True once any match in any round has a final score.
    pub fn has_played_matches(&self) -> bool {
        self.rounds
            .iter()
            .any(|r| r.matches.iter().any(GameMatch::is_completed))
    }

    pub fn completed_matches(&self) -> usize {
        self.rounds
            .iter()
            .map(|r| r.matches.iter().filter(|m| m.is_completed()).count())
            .sum()
    }
}
