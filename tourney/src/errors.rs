//! Error types for tournament operations.

use crate::ids::{MatchId, PlayerId, TeamId, TournamentId};
use thiserror::Error;

/// Tournament errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    /// Fewer than two teams, or otherwise unusable team list
    #[error("Invalid tournament state: {0}")]
    InvalidTournamentState(String),

    /// Fixtures already exist for this tournament
    #[error("Fixtures already generated for tournament {0}")]
    AlreadyScheduled(TournamentId),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// A result was already recorded for this match
    #[error("Result already recorded for match {0}")]
    AlreadyRecorded(MatchId),

    /// Negative goal counts
    #[error("Invalid score: {home}-{away}")]
    InvalidScore { home: i64, away: i64 },

    #[error("Draws are not allowed in knockout match {0}")]
    DrawNotAllowedInKnockout(MatchId),

    /// Knockout match whose participants are not known yet
    #[error("Match {0} is waiting for earlier rounds to finish")]
    MatchNotReady(MatchId),

    #[error("Team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("Team {team} already registered in tournament {tournament}")]
    DuplicateRegistration {
        tournament: TournamentId,
        team: TeamId,
    },

    #[error("Jersey number {0} already exists in team")]
    DuplicateJerseyNumber(u32),

    /// Registration changes after fixtures were generated
    #[error("Registration for tournament {0} is frozen until fixtures are cleared")]
    RegistrationFrozen(TournamentId),

    #[error("Registry lock poisoned")]
    LockPoisoned,
}

impl TournamentError {
    /// Get a client-safe error message with entity ids redacted
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::AlreadyScheduled(_) => {
                "Fixtures already generated for this tournament".to_string()
            }
            TournamentError::MatchNotFound(_) => "Match not found".to_string(),
            TournamentError::AlreadyRecorded(_) => {
                "Result already recorded for this match".to_string()
            }
            TournamentError::DrawNotAllowedInKnockout(_) => {
                "Draws are not allowed in knockout matches".to_string()
            }
            TournamentError::MatchNotReady(_) => {
                "Match is waiting for earlier rounds to finish".to_string()
            }
            TournamentError::TeamNotFound(_) => "Team not found".to_string(),
            TournamentError::PlayerNotFound(_) => "Player not found".to_string(),
            TournamentError::TournamentNotFound(_) => "Tournament not found".to_string(),
            TournamentError::DuplicateRegistration { .. } => {
                "Team already registered in this tournament".to_string()
            }
            TournamentError::RegistrationFrozen(_) => {
                "Registration is frozen until fixtures are cleared".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
