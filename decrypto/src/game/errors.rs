//! Game error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::TeamName;

/// Errors returned by game operations.
///
/// Validation failures leave the game untouched. The construction
/// variants are only produced when building a game or its keyword pool.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("player does not exist")]
    PlayerDoesNotExist,
    #[error("team {0} does not exist")]
    TeamDoesNotExist(String),
    #[error("player is already on team {0}")]
    AlreadyOnTeam(TeamName),
    #[error("player must be on a team")]
    NotOnTeam,
    #[error("only the current encryptor can submit clues")]
    NotEncryptor,
    #[error("code digits must be between 1 and {max}, got {digit}")]
    InvalidCodeDigit { digit: u8, max: u8 },
    #[error("game id must not be empty")]
    EmptyGameId,
    #[error("player id must not be empty")]
    EmptyPlayerId,
    #[error("ids must be at most {max} bytes")]
    IdTooLong { max: usize },
    #[error("need >= {required} distinct keywords, got {available}")]
    NotEnoughKeywords { required: usize, available: usize },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
