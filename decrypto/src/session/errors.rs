use thiserror::Error;

use crate::game::{GameError, entities::GameId};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} is closed")]
    Closed(GameId),

    #[error("session {0} dropped the request without responding")]
    NoResponse(GameId),

    #[error("couldn't create session: {0}")]
    Create(#[from] GameError),

    #[error("invalid session config: {0}")]
    Config(String),
}
