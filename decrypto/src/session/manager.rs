//! Session registry for spawning and finding game actors.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use super::{
    actor::{GameActor, GameHandle},
    config::SessionConfig,
    errors::SessionError,
};
use crate::game::{Game, entities::GameId};

/// Maps game ids to running game actors.
#[derive(Clone, Debug)]
pub struct SessionRegistry {
    config: SessionConfig,
    sessions: Arc<RwLock<HashMap<GameId, GameHandle>>>,
}

impl SessionRegistry {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::Config)?;
        Ok(Self {
            config,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Returns the handle for `game_id`, spawning a new game actor if this
    /// is the first reference. Concurrent first references spawn exactly
    /// one actor.
    pub async fn get_or_create(&self, game_id: &GameId) -> Result<GameHandle, SessionError> {
        if let Some(handle) = self.get(game_id).await {
            return Ok(handle);
        }

        let mut sessions = self.sessions.write().await;
        if let Some(handle) = sessions.get(game_id) {
            return Ok(handle.clone());
        }

        let game = Game::new(game_id.clone(), self.config.keywords.clone())?;
        let (actor, handle) = GameActor::new(game, self.config.inbox_capacity);
        sessions.insert(game_id.clone(), handle.clone());
        drop(sessions);

        tokio::spawn(actor.run());
        log::info!("Created game {game_id}");

        Ok(handle)
    }

    pub async fn get(&self, game_id: &GameId) -> Option<GameHandle> {
        self.sessions.read().await.get(game_id).cloned()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
