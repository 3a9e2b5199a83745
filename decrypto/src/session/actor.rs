//! Game actor implementation with async message handling.

use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};

use super::{errors::SessionError, messages::SessionMessage};
use crate::{
    game::{
        Game, GameError, GameResult, Phase,
        entities::{GameId, GameView, PlayerId, TeamName},
    },
    net::messages::{Action, ServerMessage},
};

/// Cloneable handle for sending messages to a game actor.
#[derive(Clone, Debug)]
pub struct GameHandle {
    sender: mpsc::Sender<SessionMessage>,
    game_id: GameId,
}

impl GameHandle {
    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    pub async fn send(&self, message: SessionMessage) -> Result<(), SessionError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed(self.game_id.clone()))
    }

    async fn request<T>(
        &self,
        message: SessionMessage,
        response: oneshot::Receiver<T>,
    ) -> Result<T, SessionError> {
        self.send(message).await?;
        response
            .await
            .map_err(|_| SessionError::NoResponse(self.game_id.clone()))
    }

    /// Applies `action` on behalf of `player_id`.
    ///
    /// On success every subscribed player (including the sender) gets a
    /// fresh snapshot, and the result holds the phase the game moved to if
    /// the action advanced it. On failure only `channel` gets the error
    /// reply. The outer result fails only if the actor is gone.
    pub async fn act(
        &self,
        player_id: PlayerId,
        action: Action,
        channel: mpsc::Sender<ServerMessage>,
    ) -> Result<GameResult<Option<Phase>>, SessionError> {
        let (response, rx) = oneshot::channel();
        let message = SessionMessage::Act {
            player_id,
            action,
            channel,
            response,
        };
        self.request(message, rx).await
    }

    pub async fn view(&self) -> Result<GameView, SessionError> {
        let (response, rx) = oneshot::channel();
        self.request(SessionMessage::GetView { response }, rx).await
    }

    pub async fn subscriber_count(&self) -> Result<usize, SessionError> {
        let (response, rx) = oneshot::channel();
        self.request(SessionMessage::SubscriberCount { response }, rx)
            .await
    }
}

/// Owns one [`Game`] and serializes every action against it.
pub struct GameActor {
    game: Game,
    inbox: mpsc::Receiver<SessionMessage>,
    /// Outbound channels of players who joined through this actor.
    subscribers: HashMap<PlayerId, mpsc::Sender<ServerMessage>>,
}

impl GameActor {
    pub fn new(game: Game, inbox_capacity: usize) -> (Self, GameHandle) {
        let (sender, inbox) = mpsc::channel(inbox_capacity);
        let handle = GameHandle {
            sender,
            game_id: game.id().clone(),
        };
        let actor = Self {
            game,
            inbox,
            subscribers: HashMap::new(),
        };
        (actor, handle)
    }

    /// Runs until every handle has been dropped.
    pub async fn run(mut self) {
        log::info!("Game {} starting", self.game.id());

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
        }

        log::info!("Game {} closed", self.game.id());
    }

    fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::Act {
                player_id,
                action,
                channel,
                response,
            } => {
                let result = self.handle_action(player_id, action, channel);
                let _ = response.send(result);
            }

            SessionMessage::GetView { response } => {
                let _ = response.send(self.game.view());
            }

            SessionMessage::SubscriberCount { response } => {
                let _ = response.send(self.subscribers.len());
            }
        }
    }

    fn handle_action(
        &mut self,
        player_id: PlayerId,
        action: Action,
        channel: mpsc::Sender<ServerMessage>,
    ) -> GameResult<Option<Phase>> {
        let kind = action.kind();
        let before = self.game.phase();
        if let Action::JoinGame { .. } = action {
            self.subscribers.insert(player_id.clone(), channel.clone());
        }

        match self.apply(&player_id, action) {
            Ok(()) => {
                self.publish();
                let after = self.game.phase();
                Ok((after != before).then_some(after))
            }
            Err(e) => {
                log::debug!(
                    "Game {}: {} rejected for {}: {}",
                    self.game.id(),
                    kind,
                    player_id,
                    e
                );
                if let Err(send_err) = channel.try_send(ServerMessage::error(&e)) {
                    log::warn!("Couldn't reply to {player_id}: {send_err}");
                }
                Err(e)
            }
        }
    }

    fn apply(&mut self, player_id: &PlayerId, action: Action) -> GameResult<()> {
        match action {
            Action::JoinGame { player_name } => {
                self.game.join_game(player_id.clone(), &player_name)
            }
            Action::JoinTeam { team_name } => self.game.join_team(player_id, &team_name),
            Action::AddBots => self.game.add_bots(),
            Action::PlayerReady { ready } => self.game.player_ready(player_id, ready),
            Action::SubmitClues { clues } => self.game.submit_clues(player_id, clues),
            Action::SubmitInterceptGuess { team_name, guess } => {
                let team_name = self.guessing_team(player_id, team_name)?;
                self.game.submit_intercept_guess(&team_name, guess)
            }
            Action::SubmitDecodeGuess { team_name, guess } => {
                let team_name = self.guessing_team(player_id, team_name)?;
                self.game.submit_decode_guess(&team_name, guess)
            }
            Action::SubmitReadyForNextRound => self.game.submit_ready_for_next_round(player_id),
        }
    }

    /// The explicit team name, or else the sender's own team.
    fn guessing_team(&self, player_id: &PlayerId, team_name: Option<String>) -> GameResult<String> {
        if let Some(team_name) = team_name {
            return Ok(team_name);
        }
        self.game
            .player(player_id)
            .ok_or(GameError::PlayerDoesNotExist)?;
        self.game
            .team_of(player_id)
            .map(|name: TeamName| name.to_string())
            .ok_or(GameError::NotOnTeam)
    }

    /// Sends the current snapshot to every subscriber.
    fn publish(&mut self) {
        let update = ServerMessage::GameUpdate {
            game_instance: self.game.view(),
        };
        self.subscribers
            .retain(|player_id, sender| match sender.try_send(update.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("Subscriber {player_id} channel full, dropping update");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {player_id} disconnected, removing");
                    false
                }
            });
    }
}
