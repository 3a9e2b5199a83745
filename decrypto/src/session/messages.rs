//! Session actor message types.

use tokio::sync::{mpsc, oneshot};

use crate::{
    game::{
        GameResult, Phase,
        entities::{GameView, PlayerId},
    },
    net::messages::{Action, ServerMessage},
};

/// Messages that can be sent to a [`GameActor`](super::GameActor).
#[derive(Debug)]
pub enum SessionMessage {
    /// Apply a player action. `channel` is where the player receives
    /// snapshots and error replies; `joinGame` registers it for broadcasts.
    /// Responds with the new phase if the action advanced the game.
    Act {
        player_id: PlayerId,
        action: Action,
        channel: mpsc::Sender<ServerMessage>,
        response: oneshot::Sender<GameResult<Option<Phase>>>,
    },

    GetView {
        response: oneshot::Sender<GameView>,
    },

    /// Number of players with a live outbound channel.
    SubscriberCount {
        response: oneshot::Sender<usize>,
    },
}
