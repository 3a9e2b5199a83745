//! WebSocket handler for playing games.
//!
//! # Connection Flow
//!
//! 1. Client connects via `GET /ws`
//! 2. Server assigns a connection id and spawns a send task draining the
//!    connection's outbound channel
//! 3. Each inbound text frame is split into lines; every line is one JSON
//!    action routed to its game's session actor
//! 4. On disconnect the send task is stopped; the game actor prunes the
//!    closed channel on its next broadcast
//!
//! # Server Messages
//!
//! - `{"type":"gameUpdate","gameInstance":{...}}` after any successful action
//! - `{"type":"error","error":"..."}` to the sender of a rejected action
//!
//! Payloads that aren't JSON objects are logged and dropped without a reply.
//!
//! # Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8081/ws');
//!
//! ws.send(JSON.stringify({
//!   type: "joinGame", gameId: "game1", playerId: "alice", playerName: "Alice"
//! }));
//! ```

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use decrypto::{
    Phase, Request, ServerMessage,
    net::{errors::RequestError, split_frame},
};
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, warn};
use std::sync::atomic::Ordering;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::AppState;
use crate::{logging, metrics};

/// Upgrade HTTP connection to WebSocket.
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    let (mut sender, mut receiver) = socket.split();

    logging::log_connection_event(&connection_id, "connected");
    metrics::websocket_connections_total();
    let open = state.connections.fetch_add(1, Ordering::Relaxed) + 1;
    metrics::websocket_connections_active(open);

    // Game actors hold clones of this sender for broadcasts.
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<ServerMessage>(state.channel_capacity);

    let send_connection_id = connection_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(j) => j,
                Err(e) => {
                    error!("{send_connection_id}: failed to serialize message: {e}");
                    continue;
                }
            };

            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
            metrics::websocket_messages_sent();
        }
    });

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                for line in split_frame(text.as_str()) {
                    metrics::websocket_messages_received();
                    handle_line(line, &connection_id, &outbound_tx, &state).await;
                }
            }
            Ok(Message::Close(_)) => break,
            Err(e) => {
                warn!("{connection_id}: websocket error: {e}");
                break;
            }
            _ => {}
        }
    }

    send_task.abort();

    let open = state.connections.fetch_sub(1, Ordering::Relaxed).saturating_sub(1);
    metrics::websocket_connections_active(open);
    logging::log_connection_event(&connection_id, "disconnected");
}

/// Validates one JSON message and hands it to its game.
async fn handle_line(
    line: &str,
    connection_id: &str,
    outbound: &mpsc::Sender<ServerMessage>,
    state: &AppState,
) {
    let request = match Request::parse(line) {
        Ok(request) => request,
        Err(e) => {
            let replied = e.should_reply();
            logging::log_rejected_message(connection_id, &e.to_string(), replied);
            metrics::rejected_messages_total(rejection_label(&e));
            if replied {
                reply(outbound, ServerMessage::error(&e)).await;
            }
            return;
        }
    };

    debug!("{connection_id}: {request}");

    let handle = match state.registry.get_or_create(&request.game_id).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("{connection_id}: couldn't open game {}: {e}", request.game_id);
            reply(outbound, ServerMessage::error(&e)).await;
            return;
        }
    };
    metrics::active_sessions(state.registry.session_count().await);

    let kind = request.action.kind();
    match handle
        .act(request.player_id, request.action, outbound.clone())
        .await
    {
        Ok(Ok(changed)) => {
            metrics::game_actions_total(kind, true);
            if changed == Some(Phase::Over) {
                metrics::games_finished_total();
            }
        }
        // The actor already replied to the sender.
        Ok(Err(_)) => metrics::game_actions_total(kind, false),
        Err(e) => {
            error!("{connection_id}: {e}");
            reply(outbound, ServerMessage::error(&e)).await;
        }
    }
}

async fn reply(outbound: &mpsc::Sender<ServerMessage>, message: ServerMessage) {
    if outbound.send(message).await.is_err() {
        debug!("Dropping reply for a closed connection");
    }
}

fn rejection_label(error: &RequestError) -> &'static str {
    match error {
        RequestError::Malformed(_) => "malformed",
        RequestError::MissingField(_) => "missing_field",
        RequestError::InvalidField(_) => "invalid_field",
        RequestError::MissingType => "missing_type",
        RequestError::UnknownType(_) => "unknown_type",
    }
}
