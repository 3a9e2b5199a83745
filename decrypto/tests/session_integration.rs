//! Integration tests for game sessions.
//!
//! Exercises the registry and game actors the way websocket connections
//! use them: concurrent first joins, broadcasts, and error replies.

use decrypto::{
    Action, GameError, Phase, ServerMessage, SessionConfig, SessionRegistry,
    game::entities::{GameId, PlayerId},
};
use std::sync::Arc;
use tokio::sync::mpsc;

fn gid(s: &str) -> GameId {
    GameId::new(s).unwrap()
}

fn pid(s: &str) -> PlayerId {
    PlayerId::new(s).unwrap()
}

fn join(name: &str) -> Action {
    Action::JoinGame {
        player_name: name.to_string(),
    }
}

#[tokio::test]
async fn test_concurrent_first_joins_share_one_game() {
    let registry = Arc::new(SessionRegistry::new(SessionConfig::default()).unwrap());

    let mut tasks = Vec::new();
    for i in 0..8 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move {
            let (tx, _rx) = mpsc::channel(32);
            let handle = registry.get_or_create(&gid("shared")).await.unwrap();
            handle
                .act(pid(&format!("p{i}")), join(&format!("Player {i}")), tx)
                .await
                .unwrap()
                .unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(registry.session_count().await, 1);
    let handle = registry.get(&gid("shared")).await.unwrap();
    assert_eq!(handle.view().await.unwrap().players.len(), 8);
}

#[tokio::test]
async fn test_every_player_sees_each_update() {
    let registry = SessionRegistry::new(SessionConfig::default()).unwrap();
    let handle = registry.get_or_create(&gid("g1")).await.unwrap();

    let mut receivers = Vec::new();
    for (id, team) in [("w1", "White"), ("w2", "White"), ("b1", "Black"), ("b2", "Black")] {
        let (tx, rx) = mpsc::channel(64);
        handle.act(pid(id), join(id), tx.clone()).await.unwrap().unwrap();
        let team_name = team.to_string();
        handle
            .act(pid(id), Action::JoinTeam { team_name }, tx)
            .await
            .unwrap()
            .unwrap();
        receivers.push(rx);
    }

    let (tx, _rx) = mpsc::channel(64);
    for id in ["w1", "w2", "b1", "b2"] {
        handle
            .act(pid(id), Action::PlayerReady { ready: true }, tx.clone())
            .await
            .unwrap()
            .unwrap();
    }

    for mut rx in receivers {
        let mut last = None;
        while let Ok(message) = rx.try_recv() {
            last = Some(message);
        }
        let Some(ServerMessage::GameUpdate { game_instance }) = last else {
            panic!("expected a game update");
        };
        assert_eq!(game_instance.phase, Phase::MainEncrypt);
        assert!(game_instance.teams.iter().all(|t| t.keywords.len() == 4));
    }
}

#[tokio::test]
async fn test_failed_action_leaves_game_unchanged() {
    let registry = SessionRegistry::new(SessionConfig::default()).unwrap();
    let handle = registry.get_or_create(&gid("g1")).await.unwrap();
    let (tx, mut rx) = mpsc::channel(8);

    handle.act(pid("p1"), join("One"), tx.clone()).await.unwrap().unwrap();
    rx.recv().await.unwrap();
    let before = handle.view().await.unwrap();

    let result = handle
        .act(
            pid("p1"),
            Action::JoinTeam {
                team_name: "Red".to_string(),
            },
            tx,
        )
        .await
        .unwrap();

    assert_eq!(result, Err(GameError::TeamDoesNotExist("Red".to_string())));
    assert_eq!(
        rx.recv().await,
        Some(ServerMessage::error("team Red does not exist"))
    );
    assert_eq!(handle.view().await.unwrap(), before);
}

#[tokio::test]
async fn test_games_are_independent() {
    let registry = SessionRegistry::new(SessionConfig::default()).unwrap();
    let (tx, _rx) = mpsc::channel(8);

    let first = registry.get_or_create(&gid("a")).await.unwrap();
    let second = registry.get_or_create(&gid("b")).await.unwrap();
    first.act(pid("p1"), join("One"), tx.clone()).await.unwrap().unwrap();
    second.act(pid("p1"), Action::AddBots, tx).await.unwrap().unwrap();

    assert_eq!(first.view().await.unwrap().players.len(), 1);
    assert_eq!(second.view().await.unwrap().players.len(), 4);
}
