//! Game sessions.
//!
//! Each game runs in its own Tokio task ([`GameActor`]) that owns the
//! [`Game`](crate::game::Game) exclusively and drains an mpsc inbox one
//! message at a time. Callers talk to it through a cloneable
//! [`GameHandle`], and the [`SessionRegistry`] maps game ids to handles,
//! spawning an actor the first time an id is referenced.
//!
//! ## Example
//!
//! ```
//! use decrypto::game::entities::{GameId, PlayerId};
//! use decrypto::net::messages::{Action, ServerMessage};
//! use decrypto::session::{SessionConfig, SessionRegistry};
//! use tokio::sync::mpsc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = SessionRegistry::new(SessionConfig::default()).unwrap();
//! let handle = registry
//!     .get_or_create(&GameId::new("game1").unwrap())
//!     .await
//!     .unwrap();
//!
//! let (tx, mut rx) = mpsc::channel(8);
//! let action = Action::JoinGame { player_name: "Alice".to_string() };
//! handle
//!     .act(PlayerId::new("alice").unwrap(), action, tx)
//!     .await
//!     .unwrap()
//!     .unwrap();
//!
//! assert!(matches!(rx.recv().await, Some(ServerMessage::GameUpdate { .. })));
//! # }
//! ```

pub mod actor;
pub mod config;
pub mod errors;
pub mod manager;
pub mod messages;

pub use actor::{GameActor, GameHandle};
pub use config::SessionConfig;
pub use errors::SessionError;
pub use manager::SessionRegistry;
pub use messages::SessionMessage;
