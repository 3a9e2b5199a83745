//! # Decrypto
//!
//! A multiplayer implementation of the word-and-code deduction game
//! Decrypto, built around an explicit phase state machine.
//!
//! Two teams, White and Black, each hold four secret keywords. Every round
//! each team's encryptor receives a random three-digit code and writes three
//! clues for it. Both teams then try to intercept the opposing team's code
//! and decode their own. A team that is intercepted twice, or miscommunicates
//! twice, ends the game.
//!
//! ## Architecture
//!
//! A game moves through these phases:
//!
//! - **Lobby**: players join, pick teams, and mark themselves ready
//! - **MainEncrypt**: encryptors submit clues
//! - **MainIntercept**: teams guess the opposing code
//! - **MainDecode**: teams guess their own code, then the round is scored
//! - **MainReveal**: everyone confirms before the next round
//! - **Over**: a team hit the failure limit
//!
//! ## Core Modules
//!
//! - [`game`]: entities, rounds, scoring, and the phase state machine
//! - [`session`]: one actor per game plus the registry that finds them
//! - [`net`]: the JSON wire protocol
//! - [`bot`]: the fixed bot players
//!
//! ## Example
//!
//! ```
//! use decrypto::{Game, Phase, game::{entities::{GameId, PlayerId}, keywords::default_keywords}};
//!
//! let mut game = Game::new(GameId::new("game1").unwrap(), default_keywords()).unwrap();
//! game.join_game(PlayerId::new("alice").unwrap(), "Alice").unwrap();
//! assert_eq!(game.phase(), Phase::Lobby);
//! ```

/// Fixed bot identities.
pub mod bot;

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    Game, GameError, GameResult, Phase,
    constants,
    entities::{self, GameId, GameView, PlayerId, TeamName},
    functional,
};

/// Wire protocol types.
pub mod net;
pub use net::messages::{self, Action, Request, ServerMessage};

/// Per-game actors and the session registry.
pub mod session;
pub use session::{GameHandle, SessionConfig, SessionError, SessionRegistry};
