//! Bot players.
//!
//! Bots fill empty seats so a lobby can start with fewer than four humans.
//! They have fixed identities, join teams alternately, and are always
//! ready: they start the game ready and confirm every reveal on their own.
//! They never submit clues or guesses.
//!
//! ## Example
//!
//! ```
//! use decrypto::bot::BOTS;
//! use decrypto::game::entities::TeamName;
//!
//! assert_eq!(BOTS.len(), 4);
//! assert_eq!(BOTS[0].team, TeamName::White);
//! assert_eq!(BOTS[1].team, TeamName::Black);
//! ```

pub mod models;

pub use models::{BOTS, BotIdentity};
