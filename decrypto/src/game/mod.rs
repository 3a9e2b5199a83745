//! Decrypto game engine - phase state machine, rounds, and scoring.
//!
//! This module provides the game core:
//! - Entities shared by every part of a game (players, teams, codes)
//! - Round history with per-team codes, clues, and guesses
//! - The phase state machine that advances after every player action
//! - Round scoring and the game over check
//! - The [`Game`] aggregate that validates and applies player actions

// Submodules
pub mod constants;
pub mod entities;
pub mod errors;
pub mod functional;
pub mod keywords;
pub mod round;
pub mod state_machine;

mod implementation;

pub use errors::{GameError, GameResult};
pub use implementation::Game;
pub use round::{Round, RoundManager};
pub use state_machine::{Phase, PhaseManager};
