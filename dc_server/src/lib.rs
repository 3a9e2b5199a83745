//! Decrypto game server.
//!
//! Serves games over websockets: each text frame carries newline-delimited
//! JSON actions, which are validated, routed to the game's session actor,
//! and answered with snapshots or error replies.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
