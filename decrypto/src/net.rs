//! Wire protocol between players and the server.
//!
//! Clients send flat JSON objects with a `type` discriminator; the server
//! answers with [`ServerMessage`](messages::ServerMessage)s. Parsing and
//! field validation happen here so the game never sees a malformed action.

/// Request validation errors.
pub mod errors;

/// Inbound requests and outbound server messages.
pub mod messages;

/// Splits a text frame into the JSON messages it carries, one per
/// non-blank line.
pub fn split_frame(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}
