//! Request validation errors.

use thiserror::Error;

/// Errors from turning an inbound frame into a [`Request`](super::messages::Request).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RequestError {
    /// The payload isn't a JSON object. These are logged and dropped
    /// without a reply.
    #[error("Malformed message: {0}")]
    Malformed(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field: {0}")]
    InvalidField(&'static str),

    #[error("Messages require a 'type'.")]
    MissingType,

    #[error("Unknown request type: '{0}'")]
    UnknownType(String),
}

impl RequestError {
    /// Whether the sender should get an error reply for this failure.
    pub fn should_reply(&self) -> bool {
        !matches!(self, RequestError::Malformed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_messages() {
        assert_eq!(
            RequestError::MissingField("gameId").to_string(),
            "Missing required field: gameId"
        );
        assert_eq!(
            RequestError::MissingType.to_string(),
            "Messages require a 'type'."
        );
        assert_eq!(
            RequestError::UnknownType("dance".to_string()).to_string(),
            "Unknown request type: 'dance'"
        );
    }

    #[test]
    fn test_malformed_is_silent() {
        assert!(!RequestError::Malformed("eof".to_string()).should_reply());
        assert!(RequestError::InvalidField("clues").should_reply());
    }
}
