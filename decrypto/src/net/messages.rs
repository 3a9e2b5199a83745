use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::fmt;

use super::errors::RequestError;
use crate::game::entities::{Clues, Code, GameId, GameView, PlayerId};

/// A player action, carrying the fields specific to its `type`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    JoinGame {
        player_name: String,
    },
    JoinTeam {
        team_name: String,
    },
    AddBots,
    PlayerReady {
        ready: bool,
    },
    SubmitClues {
        clues: Clues,
    },
    /// Without a team name the acting player's own team is used.
    SubmitInterceptGuess {
        team_name: Option<String>,
        guess: Code,
    },
    SubmitDecodeGuess {
        team_name: Option<String>,
        guess: Code,
    },
    SubmitReadyForNextRound,
}

impl Action {
    /// The wire `type` of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::JoinGame { .. } => "joinGame",
            Self::JoinTeam { .. } => "joinTeam",
            Self::AddBots => "addBots",
            Self::PlayerReady { .. } => "playerReady",
            Self::SubmitClues { .. } => "submitClues",
            Self::SubmitInterceptGuess { .. } => "submitInterceptGuess",
            Self::SubmitDecodeGuess { .. } => "submitDecodeGuess",
            Self::SubmitReadyForNextRound => "submitReadyForNextRound",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::JoinGame { player_name } => format!("joined as {player_name}"),
            Self::JoinTeam { team_name } => format!("joined team {team_name}"),
            Self::AddBots => "added bots".to_string(),
            Self::PlayerReady { ready } => format!("set ready to {ready}"),
            Self::SubmitClues { .. } => "submitted clues".to_string(),
            Self::SubmitInterceptGuess { guess, .. } => format!("guessed intercept {guess}"),
            Self::SubmitDecodeGuess { guess, .. } => format!("guessed decode {guess}"),
            Self::SubmitReadyForNextRound => "is ready for the next round".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// A validated inbound message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub action: Action,
}

impl Request {
    /// Parses one JSON message.
    ///
    /// Fields are checked in order: `gameId`, `playerId`, `type`, then the
    /// fields that `type` needs. The first problem found is returned.
    pub fn parse(text: &str) -> Result<Self, RequestError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| RequestError::Malformed(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(RequestError::Malformed("expected a JSON object".to_string()));
        };

        let game_id = required(&fields, "gameId")?;
        let player_id = required(&fields, "playerId")?;
        let kind = match fields.get("type") {
            None | Some(Value::Null) => return Err(RequestError::MissingType),
            Some(Value::String(kind)) => kind.as_str(),
            Some(other) => return Err(RequestError::UnknownType(other.to_string())),
        };

        let action = match kind {
            "joinGame" => Action::JoinGame {
                player_name: required(&fields, "playerName")?,
            },
            "joinTeam" => Action::JoinTeam {
                team_name: required(&fields, "teamName")?,
            },
            "addBots" => Action::AddBots,
            "playerReady" => Action::PlayerReady {
                ready: required(&fields, "ready")?,
            },
            "submitClues" => Action::SubmitClues {
                clues: required(&fields, "clues")?,
            },
            "submitInterceptGuess" => Action::SubmitInterceptGuess {
                guess: required(&fields, "interceptGuess")?,
                team_name: optional(&fields, "teamName")?,
            },
            "submitDecodeGuess" => Action::SubmitDecodeGuess {
                guess: required(&fields, "decodeGuess")?,
                team_name: optional(&fields, "teamName")?,
            },
            "submitReadyForNextRound" => Action::SubmitReadyForNextRound,
            other => return Err(RequestError::UnknownType(other.to_string())),
        };

        Ok(Self {
            game_id,
            player_id,
            action,
        })
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} in {}", self.player_id, self.action, self.game_id)
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn required<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    name: &'static str,
) -> Result<T, RequestError> {
    optional(fields, name)?.ok_or(RequestError::MissingField(name))
}

fn optional<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<T>, RequestError> {
    let value = fields.get(name);
    if is_missing(value) {
        return Ok(None);
    }
    value
        .map(|v| T::deserialize(v).map_err(|_| RequestError::InvalidField(name)))
        .transpose()
}

/// A message from the server to a client.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Snapshot broadcast to every player after a successful action.
    #[serde(rename_all = "camelCase")]
    GameUpdate { game_instance: GameView },
    /// Reply to the sender of a failed action.
    Error { error: String },
}

impl ServerMessage {
    pub fn error(error: impl fmt::Display) -> Self {
        Self::Error {
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<Request, RequestError> {
        Request::parse(&value.to_string())
    }

    #[test]
    fn test_parse_join_game() {
        let request = parse(json!({
            "type": "joinGame",
            "gameId": "game1",
            "playerId": "player1",
            "playerName": "Player One",
        }))
        .unwrap();

        assert_eq!(request.game_id.as_str(), "game1");
        assert_eq!(request.player_id.as_str(), "player1");
        assert_eq!(
            request.action,
            Action::JoinGame {
                player_name: "Player One".to_string()
            }
        );
    }

    #[test]
    fn test_game_id_checked_first() {
        let err = parse(json!({"type": "joinGame", "playerName": "x"})).unwrap_err();
        assert_eq!(err, RequestError::MissingField("gameId"));
    }

    #[test]
    fn test_player_id_checked_second() {
        let err = parse(json!({"gameId": "g"})).unwrap_err();
        assert_eq!(err, RequestError::MissingField("playerId"));
    }

    #[test]
    fn test_type_checked_before_type_fields() {
        let err = parse(json!({"gameId": "g", "playerId": "p"})).unwrap_err();
        assert_eq!(err, RequestError::MissingType);

        let err = parse(json!({"gameId": "g", "playerId": "p", "type": "dance"})).unwrap_err();
        assert_eq!(err, RequestError::UnknownType("dance".to_string()));
    }

    #[test]
    fn test_type_specific_fields_required() {
        let cases = [
            ("joinGame", "playerName"),
            ("joinTeam", "teamName"),
            ("playerReady", "ready"),
            ("submitClues", "clues"),
            ("submitInterceptGuess", "interceptGuess"),
            ("submitDecodeGuess", "decodeGuess"),
        ];
        for (kind, field) in cases {
            let err = parse(json!({"gameId": "g", "playerId": "p", "type": kind})).unwrap_err();
            assert_eq!(err, RequestError::MissingField(field), "{kind}");
        }
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let err = parse(json!({"gameId": "  ", "playerId": "p"})).unwrap_err();
        assert_eq!(err, RequestError::MissingField("gameId"));
    }

    #[test]
    fn test_wrong_length_lists_are_invalid() {
        let err = parse(json!({
            "gameId": "g",
            "playerId": "p",
            "type": "submitClues",
            "clues": ["one", "two"],
        }))
        .unwrap_err();
        assert_eq!(err, RequestError::InvalidField("clues"));

        let err = parse(json!({
            "gameId": "g",
            "playerId": "p",
            "type": "submitDecodeGuess",
            "decodeGuess": [1, 2, 3, 4],
        }))
        .unwrap_err();
        assert_eq!(err, RequestError::InvalidField("decodeGuess"));
    }

    #[test]
    fn test_guess_team_is_optional() {
        let request = parse(json!({
            "gameId": "g",
            "playerId": "p",
            "type": "submitInterceptGuess",
            "interceptGuess": [4, 1, 1],
        }))
        .unwrap();
        assert_eq!(
            request.action,
            Action::SubmitInterceptGuess {
                team_name: None,
                guess: Code([4, 1, 1])
            }
        );

        let request = parse(json!({
            "gameId": "g",
            "playerId": "p",
            "type": "submitDecodeGuess",
            "decodeGuess": [2, 2, 3],
            "teamName": "Black",
        }))
        .unwrap();
        assert_eq!(
            request.action,
            Action::SubmitDecodeGuess {
                team_name: Some("Black".to_string()),
                guess: Code([2, 2, 3])
            }
        );
    }

    #[test]
    fn test_ready_must_be_bool() {
        let err = parse(json!({
            "gameId": "g",
            "playerId": "p",
            "type": "playerReady",
            "ready": "yes",
        }))
        .unwrap_err();
        assert_eq!(err, RequestError::InvalidField("ready"));
    }

    #[test]
    fn test_over_long_ids_rejected() {
        let long = "g".repeat(65);
        let err = parse(json!({"gameId": &long, "playerId": "p", "type": "addBots"})).unwrap_err();
        assert_eq!(err, RequestError::InvalidField("gameId"));
        assert!(err.should_reply());

        let err = parse(json!({"gameId": "g", "playerId": &long, "type": "addBots"})).unwrap_err();
        assert_eq!(err, RequestError::InvalidField("playerId"));
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(matches!(
            Request::parse("{not json"),
            Err(RequestError::Malformed(_))
        ));
        assert!(matches!(
            Request::parse("[1, 2, 3]"),
            Err(RequestError::Malformed(_))
        ));
    }

    #[test]
    fn test_error_message_shape() {
        let json = serde_json::to_value(ServerMessage::error("player does not exist")).unwrap();
        assert_eq!(
            json,
            json!({"type": "error", "error": "player does not exist"})
        );
    }
}
