//! Bot identities.

use crate::game::{
    GameResult,
    entities::{Player, PlayerId, TeamName},
};

/// A fixed bot seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotIdentity {
    /// Player id the bot joins with
    pub id: &'static str,

    /// Display name
    pub name: &'static str,

    /// Team the bot is seated on
    pub team: TeamName,
}

impl BotIdentity {
    /// Build the ready player for this bot
    pub fn player(&self) -> GameResult<Player> {
        Ok(Player::bot(self.player_id()?, self.name))
    }

    pub fn player_id(&self) -> GameResult<PlayerId> {
        PlayerId::new(self.id)
    }
}

/// The bots added by `addBots`, alternating White and Black.
pub const BOTS: [BotIdentity; 4] = [
    BotIdentity {
        id: "bot-1",
        name: "Bot 1",
        team: TeamName::White,
    },
    BotIdentity {
        id: "bot-2",
        name: "Bot 2",
        team: TeamName::Black,
    },
    BotIdentity {
        id: "bot-3",
        name: "Bot 3",
        team: TeamName::White,
    },
    BotIdentity {
        id: "bot-4",
        name: "Bot 4",
        team: TeamName::Black,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bot_ids_are_unique() {
        let ids: HashSet<_> = BOTS.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), BOTS.len());
    }

    #[test]
    fn test_bots_alternate_teams() {
        for pair in BOTS.windows(2) {
            assert_eq!(pair[0].team.opponent(), pair[1].team);
        }
    }

    #[test]
    fn test_bot_player_is_ready() {
        let player = BOTS[2].player().unwrap();
        assert_eq!(player.player_id.as_str(), "bot-3");
        assert_eq!(player.player_name, "Bot 3");
        assert!(player.ready);
        assert!(player.is_bot);
    }
}
