//! The game phase state machine.
//!
//! [`PhaseManager::transition`] runs after every successful player action.
//! It looks at the current phase and round and either leaves the phase
//! alone or moves one step forward, applying setup and scoring on the way:
//!
//! ```text
//! LOBBY -> MAIN_ENCRYPT -> MAIN_INTERCEPT -> MAIN_DECODE -+-> MAIN_REVEAL -> MAIN_ENCRYPT ...
//!                                                         +-> OVER
//! ```

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

use super::{
    constants::MIN_PLAYERS,
    entities::{PerTeam, Player, Team, TeamName},
    functional::{apply_score, score_round},
    keywords::KeywordPool,
    round::RoundManager,
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Players are joining the game and picking teams.
    #[default]
    Lobby,
    /// Encryptors are writing clues for their team's code.
    MainEncrypt,
    /// Teams are guessing the opposing team's code.
    MainIntercept,
    /// Teams are guessing their own code.
    MainDecode,
    /// The round was scored; waiting for everyone to continue.
    MainReveal,
    Over,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Lobby => "LOBBY",
            Self::MainEncrypt => "MAIN_ENCRYPT",
            Self::MainIntercept => "MAIN_INTERCEPT",
            Self::MainDecode => "MAIN_DECODE",
            Self::MainReveal => "MAIN_REVEAL",
            Self::Over => "OVER",
        };
        write!(f, "{repr}")
    }
}

/// Owns the phase of one game and the keyword pool it deals from.
#[derive(Debug)]
pub struct PhaseManager {
    phase: Phase,
    keyword_pool: KeywordPool,
}

impl PhaseManager {
    #[must_use]
    pub fn new(keyword_pool: KeywordPool) -> Self {
        Self {
            phase: Phase::Lobby,
            keyword_pool,
        }
    }

    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    /// Evaluates the guard for the current phase and, if it holds, applies
    /// the transition's effects and moves to the next phase. Returns the new
    /// phase when it changed.
    pub fn transition(
        &mut self,
        players: &[Player],
        teams: &mut PerTeam<Team>,
        rounds: &mut RoundManager,
    ) -> Option<Phase> {
        let round = rounds.current_round();
        let next = match self.phase {
            Phase::Lobby => {
                if players.len() < MIN_PLAYERS || !players.iter().all(|p| p.ready) {
                    return None;
                }
                self.deal_keywords(teams);
                set_next_encryptors(teams);
                Phase::MainEncrypt
            }
            Phase::MainEncrypt if round.all_clues_submitted() => Phase::MainIntercept,
            Phase::MainIntercept if round.all_intercept_guesses_submitted() => Phase::MainDecode,
            Phase::MainDecode if round.all_decode_guesses_submitted() => {
                let outcomes = score_round(round);
                if apply_score(teams, &outcomes) {
                    Phase::Over
                } else {
                    set_next_encryptors(teams);
                    rounds.start_next_round();
                    Phase::MainReveal
                }
            }
            Phase::MainReveal => {
                let ready = &round.team_players_ready_for_next_round;
                let everyone_ready = TeamName::ALL.into_iter().all(|name| {
                    teams[name]
                        .player_ids
                        .iter()
                        .all(|id| ready[name].contains(id))
                });
                if !everyone_ready {
                    return None;
                }
                Phase::MainEncrypt
            }
            _ => return None,
        };

        self.phase = next;
        Some(next)
    }

    fn deal_keywords(&mut self, teams: &mut PerTeam<Team>) {
        let in_play: HashSet<String> = teams
            .iter()
            .flat_map(|(_, team)| team.keywords.iter().cloned())
            .collect();
        let dealt = self.keyword_pool.deal(&in_play);
        teams.white.keywords = dealt.white;
        teams.black.keywords = dealt.black;
    }
}

/// The first member of each team encrypts. There is no rotation.
fn set_next_encryptors(teams: &mut PerTeam<Team>) {
    for name in TeamName::ALL {
        let team = &mut teams[name];
        team.current_encryptor_id = team.player_ids.first().cloned();
    }
}
