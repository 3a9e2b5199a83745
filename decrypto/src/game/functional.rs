//! Round scoring.

use serde::{Deserialize, Serialize};

use super::{
    entities::{Code, PerTeam, Team, TeamName},
    round::Round,
};

/// Returns true if `guess` was submitted and matches `code` digit for digit.
pub fn codes_match(guess: Option<&Code>, code: &Code) -> bool {
    guess.is_some_and(|guess| guess == code)
}

/// What happened to one team in a scored round.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TeamOutcome {
    /// The opposing team guessed this team's code.
    pub intercepted: bool,
    /// This team failed to guess its own code.
    pub miscommunicated: bool,
}

/// Evaluates both teams of a round. Neither team's result short-circuits the
/// other, so one round can score against both.
pub fn score_round(round: &Round) -> PerTeam<TeamOutcome> {
    PerTeam::from_fn(|team| {
        let code = &round.team_codes[team];
        TeamOutcome {
            intercepted: codes_match(
                round.team_intercept_guesses[team.opponent()].as_ref(),
                code,
            ),
            miscommunicated: !codes_match(round.team_decode_guesses[team].as_ref(), code),
        }
    })
}

/// Applies round outcomes to the team counters and reports whether any
/// team has now hit the failure limit.
pub fn apply_score(teams: &mut PerTeam<Team>, outcomes: &PerTeam<TeamOutcome>) -> bool {
    for name in TeamName::ALL {
        let team = &mut teams[name];
        let outcome = outcomes[name];
        if outcome.intercepted {
            team.intercepts += 1;
        }
        if outcome.miscommunicated {
            team.miscommunications += 1;
        }
    }
    teams.iter().any(|(_, team)| team.reached_failure_limit())
}
