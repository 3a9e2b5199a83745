//! Rounds and the per-game round history.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{Clues, Code, PerTeam, PlayerId};

// Unsubmitted entries go over the wire as empty lists so clients only ever
// see `[]` or a full three element list.
mod submission_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::PerTeam;

    pub fn serialize<S, T>(value: &PerTeam<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        PerTeam {
            white: AsList(&value.white),
            black: AsList(&value.black),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<PerTeam<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Submission<T> {
            Submitted(T),
            Empty([(); 0]),
        }

        let value = PerTeam::<Submission<T>>::deserialize(deserializer)?;
        let into_option = |s: Submission<T>| match s {
            Submission::Submitted(v) => Some(v),
            Submission::Empty(_) => None,
        };
        Ok(PerTeam {
            white: into_option(value.white),
            black: into_option(value.black),
        })
    }

    struct AsList<'a, T>(&'a Option<T>);

    impl<T: Serialize> Serialize for AsList<'_, T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self.0 {
                Some(value) => value.serialize(serializer),
                None => serializer.collect_seq(std::iter::empty::<u8>()),
            }
        }
    }
}

/// One encrypt / intercept / decode / reveal cycle.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Sequence number, starting at 1.
    pub number: usize,
    pub team_codes: PerTeam<Code>,
    /// Clues given by each team's encryptor.
    #[serde(with = "submission_serde")]
    pub team_clues: PerTeam<Option<Clues>>,
    /// Each team's guess at the *opposing* team's code.
    #[serde(with = "submission_serde")]
    pub team_intercept_guesses: PerTeam<Option<Code>>,
    /// Each team's guess at its own code.
    #[serde(with = "submission_serde")]
    pub team_decode_guesses: PerTeam<Option<Code>>,
    pub team_players_ready_for_next_round: PerTeam<Vec<PlayerId>>,
}

impl Round {
    pub fn new<R: Rng + ?Sized>(number: usize, rng: &mut R) -> Self {
        Self {
            number,
            team_codes: PerTeam::from_fn(|_| Code::random(rng)),
            team_clues: PerTeam::default(),
            team_intercept_guesses: PerTeam::default(),
            team_decode_guesses: PerTeam::default(),
            team_players_ready_for_next_round: PerTeam::default(),
        }
    }

    pub fn all_clues_submitted(&self) -> bool {
        self.team_clues.iter().all(|(_, clues)| clues.is_some())
    }

    pub fn all_intercept_guesses_submitted(&self) -> bool {
        self.team_intercept_guesses
            .iter()
            .all(|(_, guess)| guess.is_some())
    }

    pub fn all_decode_guesses_submitted(&self) -> bool {
        self.team_decode_guesses
            .iter()
            .all(|(_, guess)| guess.is_some())
    }
}

/// Owns the ordered rounds of a game. A round always exists.
#[derive(Debug)]
pub struct RoundManager {
    rounds: Vec<Round>,
    current_idx: usize,
}

impl Default for RoundManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rounds: vec![Round::new(1, &mut rand::rng())],
            current_idx: 0,
        }
    }

    pub fn current_round(&self) -> &Round {
        &self.rounds[self.current_idx]
    }

    pub fn current_round_mut(&mut self) -> &mut Round {
        &mut self.rounds[self.current_idx]
    }

    /// Appends a round with freshly drawn codes and makes it current.
    pub fn start_next_round(&mut self) -> &Round {
        let round = Round::new(self.rounds.len() + 1, &mut rand::rng());
        self.rounds.push(round);
        self.current_idx = self.rounds.len() - 1;
        &self.rounds[self.current_idx]
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::TeamName;

    #[test]
    fn test_round_manager_starts_with_one_round() {
        let manager = RoundManager::new();
        assert_eq!(manager.rounds().len(), 1);
        assert_eq!(manager.current_round().number, 1);
    }

    #[test]
    fn test_start_next_round_advances_current() {
        let mut manager = RoundManager::new();
        let number = manager.start_next_round().number;
        assert_eq!(number, 2);
        assert_eq!(manager.current_round().number, 2);
        assert_eq!(manager.rounds().len(), 2);
    }

    #[test]
    fn test_new_round_is_empty() {
        let round = Round::new(1, &mut rand::rng());
        assert!(!round.all_clues_submitted());
        assert!(!round.all_intercept_guesses_submitted());
        assert!(!round.all_decode_guesses_submitted());
        for team in TeamName::ALL {
            assert!(round.team_players_ready_for_next_round[team].is_empty());
            assert!(round.team_codes[team].validate().is_ok());
        }
    }

    #[test]
    fn test_submissions_need_both_teams() {
        let mut round = Round::new(1, &mut rand::rng());
        round.team_intercept_guesses[TeamName::White] = Some(Code([1, 2, 3]));
        assert!(!round.all_intercept_guesses_submitted());
        round.team_intercept_guesses[TeamName::Black] = Some(Code([3, 2, 1]));
        assert!(round.all_intercept_guesses_submitted());
    }

    #[test]
    fn test_unsubmitted_entries_serialize_as_empty_lists() {
        let mut round = Round::new(1, &mut rand::rng());
        round.team_decode_guesses[TeamName::Black] = Some(Code([4, 4, 1]));

        let json = serde_json::to_value(&round).unwrap();
        assert_eq!(json["teamClues"]["White"], serde_json::json!([]));
        assert_eq!(json["teamDecodeGuesses"]["White"], serde_json::json!([]));
        assert_eq!(
            json["teamDecodeGuesses"]["Black"],
            serde_json::json!([4, 4, 1])
        );
    }

    #[test]
    fn test_round_deserializes_from_snapshot() {
        let mut round = Round::new(3, &mut rand::rng());
        round.team_clues[TeamName::White] =
            Some(["sun".to_string(), "sea".to_string(), "sky".to_string()]);

        let json = serde_json::to_string(&round).unwrap();
        let parsed: Round = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, round);
    }
}
