use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use super::{
    GameError, GameResult,
    constants::{
        CODE_LENGTH, FAILURE_LIMIT, MAX_CODE_DIGIT, MAX_ID_LENGTH, MAX_USER_INPUT_LENGTH,
    },
    round::Round,
    state_machine::Phase,
};

fn sanitize(s: &str) -> String {
    let mut value = s.trim().to_string();
    if value.len() > MAX_USER_INPUT_LENGTH {
        let mut end = MAX_USER_INPUT_LENGTH;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        value.truncate(end);
    }
    value
}

/// Trims an id. Ids are keys, so over-long ones are rejected rather than cut.
fn parse_id(s: &str, empty: GameError) -> GameResult<String> {
    let id = s.trim();
    if id.is_empty() {
        return Err(empty);
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(GameError::IdTooLong { max: MAX_ID_LENGTH });
    }
    Ok(id.to_string())
}

/// External identifier of a game session.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(s: &str) -> GameResult<Self> {
        parse_id(s, GameError::EmptyGameId).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Stable player identity, chosen by the client and kept across reconnects.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(s: &str) -> GameResult<Self> {
        parse_id(s, GameError::EmptyPlayerId).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

/// The two teams of a game.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TeamName {
    White,
    Black,
}

impl TeamName {
    pub const ALL: [TeamName; 2] = [TeamName::White, TeamName::Black];

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::White => "White",
            Self::Black => "Black",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for TeamName {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "White" => Ok(Self::White),
            "Black" => Ok(Self::Black),
            other => Err(GameError::TeamDoesNotExist(other.to_string())),
        }
    }
}

/// A value kept for each team, indexable by [`TeamName`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PerTeam<T> {
    #[serde(rename = "White")]
    pub white: T,
    #[serde(rename = "Black")]
    pub black: T,
}

impl<T> PerTeam<T> {
    pub fn from_fn(mut f: impl FnMut(TeamName) -> T) -> Self {
        Self {
            white: f(TeamName::White),
            black: f(TeamName::Black),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TeamName, &T)> {
        [(TeamName::White, &self.white), (TeamName::Black, &self.black)].into_iter()
    }
}

impl<T> Index<TeamName> for PerTeam<T> {
    type Output = T;

    fn index(&self, team: TeamName) -> &Self::Output {
        match team {
            TeamName::White => &self.white,
            TeamName::Black => &self.black,
        }
    }
}

impl<T> IndexMut<TeamName> for PerTeam<T> {
    fn index_mut(&mut self, team: TeamName) -> &mut Self::Output {
        match team {
            TeamName::White => &mut self.white,
            TeamName::Black => &mut self.black,
        }
    }
}

/// A three digit code. Used both for a team's secret code and for guesses
/// at one.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Code(pub [u8; CODE_LENGTH]);

impl Code {
    /// Draws each digit independently from `1..=MAX_CODE_DIGIT`. Repeats
    /// are allowed.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(std::array::from_fn(|_| rng.random_range(1..=MAX_CODE_DIGIT)))
    }

    pub fn validate(&self) -> GameResult<()> {
        match self.0.iter().find(|d| !(1..=MAX_CODE_DIGIT).contains(*d)) {
            Some(&digit) => Err(GameError::InvalidCodeDigit {
                digit,
                max: MAX_CODE_DIGIT,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a}-{b}-{c}")
    }
}

/// The clues an encryptor gives for their team's code, in code order.
pub type Clues = [String; CODE_LENGTH];

pub(crate) fn sanitize_clues(clues: Clues) -> Clues {
    clues.map(|clue| sanitize(&clue))
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: PlayerId,
    pub player_name: String,
    pub ready: bool,
    pub is_bot: bool,
}

impl Player {
    #[must_use]
    pub fn new(player_id: PlayerId, player_name: &str) -> Self {
        Self {
            player_id,
            player_name: sanitize(player_name),
            ready: false,
            is_bot: false,
        }
    }

    #[must_use]
    pub fn bot(player_id: PlayerId, player_name: &str) -> Self {
        Self {
            ready: true,
            is_bot: true,
            ..Self::new(player_id, player_name)
        }
    }

    pub fn rename(&mut self, player_name: &str) {
        self.player_name = sanitize(player_name);
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: TeamName,
    /// Members in the order they joined. The first member is the encryptor.
    pub player_ids: Vec<PlayerId>,
    pub keywords: Vec<String>,
    pub current_encryptor_id: Option<PlayerId>,
    /// Times the opposing team correctly guessed this team's code.
    pub intercepts: u32,
    /// Times this team failed to decode its own encryptor's clues.
    pub miscommunications: u32,
}

impl Team {
    #[must_use]
    pub fn new(name: TeamName) -> Self {
        Self {
            name,
            player_ids: Vec::new(),
            keywords: Vec::new(),
            current_encryptor_id: None,
            intercepts: 0,
            miscommunications: 0,
        }
    }

    pub fn has_member(&self, player_id: &PlayerId) -> bool {
        self.player_ids.contains(player_id)
    }

    pub fn reached_failure_limit(&self) -> bool {
        self.intercepts >= FAILURE_LIMIT || self.miscommunications >= FAILURE_LIMIT
    }
}

/// Snapshot of a game as broadcast to its players after every successful
/// action.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub game_id: GameId,
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub phase: Phase,
    pub round_number: usize,
    pub round: Round,
}
