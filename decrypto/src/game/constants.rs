/// Players required in the lobby before the game can start.
pub const MIN_PLAYERS: usize = 4;

/// Number of digits in a secret code, clues per round, and digits per guess.
pub const CODE_LENGTH: usize = 3;

/// Highest digit a code can contain. Digits run from 1 to this value and
/// index into a team's keywords.
pub const MAX_CODE_DIGIT: u8 = 4;

/// Keywords each team is dealt when the game starts.
pub const KEYWORDS_PER_TEAM: usize = 4;

/// A team reaching this many intercepts or miscommunications ends the game.
pub const FAILURE_LIMIT: u32 = 2;

/// Maximum length kept for player names and clues. Longer text is cut.
pub const MAX_USER_INPUT_LENGTH: usize = 64;

/// Longest game or player id accepted, in bytes.
pub const MAX_ID_LENGTH: usize = 64;
