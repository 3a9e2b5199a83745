//! Keyword dealing.

use rand::seq::SliceRandom;
use std::{collections::HashSet, sync::Arc};

use super::{
    GameError, GameResult,
    constants::KEYWORDS_PER_TEAM,
    entities::{PerTeam, TeamName},
};

/// Built-in word list used when no keyword file is configured.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "Africa", "Airport", "Alien", "Anchor", "Angel", "Apple", "Arrow", "Astronaut", "Avalanche",
    "Bakery", "Balloon", "Bamboo", "Bank", "Battery", "Beach", "Beard", "Bee", "Bell", "Bicycle",
    "Blizzard", "Bomb", "Bone", "Book", "Bottle", "Bridge", "Bubble", "Cactus", "Camera",
    "Candle", "Canyon", "Carnival", "Castle", "Cave", "Chain", "Cherry", "Chess", "Circus",
    "Clock", "Cloud", "Coffee", "Comet", "Compass", "Cowboy", "Crown", "Crystal", "Desert",
    "Diamond", "Dinosaur", "Doctor", "Dragon", "Drum", "Eagle", "Earthquake", "Egypt", "Engine",
    "Feather", "Fire", "Flute", "Forest", "Fountain", "Galaxy", "Garden", "Ghost", "Giant",
    "Glacier", "Glove", "Gold", "Guitar", "Hammer", "Harbor", "Helicopter", "Honey", "Horse",
    "Hospital", "Ice", "Island", "Jungle", "Key", "King", "Kite", "Knight", "Ladder", "Lamp",
    "Laser", "Lemon", "Library", "Lighthouse", "Lion", "Magnet", "Map", "Mask", "Medal",
    "Mermaid", "Mirror", "Moon", "Mountain", "Mummy", "Needle", "Ninja", "Ocean", "Opera",
    "Orchestra", "Owl", "Paint", "Parachute", "Pepper", "Piano", "Pilot", "Pirate", "Planet",
    "Pyramid", "Queen", "Rabbit", "Rainbow", "Robot", "Rocket", "Saddle", "Satellite", "School",
    "Shadow", "Shark", "Ship", "Skeleton", "Snow", "Spider", "Spring", "Storm", "Submarine",
    "Sun", "Sword", "Telescope", "Temple", "Thunder", "Tiger", "Torch", "Tower", "Train",
    "Treasure", "Tunnel", "Umbrella", "Unicorn", "Vampire", "Violin", "Volcano", "Wall", "Whale",
    "Window", "Wizard", "Wolf", "Zombie",
];

/// Builds a shared word list from the built-in keywords.
pub fn default_keywords() -> Arc<[String]> {
    DEFAULT_KEYWORDS.iter().map(|w| (*w).to_string()).collect()
}

/// Minimum distinct words needed to deal both teams.
pub const fn required_keywords() -> usize {
    KEYWORDS_PER_TEAM * TeamName::ALL.len()
}

/// Counts the distinct non-blank words in a list, ignoring surrounding
/// whitespace.
pub fn distinct_keywords(words: &[String]) -> usize {
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

/// A per-game pool of keywords. Words are dealt without replacement. When
/// the pool runs dry it is refilled from the full word list and reshuffled,
/// leaving out whatever is still in play.
#[derive(Debug)]
pub struct KeywordPool {
    words: Arc<[String]>,
    remaining: Vec<String>,
}

impl KeywordPool {
    pub fn new(words: Arc<[String]>) -> GameResult<Self> {
        let available = distinct_keywords(&words);
        if available < required_keywords() {
            return Err(GameError::NotEnoughKeywords {
                required: required_keywords(),
                available,
            });
        }

        let mut pool = Self {
            words,
            remaining: Vec::new(),
        };
        pool.refill(&HashSet::new());
        Ok(pool)
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    fn refill(&mut self, in_play: &HashSet<String>) {
        let mut seen = HashSet::new();
        self.remaining = self
            .words
            .iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty() && !in_play.contains(w) && seen.insert(w.clone()))
            .collect();
        self.remaining.shuffle(&mut rand::rng());
    }

    /// Deals [`KEYWORDS_PER_TEAM`] distinct words to each team. `in_play`
    /// holds words that must not be dealt again after a refill.
    pub fn deal(&mut self, in_play: &HashSet<String>) -> PerTeam<Vec<String>> {
        if self.remaining.len() < required_keywords() {
            log::debug!("Keyword pool exhausted, refilling");
            self.refill(in_play);
            if self.remaining.len() < required_keywords() {
                // Too few words outside of play, so reuse the whole list.
                self.refill(&HashSet::new());
            }
        }
        PerTeam::from_fn(|_| {
            let at = self.remaining.len().saturating_sub(KEYWORDS_PER_TEAM);
            self.remaining.split_off(at)
        })
    }
}
