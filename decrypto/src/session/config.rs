//! Session configuration.

use std::sync::Arc;

use crate::game::keywords::{default_keywords, distinct_keywords, required_keywords};

pub const DEFAULT_INBOX_CAPACITY: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Bound on queued messages per game actor.
    pub inbox_capacity: usize,

    /// Word list every game deals keywords from.
    pub keywords: Arc<[String]>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
            keywords: default_keywords(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.inbox_capacity == 0 {
            return Err("Inbox capacity must be at least 1".to_string());
        }

        let distinct = distinct_keywords(&self.keywords);
        if distinct < required_keywords() {
            return Err(format!(
                "Keyword list needs at least {} distinct words, got {}",
                required_keywords(),
                distinct
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_inbox_rejected() {
        let config = SessionConfig {
            inbox_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_words_dont_count() {
        let words: Vec<String> = std::iter::repeat_n("apple".to_string(), 20).collect();
        let config = SessionConfig {
            keywords: words.into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("got 1"));
    }

    #[test]
    fn test_blank_words_dont_count() {
        let mut words: Vec<String> = (0..7).map(|i| format!("word{i}")).collect();
        words.push("   ".to_string());
        let config = SessionConfig {
            keywords: words.into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("got 7"));
    }
}
