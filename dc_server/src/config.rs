//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use decrypto::{
    SessionConfig,
    game::keywords::default_keywords,
    session::config::DEFAULT_INBOX_CAPACITY,
};
use std::{
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Prometheus exporter address, if metrics are enabled
    pub metrics_bind: Option<SocketAddr>,
    /// Word list games deal keywords from
    pub keywords: Arc<[String]>,
    /// Queued messages allowed per game actor
    pub session_inbox_capacity: usize,
    /// Queued outbound messages allowed per websocket connection
    pub channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            metrics_bind: None,
            keywords: default_keywords(),
            session_inbox_capacity: DEFAULT_INBOX_CAPACITY,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// CLI overrides take priority over `SERVER_BIND`, `METRICS_BIND` and
    /// `KEYWORDS_FILE`.
    ///
    /// # Errors
    ///
    /// Returns error if an address doesn't parse or the keyword file can't
    /// be read
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        metrics_bind_override: Option<SocketAddr>,
        keywords_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_env_addr("SERVER_BIND")?.unwrap_or(defaults.bind),
        };

        let metrics_bind = match metrics_bind_override {
            Some(bind) => Some(bind),
            None => parse_env_addr("METRICS_BIND")?,
        };

        let keywords = match keywords_override
            .or_else(|| std::env::var("KEYWORDS_FILE").ok().map(PathBuf::from))
        {
            Some(path) => load_keywords(&path)?,
            None => defaults.keywords,
        };

        Ok(ServerConfig {
            bind,
            metrics_bind,
            keywords,
            session_inbox_capacity: parse_env_or(
                "SESSION_INBOX_CAPACITY",
                defaults.session_inbox_capacity,
            ),
            channel_capacity: parse_env_or("CHANNEL_CAPACITY", defaults.channel_capacity),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "CHANNEL_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if let Some(metrics_bind) = self.metrics_bind
            && metrics_bind == self.bind
        {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Must differ from the server address ({})", self.bind),
            });
        }

        self.session_config()
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "KEYWORDS_FILE".to_string(),
                reason,
            })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            inbox_capacity: self.session_inbox_capacity,
            keywords: self.keywords.clone(),
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },

    #[error("Failed to read keyword file {}: {source}", path.display())]
    KeywordFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reads a newline-delimited word list, skipping blank lines.
pub fn load_keywords(path: &Path) -> Result<Arc<[String]>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::KeywordFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn parse_env_addr(key: &str) -> Result<Option<SocketAddr>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value.parse().map(Some).map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("'{value}' is not an IP:PORT address"),
        }),
        Err(_) => Ok(None),
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "SERVER_BIND",
        "METRICS_BIND",
        "KEYWORDS_FILE",
        "SESSION_INBOX_CAPACITY",
        "CHANNEL_CAPACITY",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: env-mutating tests are serialized.
            unsafe { std::env::remove_var(var) };
        }
    }

    fn set_env(key: &str, value: &str) {
        // SAFETY: env-mutating tests are serialized.
        unsafe { std::env::set_var(key, value) };
    }

    fn temp_word_file(words: &[&str]) -> PathBuf {
        let id: u32 = rand::random();
        let path = std::env::temp_dir().join(format!("dc_server_words_{id}.txt"));
        std::fs::write(&path, words.join("\n")).unwrap();
        path
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            var: "CHANNEL_CAPACITY".to_string(),
            reason: "Must be greater than 0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("CHANNEL_CAPACITY"));
        assert!(msg.contains("greater than 0"));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.port(), 8081);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_capacity() {
        let config = ServerConfig {
            channel_capacity: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "CHANNEL_CAPACITY"));

        let config = ServerConfig {
            session_inbox_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_short_word_list() {
        let config = ServerConfig {
            keywords: vec!["alpha".to_string(), "beta".to_string()].into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "KEYWORDS_FILE"));
    }

    #[test]
    fn test_config_validation_metrics_on_server_port() {
        let config = ServerConfig {
            metrics_bind: Some(ServerConfig::default().bind),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = ServerConfig::from_env(None, None, None).unwrap();
        assert_eq!(config.bind, ServerConfig::default().bind);
        assert_eq!(config.metrics_bind, None);
        assert_eq!(config.session_inbox_capacity, 100);
        assert_eq!(config.channel_capacity, 32);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        clear_env();
        set_env("SERVER_BIND", "0.0.0.0:9000");
        set_env("METRICS_BIND", "127.0.0.1:9100");
        set_env("CHANNEL_CAPACITY", "8");

        let config = ServerConfig::from_env(None, None, None).unwrap();
        assert_eq!(config.bind, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.metrics_bind, Some("127.0.0.1:9100".parse().unwrap()));
        assert_eq!(config.channel_capacity, 8);

        let override_bind: SocketAddr = "127.0.0.1:7000".parse().unwrap();
        let config = ServerConfig::from_env(Some(override_bind), None, None).unwrap();
        assert_eq!(config.bind, override_bind);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_address() {
        clear_env();
        set_env("SERVER_BIND", "not-an-address");
        let err = ServerConfig::from_env(None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "SERVER_BIND"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_keywords_file() {
        clear_env();
        let path = temp_word_file(&["apple", "", "  banana  ", "cherry"]);
        set_env("KEYWORDS_FILE", path.to_str().unwrap());

        let config = ServerConfig::from_env(None, None, None).unwrap();
        assert_eq!(config.keywords.to_vec(), vec!["apple", "banana", "cherry"]);
        assert!(config.validate().is_err());

        std::fs::remove_file(&path).unwrap();
        clear_env();
    }

    #[test]
    fn test_missing_keywords_file() {
        let err = load_keywords(Path::new("/nonexistent/words.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::KeywordFile { .. }));
    }
}
