//! Environment-driven bot configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Token, operating guild and terminal channel from environment

use std::fmt;
use thiserror::Error;

/// Configuration failures surfaced at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("{name} must be a numeric Discord id, got {value:?}")]
    InvalidId { name: &'static str, value: String },
}

/// Bot configuration, loaded once and immutable afterwards
#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    /// Guild the bot operates in (fetched at ready time)
    pub guild_id: u64,
    /// Channel whose messages are deleted as soon as they are posted
    pub terminal_channel_id: u64,
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let id = |name: &'static str| {
            let value = required(name)?;
            value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidId { name, value })
        };

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            guild_id: id("GUILD_ID")?,
            terminal_channel_id: id("TERMINAL_CHANNEL_ID")?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"<redacted>")
            .field("guild_id", &self.guild_id)
            .field("terminal_channel_id", &self.terminal_channel_id)
            .field("log_level", &self.log_level)
            .finish()
    }
}
