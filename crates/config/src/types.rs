//! Configuration types for the reelbot environment bootstrap.
//!
//! Responsibilities:
//! - Name the recognized configuration keys and map them to variable names.
//! - Hold the published secret values in a structured `Settings` value.
//!
//! Does NOT handle:
//! - Reading the override file or writing the process environment (see `loader`).
//! - Process-wide publication of the settings (see `published`).
//!
//! Invariants:
//! - An absent key is `None`, never an empty string.
//! - A key set to the empty string is present with an empty value.
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{COHERE_API_KEY_VAR, DISCORD_TOKEN_VAR, TMDB_API_KEY_VAR};
use crate::loader::{ConfigError, EnvStore};

/// A configuration key the bot reads after the override file is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKey {
    /// Chat-platform bot token.
    DiscordToken,
    /// Movie-database API key.
    TmdbApiKey,
    /// Language-model API key.
    CohereApiKey,
}

impl ConfigKey {
    /// Every recognized key, in publication order.
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::DiscordToken,
        ConfigKey::TmdbApiKey,
        ConfigKey::CohereApiKey,
    ];

    /// The environment variable holding this key.
    pub const fn env_var(self) -> &'static str {
        match self {
            ConfigKey::DiscordToken => DISCORD_TOKEN_VAR,
            ConfigKey::TmdbApiKey => TMDB_API_KEY_VAR,
            ConfigKey::CohereApiKey => COHERE_API_KEY_VAR,
        }
    }

    /// Human-readable role of the key.
    pub const fn display_name(self) -> &'static str {
        match self {
            ConfigKey::DiscordToken => "Discord bot token",
            ConfigKey::TmdbApiKey => "TMDB API key",
            ConfigKey::CohereApiKey => "Cohere API key",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_var())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    /// Accepts the variable name in any case, with `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.env_var() == normalized)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// The published configuration: one optional secret per recognized key.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub discord_token: Option<SecretString>,
    pub tmdb_api_key: Option<SecretString>,
    pub cohere_api_key: Option<SecretString>,
}

impl Settings {
    /// Read every recognized key from the store.
    pub fn from_store<S: EnvStore + ?Sized>(store: &S) -> Self {
        let read = |key: ConfigKey| {
            store
                .get(key.env_var())
                .map(|value| SecretString::new(value.into()))
        };
        Self {
            discord_token: read(ConfigKey::DiscordToken),
            tmdb_api_key: read(ConfigKey::TmdbApiKey),
            cohere_api_key: read(ConfigKey::CohereApiKey),
        }
    }

    /// The value for `key`, or `None` if it was not set.
    pub fn get(&self, key: ConfigKey) -> Option<&SecretString> {
        match key {
            ConfigKey::DiscordToken => self.discord_token.as_ref(),
            ConfigKey::TmdbApiKey => self.tmdb_api_key.as_ref(),
            ConfigKey::CohereApiKey => self.cohere_api_key.as_ref(),
        }
    }

    pub fn is_set(&self, key: ConfigKey) -> bool {
        self.get(key).is_some()
    }

    /// The value for `key`, failing with the variable name if it was not set.
    pub fn require(&self, key: ConfigKey) -> Result<&SecretString, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.env_var().to_string()))
    }

    /// Keys from `keys` that are not set, in the order given.
    pub fn missing<I>(&self, keys: I) -> Vec<ConfigKey>
    where
        I: IntoIterator<Item = ConfigKey>,
    {
        keys.into_iter().filter(|key| !self.is_set(*key)).collect()
    }

    /// Length in bytes of the value for `key`, without exposing it.
    pub fn value_len(&self, key: ConfigKey) -> Option<usize> {
        self.get(key).map(|value| value.expose_secret().len())
    }
}
