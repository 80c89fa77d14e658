//! Process-wide published configuration.
//!
//! The bot's other components read their secrets from here after
//! [`bootstrap`] has run once during startup.
//!
//! Invariants:
//! - A successful bootstrap is published once and never replaced.
//! - A failed bootstrap publishes nothing, so a later call may retry.

use secrecy::SecretString;
use std::sync::{Mutex, OnceLock};

use crate::loader::{Bootstrapper, ConfigError};
use crate::types::{ConfigKey, Settings};

static PUBLISHED: OnceLock<Settings> = OnceLock::new();
static BOOTSTRAP_LOCK: Mutex<()> = Mutex::new(());

/// Run the default bootstrap once and publish its settings.
///
/// Later calls return the published settings without touching the
/// override file or the environment again.
pub fn bootstrap() -> Result<&'static Settings, ConfigError> {
    bootstrap_with(Bootstrapper::new())
}

/// Like [`bootstrap`], with a caller-configured bootstrapper.
///
/// The bootstrapper is ignored if settings were already published.
pub fn bootstrap_with(bootstrapper: Bootstrapper) -> Result<&'static Settings, ConfigError> {
    let _guard = BOOTSTRAP_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(settings) = PUBLISHED.get() {
        return Ok(settings);
    }

    let settings = bootstrapper.load()?;
    Ok(PUBLISHED.get_or_init(|| settings))
}

/// The published settings, if bootstrap has completed.
pub fn published() -> Option<&'static Settings> {
    PUBLISHED.get()
}

fn published_value(key: ConfigKey) -> Option<&'static SecretString> {
    published().and_then(|settings| settings.get(key))
}

/// Chat-platform bot token (`DISCORD_TOKEN`).
pub fn discord_token() -> Option<&'static SecretString> {
    published_value(ConfigKey::DiscordToken)
}

/// Movie-database API key (`TMDB_API_KEY`).
pub fn tmdb_api_key() -> Option<&'static SecretString> {
    published_value(ConfigKey::TmdbApiKey)
}

/// Language-model API key (`COHERE_API_KEY`).
pub fn cohere_api_key() -> Option<&'static SecretString> {
    published_value(ConfigKey::CohereApiKey)
}
