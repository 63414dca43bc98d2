//! Server configuration parsed from environment variables.

use std::time::Duration;

use guard::{GuardConfig, GuardError};
use guard::guard::{DEFAULT_LANDING_PATH, DEFAULT_LOGIN_PATH};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CONTEXT_IDLE_TIMEOUT_SECS: u64 = 1800;
pub const DEFAULT_CONTEXT_SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0:?}")]
    InvalidPort(String),
    #[error("invalid {key}: must be a positive number of seconds")]
    InvalidDuration { key: &'static str },
    #[error(transparent)]
    Guard(#[from] GuardError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub guard: GuardConfig,
    /// Contexts untouched for this long are dropped, session included.
    pub context_idle_timeout: Duration,
    pub context_sweep_interval: Duration,
    pub cookie_secure: bool,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `LANDING_PATH`: default `/dashboard`
    /// - `CONTEXT_IDLE_TIMEOUT_SECS`: default 1800
    /// - `CONTEXT_SWEEP_INTERVAL_SECS`: default 60
    /// - `COOKIE_SECURE`: `true`/`false`, default false
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparsable port, a zero duration, or a
    /// landing path the guard cannot use.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let landing =
            std::env::var("LANDING_PATH").unwrap_or_else(|_| DEFAULT_LANDING_PATH.to_owned());
        let guard = GuardConfig::new(DEFAULT_LOGIN_PATH, &landing)?;

        let context_idle_timeout =
            env_secs("CONTEXT_IDLE_TIMEOUT_SECS", DEFAULT_CONTEXT_IDLE_TIMEOUT_SECS)?;
        let context_sweep_interval =
            env_secs("CONTEXT_SWEEP_INTERVAL_SECS", DEFAULT_CONTEXT_SWEEP_INTERVAL_SECS)?;

        Ok(Self {
            port,
            guard,
            context_idle_timeout,
            context_sweep_interval,
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(false),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            guard: GuardConfig::default(),
            context_idle_timeout: Duration::from_secs(DEFAULT_CONTEXT_IDLE_TIMEOUT_SECS),
            context_sweep_interval: Duration::from_secs(DEFAULT_CONTEXT_SWEEP_INTERVAL_SECS),
            cookie_secure: false,
        }
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn env_secs(key: &'static str, default: u64) -> Result<Duration, ConfigError> {
    let secs = match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidDuration { key })?,
        Err(_) => default,
    };
    if secs == 0 {
        return Err(ConfigError::InvalidDuration { key });
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
