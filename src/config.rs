//! Server settings from environment variables: HOST, PORT, INACTIVITY_HOURS.

use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_INACTIVITY_HOURS: u64 = 12;

/// Where to listen and how long an untouched tournament is kept in memory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub inactivity_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            inactivity_timeout: Duration::from_secs(DEFAULT_INACTIVITY_HOURS * 3600),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Missing or unparsable values fall back to the defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let inactivity_timeout = lookup("INACTIVITY_HOURS")
            .and_then(|h| h.parse::<u64>().ok())
            .filter(|h| *h > 0)
            .and_then(|h| h.checked_mul(3600))
            .map(Duration::from_secs)
            .unwrap_or(defaults.inactivity_timeout);
        Self {
            host,
            port,
            inactivity_timeout,
        }
    }
}
