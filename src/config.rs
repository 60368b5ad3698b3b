//! Server configuration from environment variables.
//! HOST (default 0.0.0.0), PORT (8080), MATCH_WRITE_BATCH_SIZE (500), INACTIVITY_HOURS (12).

use crate::store::DEFAULT_WRITE_BATCH;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Operation limit per atomic match write group.
    pub write_batch_size: usize,
    /// Tournaments not accessed for this long are removed.
    pub inactivity_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            write_batch_size: DEFAULT_WRITE_BATCH,
            inactivity_timeout: Duration::from_secs(12 * 3600),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing or unparseable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let write_batch_size = lookup("MATCH_WRITE_BATCH_SIZE")
            .and_then(|b| b.parse().ok())
            .filter(|&b: &usize| b > 0)
            .unwrap_or(defaults.write_batch_size);
        let inactivity_timeout = lookup("INACTIVITY_HOURS")
            .and_then(|h| h.parse::<u64>().ok())
            .map(|h| Duration::from_secs(h * 3600))
            .unwrap_or(defaults.inactivity_timeout);
        Self {
            host,
            port,
            write_batch_size,
            inactivity_timeout,
        }
    }
}
