//! Server configuration read from the environment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use stepcards_core::QueueLimits;

/// Runtime configuration.
///
/// Env vars:
/// - HOST: bind address (default "0.0.0.0")
/// - PORT: bind port (default 3000)
/// - DATA_FILE: JSON file holding the cards; cards live in memory only when unset
/// - PARAMETERS_FILE: JSON file holding the scheduling parameters
/// - NEW_CARDS_PER_SESSION / REVIEWS_PER_SESSION: default study queue limits
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_file: Option<PathBuf>,
    pub parameters_file: Option<PathBuf>,
    pub queue_limits: QueueLimits,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Malformed numbers are errors,
    /// never replaced by defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = QueueLimits::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .with_context(|| format!("PORT must be a port number, got {value:?}"))?,
            None => 3000,
        };

        let parse_limit = |key: &str, default: usize| -> Result<usize> {
            match lookup(key) {
                Some(value) => value
                    .parse()
                    .with_context(|| format!("{key} must be a non-negative integer, got {value:?}")),
                None => Ok(default),
            }
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            data_file: lookup("DATA_FILE").map(PathBuf::from),
            parameters_file: lookup("PARAMETERS_FILE").map(PathBuf::from),
            queue_limits: QueueLimits {
                new_cards: parse_limit("NEW_CARDS_PER_SESSION", defaults.new_cards)?,
                reviews: parse_limit("REVIEWS_PER_SESSION", defaults.reviews)?,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
