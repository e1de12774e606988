//! Runtime configuration.
//!
//! Sources, later ones winning: built-in defaults, `courselist.toml` in the working
//! directory, then `COURSELIST_*` environment variables (`.env` is loaded by the binary).

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;

use crate::listing::endpoints::DEFAULT_BASE_URL;
use crate::listing::errors::{Result, ScrapeError};

pub const CONFIG_FILE: &str = "courselist.toml";
pub const ENV_PREFIX: &str = "COURSELIST_";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// `localpart@wm.edu` address sent with every request. Required for scraping.
    #[serde(default)]
    pub identity: Option<String>,
    /// Minimum milliseconds between requests.
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,
    /// When false, nothing is logged.
    #[serde(default = "default_logging")]
    pub logging: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_rate_limit_ms() -> u64 {
    500
}

fn default_logging() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    /// Extracts a config from an arbitrary provider stack. A value of the wrong
    /// type, such as a non-boolean `logging`, is a configuration error.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment
            .extract()
            .map_err(|e| ScrapeError::Configuration(e.to_string()))
    }
}
