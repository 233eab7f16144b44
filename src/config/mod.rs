//! Configuration handling for the application.
//!
//! Everything is sourced from environment variables with development
//! defaults, so a bare `bukascout <url>` against a local API works without
//! any setup. A `.env` file is honored when present (loaded in `main`
//! before this module reads the environment).

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Keeping them public lets other crates (tests,
/// build scripts) refer to them if needed later.
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_API_TOKEN: &str = "API_TOKEN";
pub const ENV_ACCEPT_THRESHOLD: &str = "ACCEPT_THRESHOLD";
pub const ENV_TARGET_CITIES: &str = "TARGET_CITIES";
pub const ENV_MARKET_COUNTRY: &str = "MARKET_COUNTRY";
pub const ENV_DEDUP_DB_PATH: &str = "DEDUP_DB_PATH";

/// Default development values used when environment variables are absent.
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_API_TOKEN: &str = "dev-token";
const DEFAULT_ACCEPT_THRESHOLD: f64 = 0.45;
const DEFAULT_TARGET_CITIES: &str = "Lagos,Ibadan";
const DEFAULT_MARKET_COUNTRY: &str = "Nigeria";
const DEFAULT_DEDUP_DB_PATH: &str = ".seen_cache.db";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    api_base_url: String,
    api_token: String,
    accept_threshold: f64,
    target_cities: Vec<String>,
    market_country: String,
    dedup_db_path: String,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        api_base_url: impl Into<String>,
        api_token: impl Into<String>,
        accept_threshold: f64,
        target_cities: Vec<String>,
        market_country: impl Into<String>,
        dedup_db_path: impl Into<String>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            api_token: api_token.into(),
            accept_threshold,
            target_cities,
            market_country: market_country.into(),
            dedup_db_path: dedup_db_path.into(),
        }
    }

    /// Load from environment variables, falling back to development defaults.
    ///
    /// Only `ACCEPT_THRESHOLD` is validated today (it must parse as a float);
    /// everything else is simple string extraction.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url =
            env::var(ENV_API_BASE_URL).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let api_token = env::var(ENV_API_TOKEN).unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string());
        let accept_threshold = match env::var(ENV_ACCEPT_THRESHOLD) {
            Ok(raw) => raw.parse::<f64>().map_err(|err| ConfigError::InvalidValue {
                field: ENV_ACCEPT_THRESHOLD,
                reason: err.to_string(),
            })?,
            Err(_) => DEFAULT_ACCEPT_THRESHOLD,
        };
        let target_cities = parse_city_list(
            &env::var(ENV_TARGET_CITIES).unwrap_or_else(|_| DEFAULT_TARGET_CITIES.to_string()),
        );
        let market_country =
            env::var(ENV_MARKET_COUNTRY).unwrap_or_else(|_| DEFAULT_MARKET_COUNTRY.to_string());
        let dedup_db_path =
            env::var(ENV_DEDUP_DB_PATH).unwrap_or_else(|_| DEFAULT_DEDUP_DB_PATH.to_string());
        Ok(Self {
            api_base_url,
            api_token,
            accept_threshold,
            target_cities,
            market_country,
            dedup_db_path,
        })
    }

    /// Base URL of the ingestion API, without a trailing slash.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
    /// Bearer token presented to the ingestion API.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }
    /// Minimum score a candidate needs before it is published.
    pub fn accept_threshold(&self) -> f64 {
        self.accept_threshold
    }
    /// Cities searched for in readable text, in configured order.
    pub fn target_cities(&self) -> &[String] {
        &self.target_cities
    }
    /// Country stamped on every candidate's fields.
    pub fn market_country(&self) -> &str {
        &self.market_country
    }
    /// Path of the SQLite file backing the dedup store.
    pub fn dedup_db_path(&self) -> &str {
        &self.dedup_db_path
    }

}

impl Default for Config {
    /// Development defaults (mirrors `from_env` with no env overrides).
    fn default() -> Self {
        Self::new(
            DEFAULT_API_BASE_URL,
            DEFAULT_API_TOKEN,
            DEFAULT_ACCEPT_THRESHOLD,
            parse_city_list(DEFAULT_TARGET_CITIES),
            DEFAULT_MARKET_COUNTRY,
            DEFAULT_DEDUP_DB_PATH,
        )
    }
}

/// Split a comma-separated city list, dropping empty entries.
fn parse_city_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .map(str::to_string)
        .collect()
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
