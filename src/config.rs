//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the historical market-data provider
    pub market_data_url: String,
    /// Directory holding one serialized model artifact per ticker
    pub models_dir: PathBuf,
    /// Staleness window for cached predictions
    pub prediction_ttl: Duration,
    /// Staleness window for cached sentiment results
    pub sentiment_ttl: Duration,
    /// Deadline for a single historical-data fetch
    pub fetch_timeout: Duration,
    /// Deadline for a single model fit
    pub train_timeout: Duration,
}

const DEFAULT_MARKET_DATA_URL: &str = "https://plutus-api-550455289977.us-central1.run.app";

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `MARKET_DATA_URL` - Provider base URL
    /// - `MODELS_DIR` - Model artifact directory (default: ./models)
    /// - `PREDICTION_TTL_SECS` - Prediction staleness window (default: 1800)
    /// - `SENTIMENT_TTL_SECS` - Sentiment staleness window (default: 900)
    /// - `FETCH_TIMEOUT_SECS` - Provider request deadline (default: 30)
    /// - `TRAIN_TIMEOUT_SECS` - Model fit deadline (default: 120)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            market_data_url: env::var("MARKET_DATA_URL")
                .unwrap_or_else(|_| DEFAULT_MARKET_DATA_URL.to_string()),
            models_dir: env::var("MODELS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./models")),
            prediction_ttl: duration_from_env("PREDICTION_TTL_SECS", 1800),
            sentiment_ttl: duration_from_env("SENTIMENT_TTL_SECS", 900),
            fetch_timeout: duration_from_env("FETCH_TIMEOUT_SECS", 30),
            train_timeout: duration_from_env("TRAIN_TIMEOUT_SECS", 120),
        }
    }
}

fn duration_from_env(var: &str, default_secs: u64) -> Duration {
    let secs = env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_secs);
    Duration::from_secs(secs)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            market_data_url: DEFAULT_MARKET_DATA_URL.to_string(),
            models_dir: PathBuf::from("./models"),
            prediction_ttl: Duration::from_secs(1800),
            sentiment_ttl: Duration::from_secs(900),
            fetch_timeout: Duration::from_secs(30),
            train_timeout: Duration::from_secs(120),
        }
    }
}
