//! Stockcast - sentiment and price-forecast HTTP service
//!
//! Serves headline sentiment and short/medium/long-horizon price forecasts,
//! backed by per-key response caches and per-ticker persisted models with
//! asynchronous background refresh.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod forecast;
pub mod market;
pub mod models;
pub mod sentiment;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
