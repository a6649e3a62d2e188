//! Response DTOs for the HTTP API

use serde::Serialize;

use crate::cache::CacheStats;
use crate::forecast::PredictionSet;
use crate::sentiment::{SentimentLabel, SentimentResult};

/// Body of a successful `POST /sentiment`.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentResponse {
    /// Sentiment label, e.g. "POSITIVE"
    pub sentiment: SentimentLabel,
    /// Scorer confidence in [0, 1]
    pub confidence: f64,
}

impl From<SentimentResult> for SentimentResponse {
    fn from(result: SentimentResult) -> Self {
        Self {
            sentiment: result.label,
            confidence: result.confidence,
        }
    }
}

/// Body of a successful `POST /price_prediction`.
#[derive(Debug, Clone, Serialize)]
pub struct PricePredictionResponse {
    pub predictions: PredictionSet,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Per-cache counters in the stats response.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSection {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub hit_rate: f64,
}

impl From<&CacheStats> for CacheSection {
    fn from(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            entries: stats.entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Body of `GET /stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub predictions: CacheSection,
    pub sentiment: CacheSection,
}
