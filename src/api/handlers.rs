//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::cache::{PredictionCache, SentimentCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::forecast::{ModelStore, Trainer};
use crate::market::HttpMarketData;
use crate::models::{
    CacheSection, HealthResponse, PricePredictionRequest, PricePredictionResponse,
    SentimentRequest, SentimentResponse, StatsResponse,
};
use crate::sentiment::LexiconScorer;

/// Application state shared across all handlers.
///
/// One instance of each cache manager, constructed at startup and injected
/// into handlers. All shared mutation happens inside the managers.
#[derive(Clone)]
pub struct AppState {
    pub predictions: Arc<PredictionCache>,
    pub sentiment: Arc<SentimentCache>,
}

impl AppState {
    pub fn new(predictions: Arc<PredictionCache>, sentiment: Arc<SentimentCache>) -> Self {
        Self {
            predictions,
            sentiment,
        }
    }

    /// Wires the production collaborators from configuration: the HTTP
    /// market-data client, the filesystem model store, and the lexicon
    /// sentiment scorer. Fails if the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = Arc::new(HttpMarketData::new(
            config.market_data_url.clone(),
            config.fetch_timeout,
        )?);
        let predictions = Arc::new(PredictionCache::new(
            provider,
            ModelStore::new(config.models_dir.clone()),
            Trainer::default(),
            config.prediction_ttl,
            config.train_timeout,
        ));
        let sentiment = Arc::new(SentimentCache::new(
            Arc::new(LexiconScorer::new()),
            config.sentiment_ttl,
        ));
        Ok(Self::new(predictions, sentiment))
    }
}

/// Handler for POST /sentiment
///
/// Scores a headline, serving a cached result when one is fresh.
pub async fn sentiment_handler(
    State(state): State<AppState>,
    Json(req): Json<SentimentRequest>,
) -> Result<Json<SentimentResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let result = state.sentiment.get_or_compute(&req.article_title).await;
    Ok(Json(SentimentResponse::from(result)))
}

/// Handler for POST /price_prediction
///
/// Serves cached predictions when fresh; otherwise resolves a model
/// (stored artifact, or fetch-and-train), generates predictions, and
/// schedules a background refresh for the ticker.
pub async fn price_prediction_handler(
    State(state): State<AppState>,
    Json(req): Json<PricePredictionRequest>,
) -> Result<Json<PricePredictionResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let predictions = state.predictions.get_or_compute(&req.ticker).await?;
    Ok(Json(PricePredictionResponse { predictions }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let predictions = state.predictions.stats().await;
    let sentiment = state.sentiment.stats().await;

    Json(StatsResponse {
        predictions: CacheSection::from(&predictions),
        sentiment: CacheSection::from(&sentiment),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
