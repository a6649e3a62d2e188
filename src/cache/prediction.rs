//! Prediction Cache Manager
//!
//! Owns the ticker -> predictions map and orchestrates the model
//! lifecycle: serve fresh hits, fall through to load-or-train on a miss,
//! write back, and schedule an asynchronous refresh.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats};
use crate::error::{ApiError, Result};
use crate::forecast::{generate, ModelStore, PredictionSet, TrainedModel, Trainer};
use crate::market::{MarketDataProvider, TimeSeries};
use crate::tasks;

struct Inner {
    entries: HashMap<String, CacheEntry<PredictionSet>>,
    stats: CacheStats,
}

// == Prediction Cache ==
/// Cache manager for price predictions.
///
/// The entry map is the only mutable state and all mutation goes through
/// the internal lock. The lock is never held across a fetch, fit, or
/// artifact read, so slow cold starts do not serialize unrelated requests.
/// Two concurrent misses for the same ticker may both train; the artifact
/// and the cache entry are each overwritten whole, last write wins.
pub struct PredictionCache {
    provider: Arc<dyn MarketDataProvider>,
    store: ModelStore,
    trainer: Trainer,
    ttl: Duration,
    train_timeout: Duration,
    inner: RwLock<Inner>,
}

impl PredictionCache {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        store: ModelStore,
        trainer: Trainer,
        ttl: Duration,
        train_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            store,
            trainer,
            ttl,
            train_timeout,
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            }),
        }
    }

    // == Get Or Compute ==
    /// Returns cached predictions for `ticker`, computing them on a miss.
    ///
    /// A fresh hit returns immediately with no provider, trainer, or store
    /// work. On a miss the model is loaded from the store, or trained from
    /// freshly fetched history and persisted, predictions are generated and
    /// written back, and a detached refresh is scheduled for the ticker.
    /// Failures surface to the caller; a failed call leaves the cache and
    /// store untouched and schedules no refresh.
    pub async fn get_or_compute(self: &Arc<Self>, ticker: &str) -> Result<PredictionSet> {
        if let Some(hit) = self.lookup(ticker).await {
            return Ok(hit);
        }

        let predictions = self.compute_and_cache(ticker).await?;
        tasks::spawn_refresh(Arc::clone(self), ticker.to_string());
        Ok(predictions)
    }

    // == Refresh ==
    /// One load/train/generate/store pass, writing the result back into
    /// the cache. Used by the background refresh task; on failure the
    /// previous entry, if any, is left in place.
    pub async fn refresh(&self, ticker: &str) -> Result<()> {
        self.compute_and_cache(ticker).await?;
        Ok(())
    }

    /// Snapshot of the hit/miss counters.
    pub async fn stats(&self) -> CacheStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.entries = inner.entries.len();
        stats
    }

    async fn lookup(&self, ticker: &str) -> Option<PredictionSet> {
        let mut inner = self.inner.write().await;
        let fresh = match inner.entries.get(ticker) {
            Some(entry) if entry.is_fresh(self.ttl) => Some(entry.value),
            _ => None,
        };
        match fresh {
            Some(value) => {
                inner.stats.record_hit();
                Some(value)
            }
            None => {
                inner.stats.record_miss();
                None
            }
        }
    }

    async fn compute_and_cache(&self, ticker: &str) -> Result<PredictionSet> {
        let model = self.resolve_model(ticker).await?;
        let predictions = generate(&model);

        let mut inner = self.inner.write().await;
        inner
            .entries
            .insert(ticker.to_string(), CacheEntry::new(predictions));
        Ok(predictions)
    }

    /// Loads the stored model for `ticker`, falling back to fetch-and-train
    /// when no artifact exists. A corrupt artifact is a hard failure, not a
    /// retrain trigger.
    async fn resolve_model(&self, ticker: &str) -> Result<TrainedModel> {
        if let Some(model) = self.store.load(ticker).await? {
            debug!(%ticker, "using stored model");
            return Ok(model);
        }

        info!(%ticker, "no stored model, training from fresh history");
        let series = self.provider.fetch(ticker).await?;
        let model = self.fit(series).await?;
        self.store.save(ticker, &model).await?;
        Ok(model)
    }

    /// Dispatches the CPU-bound fit to the blocking pool, bounded by the
    /// training deadline.
    async fn fit(&self, series: TimeSeries) -> Result<TrainedModel> {
        let trainer = self.trainer.clone();
        let fit = tokio::task::spawn_blocking(move || trainer.train(&series));

        match tokio::time::timeout(self.train_timeout, fit).await {
            Err(_) => Err(ApiError::UpstreamTimeout("model fit".to_string())),
            Ok(joined) => joined.map_err(|err| ApiError::TrainingFailed(err.to_string()))?,
        }
    }
}
