//! Sentiment Cache Manager
//!
//! Text -> sentiment cache. Structurally a simpler sibling of the
//! prediction cache: no training, no persistence, no background refresh.
//! A stale entry is recomputed lazily on the next access.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheStats};
use crate::sentiment::{SentimentResult, SentimentScorer};

struct Inner {
    entries: HashMap<String, CacheEntry<SentimentResult>>,
    stats: CacheStats,
}

// == Sentiment Cache ==
/// Cache manager for sentiment results.
pub struct SentimentCache {
    scorer: Arc<dyn SentimentScorer>,
    ttl: Duration,
    inner: RwLock<Inner>,
}

impl SentimentCache {
    pub fn new(scorer: Arc<dyn SentimentScorer>, ttl: Duration) -> Self {
        Self {
            scorer,
            ttl,
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            }),
        }
    }

    // == Get Or Compute ==
    /// Returns the cached sentiment for `text`, invoking the scorer only
    /// when no fresh entry exists. The scorer runs outside the critical
    /// section; the result is stored and returned whole, never a partial
    /// or placeholder value.
    pub async fn get_or_compute(&self, text: &str) -> SentimentResult {
        {
            let mut inner = self.inner.write().await;
            let fresh = match inner.entries.get(text) {
                Some(entry) if entry.is_fresh(self.ttl) => Some(entry.value.clone()),
                _ => None,
            };
            if let Some(value) = fresh {
                inner.stats.record_hit();
                return value;
            }
            inner.stats.record_miss();
        }

        let result = self.scorer.score(text);

        let mut inner = self.inner.write().await;
        inner
            .entries
            .insert(text.to_string(), CacheEntry::new(result.clone()));
        result
    }

    /// Snapshot of the hit/miss counters.
    pub async fn stats(&self) -> CacheStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.entries = inner.entries.len();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentLabel;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingScorer {
        calls: AtomicUsize,
    }

    impl CountingScorer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SentimentScorer for CountingScorer {
        fn score(&self, _text: &str) -> SentimentResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            SentimentResult {
                label: SentimentLabel::Positive,
                confidence: 0.9,
            }
        }
    }

    #[tokio::test]
    async fn test_same_text_scored_once_within_window() {
        let scorer = Arc::new(CountingScorer::new());
        let cache = SentimentCache::new(scorer.clone(), Duration::from_secs(60));

        let first = cache.get_or_compute("Acme beats estimates").await;
        let second = cache.get_or_compute("Acme beats estimates").await;

        assert_eq!(first, second);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_texts_scored_separately() {
        let scorer = Arc::new(CountingScorer::new());
        let cache = SentimentCache::new(scorer.clone(), Duration::from_secs(60));

        cache.get_or_compute("headline one").await;
        cache.get_or_compute("headline two").await;

        assert_eq!(scorer.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().await.entries, 2);
    }

    #[tokio::test]
    async fn test_stale_entry_rescored() {
        let scorer = Arc::new(CountingScorer::new());
        let cache = SentimentCache::new(scorer.clone(), Duration::from_millis(20));

        cache.get_or_compute("headline").await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.get_or_compute("headline").await;

        assert_eq!(scorer.calls.load(Ordering::SeqCst), 2);
        // Recomputation supersedes the entry rather than adding one.
        assert_eq!(cache.stats().await.entries, 1);
    }

    #[tokio::test]
    async fn test_stats_track_hits_and_misses() {
        let scorer = Arc::new(CountingScorer::new());
        let cache = SentimentCache::new(scorer, Duration::from_secs(60));

        cache.get_or_compute("a").await;
        cache.get_or_compute("a").await;
        cache.get_or_compute("b").await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert!((stats.hit_rate() - 1.0 / 3.0).abs() < 1e-9);
    }
}
