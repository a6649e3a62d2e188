//! Cache Module
//!
//! In-memory caches for prediction sets and sentiment results. Entries are
//! superseded on access past the staleness window, never evicted.

mod entry;
mod prediction;
mod sentiment;
mod stats;

pub use entry::CacheEntry;
pub use prediction::PredictionCache;
pub use sentiment::SentimentCache;
pub use stats::CacheStats;
