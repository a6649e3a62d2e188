//! Sentiment Module
//!
//! Headline sentiment scoring behind a trait so the cache layer treats the
//! scorer as a black box.

mod lexicon;

pub use lexicon::LexiconScorer;

use serde::{Deserialize, Serialize};

// == Sentiment Label ==
/// Classification of a scored headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

// == Sentiment Result ==
/// Label plus a confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub confidence: f64,
}

// == Scorer Trait ==
/// Synchronous sentiment scorer: text in, label and confidence out.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentResult;
}
