//! Lexicon Scorer
//!
//! Keyword-based sentiment scorer tuned for financial headlines, with a
//! short negation window so "not bullish" counts as negative.

use std::collections::HashSet;

use crate::sentiment::{SentimentLabel, SentimentResult, SentimentScorer};

const POSITIVE_WORDS: &[&str] = &[
    "bullish", "rally", "surge", "gain", "gains", "profit", "growth", "beat",
    "beats", "upgrade", "upgraded", "outperform", "strong", "positive", "rise",
    "rises", "increase", "breakthrough", "record", "success", "exceed",
    "exceeds", "momentum", "buy", "optimistic", "rebound", "recovery",
    "robust", "upside", "expansion", "soar", "soars", "jump", "jumps",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bearish", "decline", "declines", "loss", "losses", "fall", "falls",
    "plunge", "plunges", "crash", "miss", "misses", "downgrade", "downgraded",
    "underperform", "weak", "negative", "drop", "drops", "decrease", "concern",
    "risk", "fail", "fails", "disappoint", "disappoints", "slump", "sell",
    "warning", "pessimistic", "fear", "trouble", "lawsuit", "bankruptcy",
    "layoff", "layoffs", "recall", "probe", "default", "slide", "slides",
];

const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "hardly", "barely", "without", "neither", "nor",
];

/// How many following tokens a negation word flips.
const NEGATION_WINDOW: usize = 3;

// == Lexicon Scorer ==
/// Counts weighted positive and negative keyword hits and derives a label
/// with a confidence from the hit imbalance.
pub struct LexiconScorer {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    negations: HashSet<&'static str>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            negations: NEGATION_WORDS.iter().copied().collect(),
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentResult {
        let lowered = text.to_lowercase();
        let mut positive_hits = 0u32;
        let mut negative_hits = 0u32;
        let mut negation_left = 0usize;

        for token in lowered.split(|c: char| !c.is_alphanumeric()) {
            if token.is_empty() {
                continue;
            }
            if self.negations.contains(token) {
                negation_left = NEGATION_WINDOW;
                continue;
            }

            let negated = negation_left > 0;
            if self.positive.contains(token) {
                if negated {
                    negative_hits += 1;
                } else {
                    positive_hits += 1;
                }
            } else if self.negative.contains(token) {
                if negated {
                    positive_hits += 1;
                } else {
                    negative_hits += 1;
                }
            }
            negation_left = negation_left.saturating_sub(1);
        }

        let total = positive_hits + negative_hits;
        if total == 0 || positive_hits == negative_hits {
            return SentimentResult {
                label: SentimentLabel::Neutral,
                confidence: 0.5,
            };
        }

        let (label, dominant) = if positive_hits > negative_hits {
            (SentimentLabel::Positive, positive_hits)
        } else {
            (SentimentLabel::Negative, negative_hits)
        };
        let imbalance = (2 * dominant - total) as f64 / total as f64;

        SentimentResult {
            label,
            confidence: 0.5 + 0.5 * imbalance,
        }
    }
}
