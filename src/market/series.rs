//! Time Series Module
//!
//! Canonical daily closing-price series used by the trainer and generator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

// == Price Point ==
/// One observed daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Calendar day of the observation
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

// == Time Series ==
/// Ordered sequence of daily closes.
///
/// Invariants enforced at construction: non-empty, dates strictly increasing.
/// Rows with missing prices are dropped before a series is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    points: Vec<PricePoint>,
}

impl TimeSeries {
    // == Constructor ==
    /// Builds a series, validating the ordering invariants.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(ApiError::Internal("time series cannot be empty".to_string()));
        }
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ApiError::Internal(
                    "time series dates must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self { points })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the series holds no observations. Cannot occur for a
    /// validated series; provided for completeness.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All observations in date order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Most recent observed close.
    pub fn last_close(&self) -> f64 {
        self.points[self.points.len() - 1].close
    }

    /// Date of the first observation.
    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    /// Date of the most recent observation.
    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    // == Mean Daily Change ==
    /// Mean day-over-day percentage change across the whole series.
    ///
    /// This is the drift rate `r` used to bound forecasts: a horizon of `h`
    /// days is clamped to `price * (1 ± r * h / 100)`. Returns 0.0 for a
    /// single-point series.
    pub fn mean_daily_change_pct(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        let changes: f64 = self
            .points
            .windows(2)
            .map(|pair| (pair[1].close - pair[0].close) / pair[0].close)
            .sum();
        changes / (self.points.len() - 1) as f64 * 100.0
    }
}
