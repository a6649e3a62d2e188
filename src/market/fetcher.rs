//! Historical Data Fetcher
//!
//! HTTP client for the external market-data provider. Fetches a ten-year
//! daily window for a ticker and reshapes it into a [`TimeSeries`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{ApiError, Result};
use crate::market::{PricePoint, TimeSeries};

// == Provider Trait ==
/// Source of historical daily closes for a ticker.
///
/// The HTTP client implements this against the real provider; tests
/// substitute in-memory fakes.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches the historical series for `ticker`.
    ///
    /// No retries happen at this layer. Retry policy, if any, belongs to
    /// the caller.
    async fn fetch(&self, ticker: &str) -> Result<TimeSeries>;
}

// == Wire Format ==
/// Provider response body: `{"Data": [{"Time": unix_secs, "Close": f64, ...}]}`.
#[derive(Debug, Deserialize)]
struct HistoricalResponse {
    #[serde(rename = "Data", default)]
    data: Vec<HistoricalRow>,
}

#[derive(Debug, Deserialize)]
struct HistoricalRow {
    #[serde(rename = "Time")]
    time: i64,
    /// Missing closes are dropped at ingestion
    #[serde(rename = "Close")]
    close: Option<f64>,
}

// == HTTP Client ==
/// Client for the real market-data provider.
pub struct HttpMarketData {
    client: Client,
    base_url: String,
}

impl HttpMarketData {
    /// Creates a client with the given provider base URL and request deadline.
    ///
    /// Fails if the underlying HTTP client cannot be constructed; a client
    /// without the configured deadline is never handed out.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Internal(format!("building HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl MarketDataProvider for HttpMarketData {
    async fn fetch(&self, ticker: &str) -> Result<TimeSeries> {
        let url = format!(
            "{}/historical/{}?range=10y&interval=1d",
            self.base_url, ticker
        );

        let response = self.client.get(&url).send().await.map_err(|err| {
            if err.is_timeout() {
                ApiError::UpstreamTimeout("historical data".to_string())
            } else {
                ApiError::UpstreamUnavailable(err.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(ApiError::UpstreamUnavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: HistoricalResponse = response
            .json()
            .await
            .map_err(|err| ApiError::UpstreamUnavailable(err.to_string()))?;

        series_from_rows(ticker, body.data)
    }
}

// == Response Reshaping ==
/// Projects provider rows down to (date, close) pairs.
///
/// Rows with a missing close are dropped, timestamps are normalized to
/// calendar days, and rows that do not advance the date (duplicates within
/// the same day) are skipped so the series invariant holds.
fn series_from_rows(ticker: &str, rows: Vec<HistoricalRow>) -> Result<TimeSeries> {
    let mut points: Vec<PricePoint> = Vec::with_capacity(rows.len());
    let mut last_date: Option<NaiveDate> = None;

    for row in rows {
        let Some(close) = row.close else { continue };
        let Some(timestamp) = DateTime::from_timestamp(row.time, 0) else {
            continue;
        };
        let date = timestamp.date_naive();
        if last_date.is_some_and(|prev| date <= prev) {
            continue;
        }
        last_date = Some(date);
        points.push(PricePoint { date, close });
    }

    if points.is_empty() {
        return Err(ApiError::NoData(ticker.to_string()));
    }

    TimeSeries::new(points)
}
