//! Market Data Module
//!
//! Canonical time-series type and the historical-data provider client.

mod fetcher;
mod series;

pub use fetcher::{HttpMarketData, MarketDataProvider};
pub use series::{PricePoint, TimeSeries};
