//! Request and Response models for the HTTP API
//!
//! DTOs used to deserialize request bodies and serialize responses.

pub mod requests;
pub mod responses;

pub use requests::{PricePredictionRequest, SentimentRequest};
pub use responses::{
    CacheSection, HealthResponse, PricePredictionResponse, SentimentResponse, StatsResponse,
};
