//! API Module
//!
//! HTTP handlers and routing.
//!
//! # Endpoints
//! - `POST /sentiment` - Score a news headline
//! - `POST /price_prediction` - Forecast a ticker at fixed horizons
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache hit/miss counters

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
