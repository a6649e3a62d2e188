//! Forecast Module
//!
//! Model training, durable artifact storage, and bounded horizon forecasts.

mod generator;
mod model;
mod store;


pub use generator::{generate, PredictionSet};
pub use model::{Seasonality, TrainedModel, Trainer};
pub use store::ModelStore;
