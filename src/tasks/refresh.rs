//! Prediction Refresh Task
//!
//! Fire-and-forget refresh of a ticker's cached predictions, scheduled
//! after a successful foreground computation.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::PredictionCache;

/// Spawns a detached refresh of `ticker`'s predictions.
///
/// The task runs the same load/train/generate/store sequence as a cache
/// miss. No caller is waiting on it, so its error boundary is here: a
/// failure is logged and swallowed, the cache keeps its previous entry,
/// and other tickers are unaffected. The task survives cancellation of
/// the request that scheduled it.
pub fn spawn_refresh(cache: Arc<PredictionCache>, ticker: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        match cache.refresh(&ticker).await {
            Ok(()) => debug!(%ticker, "background refresh complete"),
            Err(err) => warn!(%ticker, %err, "background refresh failed"),
        }
    })
}
