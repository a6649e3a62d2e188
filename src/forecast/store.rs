//! Model Store Module
//!
//! Durable storage for trained models: one JSON artifact per ticker,
//! overwritten wholesale on every save.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::error;

use crate::error::{ApiError, Result};
use crate::forecast::TrainedModel;

// == Model Store ==
/// Filesystem-backed store addressed by ticker symbol.
///
/// Artifacts are durable until overwritten. There is no independent expiry
/// of the on-disk artifact; only the in-memory prediction cache expires.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Canonical artifact location for a ticker.
    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{ticker}.json"))
    }

    // == Load ==
    /// Loads the artifact for `ticker`, returning `Ok(None)` when no
    /// artifact exists.
    ///
    /// An unreadable or unparseable artifact is a hard `CorruptModel`
    /// failure. It is logged and surfaced, never masked by a silent
    /// retrain.
    pub async fn load(&self, ticker: &str) -> Result<Option<TrainedModel>> {
        let path = self.path_for(ticker);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(ApiError::Io(err)),
        };

        match serde_json::from_str(&raw) {
            Ok(model) => Ok(Some(model)),
            Err(err) => {
                error!(%ticker, path = %path.display(), %err, "stored model is corrupt");
                Err(ApiError::CorruptModel {
                    ticker: ticker.to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }

    // == Save ==
    /// Persists the artifact for `ticker`, replacing any previous one.
    ///
    /// The model is serialized in full before anything touches the
    /// filesystem, then written to a temporary file and renamed into
    /// place, so a failed save never leaves a partial artifact behind.
    pub async fn save(&self, ticker: &str, model: &TrainedModel) -> Result<()> {
        let json = serde_json::to_string(model)
            .map_err(|err| ApiError::Internal(format!("model serialization failed: {err}")))?;

        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(ticker);
        let tmp = tmp_path(&path);
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::Trainer;
    use crate::market::{PricePoint, TimeSeries};
    use chrono::{Duration, NaiveDate};
    use tempfile::tempdir;

    fn trained_model() -> TrainedModel {
        let start: NaiveDate = "2020-06-01".parse().unwrap();
        let points = (0..120)
            .map(|i| PricePoint {
                date: start + Duration::days(i),
                close: 30.0 + i as f64 * 0.1,
            })
            .collect();
        let series = TimeSeries::new(points).unwrap();
        Trainer::default().train(&series).unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let dir = tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        assert!(store.load("ABSENT").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let model = trained_model();

        store.save("ACME", &model).await.unwrap();
        let loaded = store.load("ACME").await.unwrap().unwrap();

        assert_eq!(model, loaded);
        assert!(store.path_for("ACME").exists());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_artifact() {
        let dir = tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let model = trained_model();

        store.save("ACME", &model).await.unwrap();
        store.save("ACME", &model).await.unwrap();

        // One artifact per ticker, no versioned copies or leftover temp files.
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("ACME.json")]);
    }

    #[tokio::test]
    async fn test_load_corrupt_artifact_fails() {
        let dir = tempdir().unwrap();
        let store = ModelStore::new(dir.path());

        std::fs::write(store.path_for("ACME"), "not a model").unwrap();

        let result = store.load("ACME").await;
        assert!(matches!(
            result,
            Err(ApiError::CorruptModel { ticker, .. }) if ticker == "ACME"
        ));
    }

    #[tokio::test]
    async fn test_save_creates_models_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("models");
        let store = ModelStore::new(&nested);

        store.save("ACME", &trained_model()).await.unwrap();
        assert!(nested.join("ACME.json").exists());
    }
}
