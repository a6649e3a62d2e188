//! Forecast Model Module
//!
//! A seasonal trend model for daily closing prices: linear trend plus
//! Fourier seasonal components, fitted by least squares. Daily and weekly
//! seasonality are deliberately omitted; yearly seasonality is combined
//! with a custom 30.5-day component that approximates monthly cycles
//! without depending on calendar-month boundaries.

use chrono::NaiveDate;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::market::TimeSeries;

// == Seasonality ==
/// One Fourier seasonal component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub name: String,
    /// Cycle length in days
    pub period_days: f64,
    /// Number of sine/cosine harmonic pairs
    pub fourier_order: usize,
}

impl Seasonality {
    pub fn new(name: impl Into<String>, period_days: f64, fourier_order: usize) -> Self {
        Self {
            name: name.into(),
            period_days,
            fourier_order,
        }
    }
}

// == Trainer ==
/// Fits a [`TrainedModel`] to a time series with a fixed seasonality
/// configuration.
#[derive(Debug, Clone)]
pub struct Trainer {
    seasonalities: Vec<Seasonality>,
}

impl Default for Trainer {
    /// Yearly seasonality on, plus a custom monthly component with a
    /// 30.5-day period and harmonic order 5. No daily or weekly terms.
    fn default() -> Self {
        Self {
            seasonalities: vec![
                Seasonality::new("yearly", 365.25, 10),
                Seasonality::new("monthly", 30.5, 5),
            ],
        }
    }
}

impl Trainer {
    pub fn new(seasonalities: Vec<Seasonality>) -> Self {
        Self { seasonalities }
    }

    /// Number of fitted coefficients: intercept, slope, and a sine/cosine
    /// pair per harmonic of each seasonal component.
    fn feature_len(&self) -> usize {
        2 + self
            .seasonalities
            .iter()
            .map(|s| 2 * s.fourier_order)
            .sum::<usize>()
    }

    // == Train ==
    /// Fits the model by ordinary least squares over the design matrix
    /// [1, t, sin/cos harmonics]. Fitting is CPU-bound; callers dispatch
    /// it off the request path via `spawn_blocking`.
    ///
    /// Fails with `TrainingFailed` if the series is shorter than the
    /// number of coefficients or the least-squares solve does not converge.
    /// Never produces a partial model.
    pub fn train(&self, series: &TimeSeries) -> Result<TrainedModel> {
        let n = series.len();
        let k = self.feature_len();
        if n < k {
            return Err(ApiError::TrainingFailed(format!(
                "series has {n} observations but the model needs at least {k}"
            )));
        }

        let origin = series.first_date();
        let mut design = DMatrix::zeros(n, k);
        let mut observed = DVector::zeros(n);

        for (i, point) in series.points().iter().enumerate() {
            let t = (point.date - origin).num_days() as f64;
            for (j, feature) in features(&self.seasonalities, t).into_iter().enumerate() {
                design[(i, j)] = feature;
            }
            observed[i] = point.close;
        }

        let svd = design.svd(true, true);
        let solution = svd
            .solve(&observed, 1e-10)
            .map_err(|err| ApiError::TrainingFailed(err.to_string()))?;

        let coefficients: Vec<f64> = solution.iter().copied().collect();
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ApiError::TrainingFailed(
                "least-squares solution is not finite".to_string(),
            ));
        }

        Ok(TrainedModel {
            seasonalities: self.seasonalities.clone(),
            coefficients,
            origin,
            history: series.clone(),
        })
    }
}

// == Trained Model ==
/// A fitted forecasting model.
///
/// Carries its training history so that predictions can be generated from
/// a loaded artifact without refetching data. Serialized wholesale as the
/// on-disk artifact format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    seasonalities: Vec<Seasonality>,
    coefficients: Vec<f64>,
    /// Time axis reference: t = 0 at the first training observation
    origin: NaiveDate,
    history: TimeSeries,
}

impl TrainedModel {
    /// Point forecast for an arbitrary date.
    pub fn predict(&self, date: NaiveDate) -> f64 {
        let t = (date - self.origin).num_days() as f64;
        features(&self.seasonalities, t)
            .iter()
            .zip(&self.coefficients)
            .map(|(feature, coeff)| feature * coeff)
            .sum()
    }

    /// The series the model was fitted on.
    pub fn history(&self) -> &TimeSeries {
        &self.history
    }

    /// Last date covered by the training history.
    pub fn last_date(&self) -> NaiveDate {
        self.history.last_date()
    }
}

/// Design-matrix row for day offset `t`.
fn features(seasonalities: &[Seasonality], t: f64) -> Vec<f64> {
    let mut row = vec![1.0, t];
    for seasonality in seasonalities {
        for harmonic in 1..=seasonality.fourier_order {
            let angle = 2.0 * std::f64::consts::PI * harmonic as f64 * t / seasonality.period_days;
            row.push(angle.sin());
            row.push(angle.cos());
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::PricePoint;
    use chrono::Duration;

    pub(crate) fn synthetic_series(days: usize, price_at: impl Fn(usize) -> f64) -> TimeSeries {
        let start: NaiveDate = "2015-01-02".parse().unwrap();
        let points = (0..days)
            .map(|i| PricePoint {
                date: start + Duration::days(i as i64),
                close: price_at(i),
            })
            .collect();
        TimeSeries::new(points).unwrap()
    }

    #[test]
    fn test_train_rejects_short_series() {
        let series = synthetic_series(10, |i| 100.0 + i as f64);
        let result = Trainer::default().train(&series);
        assert!(matches!(result, Err(ApiError::TrainingFailed(_))));
    }

    #[test]
    fn test_train_recovers_linear_trend() {
        let series = synthetic_series(400, |i| 50.0 + 0.25 * i as f64);
        let model = Trainer::default().train(&series).unwrap();

        // A purely linear series should be predicted near-exactly, even a
        // few days past the training window.
        let target = series.last_date() + Duration::days(5);
        let expected = 50.0 + 0.25 * 404.0;
        assert!((model.predict(target) - expected).abs() < 1.0);
    }

    #[test]
    fn test_train_fits_seasonal_signal() {
        let series = synthetic_series(730, |i| {
            let t = i as f64;
            200.0 + 0.1 * t + 5.0 * (2.0 * std::f64::consts::PI * t / 30.5).sin()
        });
        let model = Trainer::default().train(&series).unwrap();

        // In-sample fit should track the generating process closely.
        for point in series.points().iter().step_by(50) {
            assert!((model.predict(point.date) - point.close).abs() < 1.0);
        }
    }

    #[test]
    fn test_model_serialization_round_trip() {
        let series = synthetic_series(200, |i| 80.0 + (i as f64) * 0.5);
        let model = Trainer::default().train(&series).unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let restored: TrainedModel = serde_json::from_str(&json).unwrap();

        assert_eq!(model, restored);
        let probe = series.last_date() + Duration::days(30);
        assert_eq!(model.predict(probe), restored.predict(probe));
    }

    #[test]
    fn test_default_trainer_configuration() {
        let trainer = Trainer::default();
        assert_eq!(trainer.seasonalities.len(), 2);
        assert_eq!(trainer.seasonalities[1].period_days, 30.5);
        assert_eq!(trainer.seasonalities[1].fourier_order, 5);
        // intercept + slope + 2*10 yearly + 2*5 monthly
        assert_eq!(trainer.feature_len(), 32);
    }
}
