//! Linear-regression volume forecast.

use call_domain::{DailyVolume, ForecastPoint};
use chrono::Duration;
use statrs::statistics::Statistics;

/// Fixed lookahead window.
pub const FORECAST_HORIZON_DAYS: usize = 7;

/// Minimum distinct volume days before any forecast is produced.
pub const MIN_TREND_DAYS: usize = 7;

/// Most recent daily counts used as the regression window.
const REGRESSION_WINDOW_DAYS: usize = 14;

/// Reported confidence never drops below this floor (avoids near-zero
/// claims) nor rises above the ceiling (avoids overconfident claims).
const CONFIDENCE_FLOOR: f64 = 0.3;
const CONFIDENCE_CEILING: f64 = 0.9;

/// Ordinary least-squares fit over y-values at x = 0, 1, 2, ...
struct LineFit {
    slope: f64,
    intercept: f64,
    r_squared: f64,
}

#[allow(clippy::cast_precision_loss)]
fn fit_line(ys: &[f64]) -> LineFit {
    let n = ys.len() as f64;
    let sum_x: f64 = (0..ys.len()).map(|i| i as f64).sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = ys.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..ys.len()).map(|i| (i as f64) * (i as f64)).sum();

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    let y_mean = ys.iter().copied().mean();
    let ss_tot: f64 = ys.iter().map(|y| (y - y_mean).powi(2)).sum();
    let ss_res: f64 = ys
        .iter()
        .enumerate()
        .map(|(i, y)| (y - (slope * i as f64 + intercept)).powi(2))
        .sum();

    // A zero-variance window is a perfect fit for the flat line, not an
    // undefined one.
    let r_squared = if ss_tot == 0.0 { 1.0 } else { 1.0 - ss_res / ss_tot };

    LineFit {
        slope,
        intercept,
        r_squared,
    }
}

/// Project the next 7 days of call volume from the daily trend.
///
/// Requires at least [`MIN_TREND_DAYS`] distinct days, otherwise returns an
/// empty list rather than a degenerate forecast. Fits OLS over the most
/// recent up-to-14 daily counts; each projected count is clamped at zero
/// before rounding, and the per-day confidence is the fit's R² clamped to
/// [0.3, 0.9].
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn forecast_volume(trend: &[DailyVolume]) -> Vec<ForecastPoint> {
    if trend.len() < MIN_TREND_DAYS {
        return Vec::new();
    }

    let window = &trend[trend.len().saturating_sub(REGRESSION_WINDOW_DAYS)..];
    let counts: Vec<f64> = window.iter().map(|day| day.calls as f64).collect();
    let fit = fit_line(&counts);
    let confidence = fit.r_squared.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING);

    let last_date = window[window.len() - 1].date;
    (1..=FORECAST_HORIZON_DAYS)
        .map(|i| {
            let x = (counts.len() + i - 1) as f64;
            let predicted = (fit.slope * x + fit.intercept).max(0.0).round() as u64;
            ForecastPoint {
                date: last_date + Duration::days(i as i64),
                predicted_calls: predicted,
                confidence,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trend(counts: &[u64]) -> Vec<DailyVolume> {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        counts
            .iter()
            .enumerate()
            .map(|(i, &calls)| DailyVolume {
                date: start + Duration::days(i64::try_from(i).unwrap()),
                calls,
                avg_duration_secs: 180.0,
            })
            .collect()
    }

    #[test]
    fn fewer_than_seven_days_yields_no_forecast() {
        assert!(forecast_volume(&trend(&[5, 6, 7, 8, 9, 10])).is_empty());
        assert!(forecast_volume(&[]).is_empty());
    }

    #[test]
    fn seven_days_yield_exactly_seven_projections() {
        let forecast = forecast_volume(&trend(&[10, 12, 11, 13, 12, 14, 13]));
        assert_eq!(forecast.len(), FORECAST_HORIZON_DAYS);

        let last_observed = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        for (i, point) in forecast.iter().enumerate() {
            assert_eq!(
                point.date,
                last_observed + Duration::days(i64::try_from(i).unwrap() + 1)
            );
        }
    }

    #[test]
    fn constant_window_reports_perfect_fit_and_flat_projection() {
        let forecast = forecast_volume(&trend(&[8; 10]));
        assert_eq!(forecast.len(), 7);
        for point in &forecast {
            assert_eq!(point.predicted_calls, 8);
            // R^2 = 1 clamps down to the ceiling.
            assert_eq!(point.confidence, CONFIDENCE_CEILING);
        }
    }

    #[test]
    fn perfect_linear_growth_extends_the_line() {
        let counts: Vec<u64> = (1..=10).collect();
        let forecast = forecast_volume(&trend(&counts));
        let predicted: Vec<u64> = forecast.iter().map(|p| p.predicted_calls).collect();
        assert_eq!(predicted, vec![11, 12, 13, 14, 15, 16, 17]);
        assert!(forecast.iter().all(|p| p.confidence == CONFIDENCE_CEILING));
    }

    #[test]
    fn steep_decline_clamps_projections_at_zero() {
        let counts = [70, 60, 50, 40, 30, 20, 10];
        let forecast = forecast_volume(&trend(&counts));
        assert_eq!(forecast.last().unwrap().predicted_calls, 0);
    }

    #[test]
    fn only_the_most_recent_fourteen_days_shape_the_fit() {
        // A huge ancient spike outside the window must not affect the line.
        let mut counts = vec![10_000];
        counts.extend(std::iter::repeat(5).take(14));
        let forecast = forecast_volume(&trend(&counts));
        assert!(forecast.iter().all(|p| p.predicted_calls == 5));
    }

    #[test]
    fn noisy_window_keeps_confidence_above_the_floor() {
        let counts = [40, 2, 39, 1, 41, 3, 38, 2, 40, 1];
        let forecast = forecast_volume(&trend(&counts));
        assert!(forecast
            .iter()
            .all(|p| p.confidence >= CONFIDENCE_FLOOR && p.confidence <= CONFIDENCE_CEILING));
    }
}
