//! Forecast window selection and the fit/predict entry point.

use keeling_calendar::{CalendarDate, daily_sequence};
use tracing::{info, info_span};

use crate::config::ForecastConfig;
use crate::error::ForecastError;
use crate::model::{ForecastPoint, TrendSeasonalModel};

/// Dates to predict at: observed dates strictly after `history_years`
/// calendar years before the last one, followed by every calendar day of the
/// horizon.
///
/// `dates` must be sorted. An empty history yields no targets.
///
/// # Errors
///
/// Returns [`ForecastError::Calendar`] if the window leaves the supported
/// date range.
pub fn forecast_targets(
    dates: &[CalendarDate],
    config: &ForecastConfig,
) -> Result<Vec<CalendarDate>, ForecastError> {
    let Some(&last) = dates.last() else {
        return Ok(Vec::new());
    };
    let cutoff = last.years_before(config.history_years())?;
    let start = dates.partition_point(|&d| d <= cutoff);

    let mut targets = dates[start..].to_vec();
    if config.horizon_days() > 0 {
        targets.extend(daily_sequence(last.next()?, config.horizon_days())?);
    }
    Ok(targets)
}

/// Fits `model` to the full history and predicts over the configured window.
///
/// # Errors
///
/// Propagates configuration, window and model errors.
pub fn forecast<M: TrendSeasonalModel + ?Sized>(
    model: &M,
    dates: &[CalendarDate],
    values: &[f64],
    config: &ForecastConfig,
) -> Result<Vec<ForecastPoint>, ForecastError> {
    let _span = info_span!("forecast", n = dates.len()).entered();
    config.validate()?;

    let targets = forecast_targets(dates, config)?;
    let points = model.fit_predict(dates, values, &targets)?;
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        info!(
            rows = points.len(),
            first = %first.date,
            last = %last.date,
            "forecast complete"
        );
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::new(y, m, day).unwrap()
    }

    #[test]
    fn window_excludes_cutoff_date() {
        let dates = vec![d(1999, 12, 31), d(2000, 1, 1), d(2000, 1, 2), d(2025, 1, 1)];
        let cfg = ForecastConfig::new().with_horizon_days(3);
        let t = forecast_targets(&dates, &cfg).unwrap();
        assert_eq!(
            t,
            vec![
                d(2000, 1, 2),
                d(2025, 1, 1),
                d(2025, 1, 2),
                d(2025, 1, 3),
                d(2025, 1, 4)
            ]
        );
    }

    #[test]
    fn zero_horizon_keeps_history_only() {
        let dates = vec![d(2020, 1, 1), d(2020, 1, 5)];
        let cfg = ForecastConfig::new().with_horizon_days(0);
        assert_eq!(forecast_targets(&dates, &cfg).unwrap(), dates);
    }

    #[test]
    fn empty_history_has_no_targets() {
        assert!(forecast_targets(&[], &ForecastConfig::new()).unwrap().is_empty());
    }
}
