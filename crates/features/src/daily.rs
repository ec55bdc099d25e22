//! Daily feature table: calendar fields, rolling means and differences.

use keeling_calendar::CalendarDate;
use keeling_stats::{rolling_time_mean, round_to};
use tracing::debug;

use crate::calendar::{CalendarFeatures, calendar_features};
use crate::config::FeatureConfig;
use crate::diff::differences;
use crate::error::{FeatureError, check_aligned};

/// Column-oriented daily features, aligned with the input series.
#[derive(Debug, Clone)]
pub struct DailyFeatures {
    pub calendar: Vec<CalendarFeatures>,
    /// Short-window trailing time mean, rounded.
    pub avg_short: Vec<f64>,
    /// Long-window trailing time mean, rounded.
    pub avg_long: Vec<f64>,
    pub daily_diff: Vec<Option<f64>>,
    pub pct_change: Vec<Option<f64>>,
}

impl DailyFeatures {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.calendar.len()
    }

    /// Returns `true` when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.calendar.is_empty()
    }
}

/// Derives the daily features of an ordered series.
///
/// Rolling means cover every observation dated in `(date − N days, date]`,
/// so gaps shrink the window's row count rather than stretching its span.
///
/// # Errors
///
/// Returns [`FeatureError`] if the configuration is invalid or the slices are
/// empty or misaligned.
pub fn derive_daily(
    dates: &[CalendarDate],
    values: &[f64],
    config: &FeatureConfig,
) -> Result<DailyFeatures, FeatureError> {
    config.validate()?;
    check_aligned(dates, values)?;

    let days: Vec<i64> = dates.iter().map(|d| i64::from(d.days_from_ce())).collect();
    let decimals = i32::from(config.round_decimals());
    let rounded_mean = |window: u32| -> Vec<f64> {
        rolling_time_mean(&days, values, i64::from(window))
            .into_iter()
            .map(|m| round_to(m, decimals))
            .collect()
    };

    let avg_short = rounded_mean(config.short_window_days());
    let avg_long = rounded_mean(config.long_window_days());
    let (daily_diff, pct_change) = differences(values);

    debug!(rows = dates.len(), "derived daily features");

    Ok(DailyFeatures {
        calendar: calendar_features(dates),
        avg_short,
        avg_long,
        daily_diff,
        pct_change,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn rolling_window_spans_calendar_days_across_gap() {
        // Daily from Jan 1 to Jan 20, a 10-day gap, then Jan 31 to Feb 9.
        let mut dates = Vec::new();
        let mut values = Vec::new();
        for d in 1..=20 {
            dates.push(date(2021, 1, d));
            values.push(f64::from(d));
        }
        for d in 31..=40 {
            let dt = if d <= 31 { date(2021, 1, d) } else { date(2021, 2, d - 31) };
            dates.push(dt);
            values.push(f64::from(d));
        }

        let f = derive_daily(&dates, &values, &FeatureConfig::new()).unwrap();

        // Feb 9 window is (Jan 10, Feb 9]: Jan 11..=20 and Jan 31..=Feb 9.
        let last = f.len() - 1;
        let expected: Vec<f64> = (11..=20).chain(31..=40).map(f64::from).collect();
        let mean = expected.iter().sum::<f64>() / expected.len() as f64;
        assert_relative_eq!(f.avg_short[last], round_to(mean, 2));

        // Jan 31 window is (Jan 1, Jan 31]: Jan 2..=20 plus Jan 31.
        let jan31 = 20;
        let expected: Vec<f64> = (2..=20).chain(31..=31).map(f64::from).collect();
        let mean = expected.iter().sum::<f64>() / expected.len() as f64;
        assert_relative_eq!(f.avg_short[jan31], round_to(mean, 2));

        // Diff is against the previous present row, not the previous day.
        assert_eq!(f.daily_diff[jan31], Some(11.0));
    }

    #[test]
    fn first_row_window_is_itself() {
        let dates = [date(2020, 1, 1), date(2020, 1, 2)];
        let f = derive_daily(&dates, &[410.123, 410.5], &FeatureConfig::new()).unwrap();
        assert_eq!(f.avg_short[0], 410.12);
        assert_eq!(f.avg_long[0], 410.12);
        assert_eq!(f.daily_diff[0], None);
        assert_eq!(f.pct_change[0], None);
    }

    #[test]
    fn rounding_is_half_to_even() {
        // 0.125 is exact in binary, so ties-to-even gives 0.12.
        let dates = [date(2020, 1, 1)];
        let f = derive_daily(&dates, &[0.125], &FeatureConfig::new()).unwrap();
        assert_eq!(f.avg_short[0], 0.12);
    }

    #[test]
    fn misaligned_input_rejected() {
        let err = derive_daily(&[date(2020, 1, 1)], &[], &FeatureConfig::new()).unwrap_err();
        assert!(matches!(err, FeatureError::LengthMismatch { .. }));
    }
}
