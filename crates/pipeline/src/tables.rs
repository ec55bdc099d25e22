//! Assembly of the six output tables from stage results.
//!
//! Column names and order are part of the output contract consumed by the
//! visualisation layer.

use keeling_anomaly::AnomalyFrame;
use keeling_calendar::CalendarDate;
use keeling_features::{
    CalendarFeatures, DailyFeatures, FeatureConfig, MonthlyAggregate, YearlyAggregate,
};
use keeling_forecast::ForecastPoint;
use keeling_io::Table;

pub const DAILY_FEATURES: &str = "co2_daily_features";
pub const MONTHLY: &str = "co2_monthly";
pub const YEARLY: &str = "co2_yearly";
pub const ANOMALIES: &str = "co2_anomalies";
pub const ANOMALY_TOOLTIPS: &str = "co2_anomaly_tooltips";
pub const FORECAST: &str = "co2_forecast";

fn pick<T: Clone>(values: &[T], rows: &[usize]) -> Vec<T> {
    rows.iter().map(|&i| values[i].clone()).collect()
}

fn calendar_columns(table: Table, calendar: &[CalendarFeatures]) -> Table {
    table
        .with_ints("year", calendar.iter().map(|c| c.year).collect())
        .with_ints("month", calendar.iter().map(|c| i32::from(c.month)).collect())
        .with_ints("day", calendar.iter().map(|c| i32::from(c.day)).collect())
        .with_ints(
            "day_of_year",
            calendar.iter().map(|c| i32::from(c.day_of_year)).collect(),
        )
}

fn seasons(calendar: &[CalendarFeatures]) -> Vec<String> {
    calendar.iter().map(|c| c.season.to_string()).collect()
}

/// One row per observation: calendar fields, rolling means, differences,
/// cyclical encodings and the per-year LOESS fit.
pub fn daily_features_table(
    dates: &[CalendarDate],
    decimal_years: &[f64],
    values: &[f64],
    daily: &DailyFeatures,
    loess: &[f64],
    config: &FeatureConfig,
) -> Table {
    let t = Table::new(DAILY_FEATURES).with_dates("date", dates.to_vec());
    calendar_columns(t, &daily.calendar)
        .with_values("decimal_date", decimal_years)
        .with_values("concentration", values)
        .with_values(format!("avg_{}d", config.short_window_days()), &daily.avg_short)
        .with_values(format!("avg_{}d", config.long_window_days()), &daily.avg_long)
        .with_floats("daily_diff", daily.daily_diff.clone())
        .with_floats("pct_change", daily.pct_change.clone())
        .with_floats("sin_day", daily.calendar.iter().map(|c| Some(c.sin_day)).collect())
        .with_floats("cos_day", daily.calendar.iter().map(|c| Some(c.cos_day)).collect())
        .with_text("season", seasons(&daily.calendar))
        .with_values("loess_smoothed", loess)
}

/// One row per calendar month with data, labelled by its last day.
pub fn monthly_table(months: &[MonthlyAggregate]) -> Table {
    Table::new(MONTHLY)
        .with_dates("month", months.iter().map(|m| m.month_end).collect())
        .with_floats("concentration", months.iter().map(|m| Some(m.mean)).collect())
        .with_floats("monthly_diff", months.iter().map(|m| m.diff).collect())
        .with_floats("monthly_pct_change", months.iter().map(|m| m.pct_change).collect())
}

/// One row per calendar year with the smoothed growth rate alongside.
pub fn yearly_table(years: &[YearlyAggregate], loess_pct_change: &[Option<f64>]) -> Table {
    Table::new(YEARLY)
        .with_ints("year", years.iter().map(|y| y.year).collect())
        .with_floats("concentration", years.iter().map(|y| Some(y.mean)).collect())
        .with_floats("yearly_pct_change", years.iter().map(|y| y.pct_change).collect())
        .with_floats("loess_pct_change", loess_pct_change.to_vec())
}

/// Borrowed inputs of the two anomaly tables.
pub struct AnomalySource<'a> {
    pub dates: &'a [CalendarDate],
    pub values: &'a [f64],
    pub calendar: &'a [CalendarFeatures],
    pub frame: &'a AnomalyFrame,
}

impl AnomalySource<'_> {
    /// Anomaly columns restricted to `rows`, in the given order.
    fn columns(&self, name: &str, rows: &[usize]) -> Table {
        let f = self.frame;
        let d = &f.decomposition;
        let some = |v: &[f64]| rows.iter().map(|&i| Some(v[i])).collect::<Vec<_>>();
        let calendar = pick(self.calendar, rows);

        let t = Table::new(name).with_dates("date", pick(self.dates, rows));
        calendar_columns(t, &calendar)
            .with_floats("concentration", some(self.values))
            .with_text("season", seasons(&calendar))
            .with_floats("detrended", some(&d.detrended))
            .with_floats("seasonal_component", some(&d.seasonal_component))
            .with_floats("deseasoned", some(&d.deseasoned))
            .with_floats("yearly_mean", pick(&f.yearly.mean, rows))
            .with_floats("yearly_std", pick(&f.yearly.std, rows))
            .with_floats("z_yearly", pick(&f.yearly.z, rows))
            .with_bools("anomaly_yearly", pick(&f.yearly.anomalous, rows))
            .with_floats("rolling_mean", pick(&f.rolling.mean, rows))
            .with_floats("rolling_std", pick(&f.rolling.std, rows))
            .with_floats("z_rolling", pick(&f.rolling.z, rows))
            .with_bools("anomaly_rolling", pick(&f.rolling.anomalous, rows))
    }

    /// Every observation with its decomposition and both signals.
    pub fn anomalies_table(&self) -> Table {
        let all: Vec<usize> = (0..self.dates.len()).collect();
        self.columns(ANOMALIES, &all)
    }

    /// Rows flagged by the rolling signal, with their explanations.
    pub fn tooltips_table(&self) -> Table {
        let rows = self.frame.rolling_anomaly_indices();
        let notes = pick(&self.frame.annotations, &rows);
        self.columns(ANOMALY_TOOLTIPS, &rows)
            .with_text(
                "explanation",
                notes.iter().map(|a| a.explanation.to_string()).collect(),
            )
            .with_bools("is_known_event", notes.iter().map(|a| a.is_known_event).collect())
    }
}

/// One row per forecast date.
pub fn forecast_table(points: &[ForecastPoint]) -> Table {
    let col = |f: fn(&ForecastPoint) -> f64| points.iter().map(f).collect::<Vec<_>>();
    Table::new(FORECAST)
        .with_dates("date", points.iter().map(|p| p.date).collect())
        .with_values("yhat", &col(|p| p.yhat))
        .with_values("yhat_lower", &col(|p| p.yhat_lower))
        .with_values("yhat_upper", &col(|p| p.yhat_upper))
        .with_values("trend", &col(|p| p.trend))
        .with_values("trend_lower", &col(|p| p.trend_lower))
        .with_values("trend_upper", &col(|p| p.trend_upper))
        .with_values("yearly", &col(|p| p.yearly))
}
