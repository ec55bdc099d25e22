use keeling_calendar::{CalendarDate, daily_sequence};
use keeling_forecast::{
    ForecastConfig, ForecastError, ModelConfig, PiecewiseTrendModel, forecast,
};

/// Four years of a rising, seasonal series with gentle wiggle.
fn history(start: CalendarDate, n: usize) -> (Vec<CalendarDate>, Vec<f64>) {
    let dates = daily_sequence(start, n).unwrap();
    let values = (0..n)
        .map(|i| {
            let x = i as f64;
            370.0 + 0.006 * x
                + 3.0 * (2.0 * std::f64::consts::PI * x / 365.25).sin()
                + 0.2 * (1.3 * x).sin()
        })
        .collect();
    (dates, values)
}

fn config(seed: u64) -> ForecastConfig {
    ForecastConfig::new()
        .with_horizon_days(400)
        .with_history_years(2)
        .with_model(ModelConfig::new().with_seed(seed).with_uncertainty_samples(60))
}

#[test]
fn rows_stay_inside_window() {
    let (dates, values) = history(CalendarDate::new(2010, 1, 1).unwrap(), 365 * 4);
    let cfg = config(1);
    let model = PiecewiseTrendModel::new(cfg.model().clone());
    let rows = forecast(&model, &dates, &values, &cfg).unwrap();

    let last = *dates.last().unwrap();
    let lower = last.years_before(2).unwrap();
    let upper = last.add_days(400).unwrap();
    assert!(rows.iter().all(|r| r.date > lower && r.date <= upper));
    assert_eq!(rows.first().unwrap().date, lower.next().unwrap());
    assert_eq!(rows.last().unwrap().date, upper);
    assert!(rows.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn default_window_spans_25_years_back_and_5475_days_ahead() {
    let (dates, values) = history(CalendarDate::new(1990, 3, 1).unwrap(), 365 * 30);
    let cfg = ForecastConfig::new();
    assert_eq!(cfg.history_years(), 25);
    assert_eq!(cfg.horizon_days(), 5475);
    let model = PiecewiseTrendModel::new(cfg.model().clone());
    let rows = forecast(&model, &dates, &values, &cfg).unwrap();

    let last = *dates.last().unwrap();
    let lower = last.years_before(25).unwrap();
    let upper = last.add_days(5475).unwrap();
    assert_eq!(rows.first().unwrap().date, lower.next().unwrap());
    assert_eq!(rows.last().unwrap().date, upper);
    let history_rows = rows.iter().filter(|r| r.date <= last).count();
    assert_eq!(history_rows, last.days_since(lower) as usize);
    assert_eq!(rows.len(), history_rows + 5475);
}

#[test]
fn intervals_bracket_predictions() {
    let (dates, values) = history(CalendarDate::new(2010, 1, 1).unwrap(), 365 * 4);
    let cfg = config(2);
    let model = PiecewiseTrendModel::new(cfg.model().clone());
    for r in forecast(&model, &dates, &values, &cfg).unwrap() {
        assert!(r.yhat_lower <= r.yhat && r.yhat <= r.yhat_upper, "{r:?}");
        assert!(r.trend_lower <= r.trend && r.trend <= r.trend_upper, "{r:?}");
        assert!(r.yhat.is_finite() && r.yearly.is_finite());
    }
}

#[test]
fn seeded_runs_repeat() {
    let (dates, values) = history(CalendarDate::new(2010, 1, 1).unwrap(), 365 * 3);
    let cfg = config(99);
    let model = PiecewiseTrendModel::new(cfg.model().clone());
    let a = forecast(&model, &dates, &values, &cfg).unwrap();
    let b = forecast(&model, &dates, &values, &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn forecast_continues_the_rise() {
    let (dates, values) = history(CalendarDate::new(2010, 1, 1).unwrap(), 365 * 4);
    let cfg = config(3);
    let model = PiecewiseTrendModel::new(cfg.model().clone());
    let rows = forecast(&model, &dates, &values, &cfg).unwrap();
    let last_hist = rows.iter().rfind(|r| r.date == *dates.last().unwrap()).unwrap();
    let end = rows.last().unwrap();
    // 400 days at 0.006 ppm/day.
    let rise = end.trend - last_hist.trend;
    assert!((rise - 2.4).abs() < 0.5, "rise {rise}");
}

#[test]
fn single_observation_is_insufficient() {
    let d = CalendarDate::new(2020, 6, 1).unwrap();
    let cfg = ForecastConfig::new();
    let model = PiecewiseTrendModel::new(cfg.model().clone());
    let err = forecast(&model, &[d], &[410.0], &cfg).unwrap_err();
    assert!(matches!(err, ForecastError::InsufficientData { n: 1, min: 2 }));
}
