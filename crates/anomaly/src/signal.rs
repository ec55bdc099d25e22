//! Yearly and rolling z-score anomaly signals.

use std::collections::BTreeMap;

use keeling_calendar::CalendarDate;
use keeling_stats::{mean, rolling_count_stats, sample_sd, z_score};

use crate::config::AnomalyConfig;

/// Returns `true` when `z` is defined and `|z|` strictly exceeds `threshold`.
///
/// An undefined z-score is never anomalous.
pub fn is_anomalous(z: Option<f64>, threshold: f64) -> bool {
    z.is_some_and(|z| z.abs() > threshold)
}

/// One z-score signal: the baseline it was measured against and the result.
#[derive(Debug, Clone, Default)]
pub struct Signal {
    /// Baseline mean per row, `None` where the baseline is undefined.
    pub mean: Vec<Option<f64>>,
    /// Baseline sample standard deviation per row.
    pub std: Vec<Option<f64>>,
    pub z: Vec<Option<f64>>,
    pub anomalous: Vec<bool>,
}

impl Signal {
    fn push(&mut self, value: f64, mean: Option<f64>, std: Option<f64>, config: &AnomalyConfig) {
        let z = match (mean, std) {
            (Some(m), Some(s)) => z_score(value, m, s, config.min_std()),
            _ => None,
        };
        self.mean.push(mean);
        self.std.push(std);
        self.z.push(z);
        self.anomalous.push(is_anomalous(z, config.threshold()));
    }

    /// Number of flagged rows.
    pub fn count(&self) -> usize {
        self.anomalous.iter().filter(|&&a| a).count()
    }
}

/// Signal A: z-score of `deseasoned` against its own calendar year's mean
/// and sample standard deviation.
pub fn yearly_signal(
    dates: &[CalendarDate],
    deseasoned: &[f64],
    config: &AnomalyConfig,
) -> Signal {
    let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for (d, &v) in dates.iter().zip(deseasoned) {
        groups.entry(d.year()).or_default().push(v);
    }
    let baselines: BTreeMap<i32, (f64, Option<f64>)> = groups
        .into_iter()
        .map(|(year, vs)| (year, (mean(&vs), sample_sd(&vs))))
        .collect();

    let mut signal = Signal::default();
    for (d, &v) in dates.iter().zip(deseasoned) {
        let (m, s) = baselines.get(&d.year()).copied().unwrap_or((f64::NAN, None));
        signal.push(v, Some(m), s, config);
    }
    signal
}

/// Signal B: z-score of `deseasoned` against a trailing count-based window.
///
/// Rows whose window holds fewer than `min_periods` observations get no
/// baseline and are never flagged.
pub fn rolling_signal(deseasoned: &[f64], config: &AnomalyConfig) -> Signal {
    let windows = rolling_count_stats(deseasoned, config.rolling_window(), config.min_periods());

    let mut signal = Signal::default();
    for (&v, w) in deseasoned.iter().zip(windows) {
        match w {
            Some(w) => signal.push(v, Some(w.mean), w.sd, config),
            None => signal.push(v, None, None, config),
        }
    }
    signal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        assert!(!is_anomalous(Some(2.0), 2.0));
        assert!(!is_anomalous(Some(-2.0), 2.0));
        assert!(is_anomalous(Some(2.0001), 2.0));
        assert!(is_anomalous(Some(-2.0001), 2.0));
        assert!(!is_anomalous(None, 2.0));
    }

    #[test]
    fn flags_are_monotone_in_abs_z() {
        let zs: Vec<f64> = (0..400).map(|i| f64::from(i) * 0.01).collect();
        let flags: Vec<bool> = zs.iter().map(|&z| is_anomalous(Some(z), 2.0)).collect();
        for w in flags.windows(2) {
            assert!(!w[0] || w[1], "flag dropped while |z| increased");
        }
    }

    #[test]
    fn single_observation_year_has_no_z() {
        let dates = [
            CalendarDate::new(2020, 1, 1).unwrap(),
            CalendarDate::new(2021, 1, 1).unwrap(),
            CalendarDate::new(2021, 1, 2).unwrap(),
        ];
        let s = yearly_signal(&dates, &[400.0, 401.0, 403.0], &AnomalyConfig::new());
        assert_eq!(s.std[0], None);
        assert_eq!(s.z[0], None);
        assert!(!s.anomalous[0]);
        assert_eq!(s.mean[1], Some(402.0));
        assert!(s.z[1].is_some());
    }

    #[test]
    fn constant_year_has_no_z() {
        let dates: Vec<CalendarDate> = (1..=10)
            .map(|d| CalendarDate::new(2020, 1, d).unwrap())
            .collect();
        let s = yearly_signal(&dates, &[412.37; 10], &AnomalyConfig::new());
        assert!(s.z.iter().all(Option::is_none));
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn rolling_requires_min_periods() {
        let config = AnomalyConfig::new().with_rolling_window(10).with_min_periods(5);
        let mut values = vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        values.push(50.0);
        let s = rolling_signal(&values, &config);

        assert!(s.mean[..4].iter().all(Option::is_none));
        assert!(s.z[..4].iter().all(Option::is_none));
        assert!(s.mean[4].is_some());
        assert!(s.anomalous[9]);
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn rolling_window_is_trailing() {
        let config = AnomalyConfig::new().with_rolling_window(3).with_min_periods(3);
        let s = rolling_signal(&[100.0, 1.0, 2.0, 3.0], &config);
        assert_eq!(s.mean[3], Some(2.0));
    }
}
