//! Full anomaly pass: decomposition, both signals and annotation.

use keeling_calendar::CalendarDate;
use tracing::{debug, info, info_span};

use crate::annotate::{Annotation, annotate};
use crate::config::AnomalyConfig;
use crate::decompose::{Decomposition, decompose};
use crate::error::AnomalyError;
use crate::signal::{Signal, rolling_signal, yearly_signal};

/// Every anomaly column, aligned with the input series.
#[derive(Debug, Clone)]
pub struct AnomalyFrame {
    pub decomposition: Decomposition,
    /// Signal A, measured against each calendar year.
    pub yearly: Signal,
    /// Signal B, measured against the trailing count window.
    pub rolling: Signal,
    /// Explanation per row, driven by the rolling signal.
    pub annotations: Vec<Annotation>,
}

impl AnomalyFrame {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Returns `true` when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Indices of rows flagged by the rolling signal.
    pub fn rolling_anomaly_indices(&self) -> Vec<usize> {
        self.rolling
            .anomalous
            .iter()
            .enumerate()
            .filter_map(|(i, &a)| a.then_some(i))
            .collect()
    }
}

/// Runs the anomaly pass over an ordered daily series.
///
/// Steps run in fixed order: detrend by yearly mean, seasonal profile by day
/// of year, deseasonalise, then the yearly and rolling z-score signals on the
/// deseasoned values. Rows flagged by the rolling signal are annotated
/// against the event table.
///
/// # Errors
///
/// Returns [`AnomalyError`] if the configuration is invalid or the input is
/// empty, misaligned or non-finite.
pub fn detect_anomalies(
    dates: &[CalendarDate],
    values: &[f64],
    config: &AnomalyConfig,
) -> Result<AnomalyFrame, AnomalyError> {
    let _span = info_span!("detect_anomalies", n = values.len()).entered();

    config.validate()?;
    if dates.len() != values.len() {
        return Err(AnomalyError::LengthMismatch {
            dates_len: dates.len(),
            values_len: values.len(),
        });
    }
    if values.is_empty() {
        return Err(AnomalyError::EmptyData);
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(AnomalyError::NonFiniteData);
    }

    let decomposition = decompose(dates, values);
    debug!("decomposed series");

    let yearly = yearly_signal(dates, &decomposition.deseasoned, config);
    let rolling = rolling_signal(&decomposition.deseasoned, config);

    let annotations: Vec<Annotation> = dates
        .iter()
        .zip(&rolling.anomalous)
        .map(|(&d, &flagged)| annotate(d, flagged))
        .collect();

    info!(
        yearly = yearly.count(),
        rolling = rolling.count(),
        known = annotations.iter().filter(|a| a.is_known_event).count(),
        "anomalies flagged"
    );

    Ok(AnomalyFrame {
        decomposition,
        yearly,
        rolling,
        annotations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_input() {
        let d = [CalendarDate::new(2020, 1, 1).unwrap()];
        let c = AnomalyConfig::new();
        assert_eq!(
            detect_anomalies(&[], &[], &c).unwrap_err(),
            AnomalyError::EmptyData
        );
        assert!(matches!(
            detect_anomalies(&d, &[1.0, 2.0], &c).unwrap_err(),
            AnomalyError::LengthMismatch { .. }
        ));
        assert_eq!(
            detect_anomalies(&d, &[f64::NAN], &c).unwrap_err(),
            AnomalyError::NonFiniteData
        );
    }

    #[test]
    fn short_series_has_no_rolling_flags() {
        let start = CalendarDate::new(2020, 1, 1).unwrap();
        let dates = keeling_calendar::daily_sequence(start, 200).unwrap();
        let mut values = vec![410.0; 200];
        values[150] = 500.0;
        let frame = detect_anomalies(&dates, &values, &AnomalyConfig::new()).unwrap();
        assert_eq!(frame.len(), 200);
        assert!(frame.rolling.mean.iter().all(Option::is_none));
        assert!(frame.rolling_anomaly_indices().is_empty());
        assert!(frame.annotations.iter().all(|a| a.explanation.is_empty()));
    }
}
