//! Trailing-window statistics.
//!
//! Two window flavours are provided: time-based windows over day offsets,
//! where gaps in the record shrink the window's population but never its
//! span, and count-based windows over the last `n` observations.

/// Mean and sample standard deviation of one count-based window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    /// Window mean.
    pub mean: f64,
    /// Sample standard deviation (N-1), `None` for single-element windows.
    pub sd: Option<f64>,
    /// Number of observations in the window.
    pub count: usize,
}

/// Trailing time-window mean.
///
/// `days` holds strictly increasing day offsets (e.g. days since the first
/// observation) aligned with `values`. For each position `i` the result is
/// the mean of every value whose day falls in `(days[i] - window_days,
/// days[i]]`. The current observation is always inside its own window.
///
/// # Panics
///
/// Panics if `days` and `values` differ in length.
pub fn rolling_time_mean(days: &[i64], values: &[f64], window_days: i64) -> Vec<f64> {
    assert_eq!(
        days.len(),
        values.len(),
        "rolling_time_mean: days and values must have equal length"
    );
    let mut out = Vec::with_capacity(values.len());
    let mut start = 0usize;
    for (i, &day) in days.iter().enumerate() {
        while days[start] <= day - window_days {
            start += 1;
        }
        let window = &values[start..=i];
        out.push(window.iter().sum::<f64>() / window.len() as f64);
    }
    out
}

/// Trailing count-window mean and standard deviation.
///
/// The window at position `i` covers `values[i + 1 - window ..= i]` (clipped
/// at the series start). Positions whose window holds fewer than
/// `min_periods` values yield `None`.
///
/// Each window is evaluated with a two-pass mean/variance so that long
/// windows over large, nearly constant values do not lose precision.
pub fn rolling_count_stats(
    values: &[f64],
    window: usize,
    min_periods: usize,
) -> Vec<Option<WindowStats>> {
    let window = window.max(1);
    let min_periods = min_periods.max(1);
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            if slice.len() < min_periods {
                return None;
            }
            Some(WindowStats {
                mean: crate::mean(slice),
                sd: crate::sample_sd(slice),
                count: slice.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn time_mean_contiguous() {
        let days: Vec<i64> = (0..5).collect();
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = rolling_time_mean(&days, &values, 3);
        assert_eq!(out, vec![1.0, 1.5, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn time_mean_spans_days_not_rows() {
        // Gap between day 1 and day 10.
        let days = [0, 1, 10, 11];
        let values = [1.0, 3.0, 10.0, 20.0];
        let out = rolling_time_mean(&days, &values, 3);
        assert_eq!(out, vec![1.0, 2.0, 10.0, 15.0]);
    }

    #[test]
    fn time_mean_window_is_half_open() {
        // Window of 2 days at day 2 covers (0, 2] so day 0 is excluded.
        let days = [0, 1, 2];
        let values = [100.0, 2.0, 4.0];
        let out = rolling_time_mean(&days, &values, 2);
        assert_eq!(out[2], 3.0);
    }

    #[test]
    fn count_stats_min_periods() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        let out = rolling_count_stats(&values, 4, 3);
        assert!(out[0].is_none());
        assert!(out[1].is_none());
        let s2 = out[2].unwrap();
        assert_eq!(s2.count, 3);
        assert_relative_eq!(s2.mean, 1.0);
        let s9 = out[9].unwrap();
        assert_eq!(s9.count, 4);
        assert_relative_eq!(s9.mean, 7.5);
        assert_relative_eq!(s9.sd.unwrap(), (5.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn count_stats_constant_large_values_have_zero_sd() {
        let values = vec![412.37; 5000];
        let out = rolling_count_stats(&values, 3650, 1000);
        let last = out[4999].unwrap();
        assert_eq!(last.count, 3650);
        assert!(last.sd.unwrap() < 1e-9);
    }

    #[test]
    fn count_stats_single_value_window_has_no_sd() {
        let out = rolling_count_stats(&[1.0, 2.0], 5, 1);
        assert!(out[0].unwrap().sd.is_none());
        assert!(out[1].unwrap().sd.is_some());
    }
}
