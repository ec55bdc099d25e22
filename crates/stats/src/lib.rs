//! Statistical helper functions for the Keeling pipeline.
//!
//! Sample statistics use the N-1 denominator throughout, matching the
//! grouped and rolling standard deviations the output tables are compared
//! against.

mod rolling;

pub use rolling::{WindowStats, rolling_count_stats, rolling_time_mean};

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Sample standard deviation, or `None` when fewer than 2 elements make it
/// undefined.
pub fn sample_sd(data: &[f64]) -> Option<f64> {
    if data.len() < 2 { None } else { Some(sd(data)) }
}

/// Rounds to `decimals` places, resolving ties to the even neighbour.
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round_ties_even() / factor
}

/// Percentage change from `previous` to `current`: `(current / previous - 1) * 100`.
///
/// Returns `None` when `previous` is zero or the result is not finite.
pub fn pct_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    let pct = (current / previous - 1.0) * 100.0;
    pct.is_finite().then_some(pct)
}

/// Standardised deviation `(value - mean) / sd`.
///
/// Returns `None` when `sd` is not finite or does not exceed `min_sd`.
pub fn z_score(value: f64, mean: f64, sd: f64, min_sd: f64) -> Option<f64> {
    if !sd.is_finite() || sd <= min_sd {
        return None;
    }
    let z = (value - mean) / sd;
    z.is_finite().then_some(z)
}

/// Linear-interpolation quantile (R type 7, numpy default).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
