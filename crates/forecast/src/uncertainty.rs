//! Prediction intervals from simulated trend paths.
//!
//! Future trend uncertainty comes from changepoints that have not happened
//! yet: each path draws a Poisson number of new changepoints beyond the end
//! of history at the historical rate, with Laplace-distributed rate changes
//! scaled by the mean absolute fitted change. Observation noise is added on
//! top for the `yhat` interval only.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal, Poisson};
use rayon::prelude::*;
use statrs::distribution::ContinuousCDF;

use keeling_stats::quantile_type7;

use crate::design::hinge;
use crate::error::ForecastError;

/// Lower and upper bounds for `yhat` and `trend`, in model units.
#[derive(Debug, Clone, Default)]
pub(crate) struct Bounds {
    pub(crate) yhat_lower: Vec<f64>,
    pub(crate) yhat_upper: Vec<f64>,
    pub(crate) trend_lower: Vec<f64>,
    pub(crate) trend_upper: Vec<f64>,
}

/// Point predictions and fitted trend parameters to perturb.
pub(crate) struct Paths<'a> {
    /// Model time of each target.
    pub(crate) t: &'a [f64],
    pub(crate) trend: &'a [f64],
    pub(crate) yearly: &'a [f64],
    pub(crate) changepoints: &'a [f64],
    pub(crate) deltas: &'a [f64],
    /// Observation noise standard deviation.
    pub(crate) sigma: f64,
}

fn fit_error(what: &str, e: impl std::fmt::Display) -> ForecastError {
    ForecastError::ModelFit {
        reason: format!("{what}: {e}"),
    }
}

/// Symmetric Gaussian interval around the point prediction; the trend has no
/// interval of its own.
pub(crate) fn analytic_bounds(paths: &Paths<'_>, width: f64) -> Result<Bounds, ForecastError> {
    let std_normal = statrs::distribution::Normal::new(0.0, 1.0)
        .map_err(|e| fit_error("standard normal", e))?;
    let half = std_normal.inverse_cdf(0.5 + width / 2.0) * paths.sigma;

    let yhat: Vec<f64> = paths
        .trend
        .iter()
        .zip(paths.yearly)
        .map(|(t, s)| t + s)
        .collect();
    Ok(Bounds {
        yhat_lower: yhat.iter().map(|y| y - half).collect(),
        yhat_upper: yhat.iter().map(|y| y + half).collect(),
        trend_lower: paths.trend.to_vec(),
        trend_upper: paths.trend.to_vec(),
    })
}

/// Quantile bounds over `n_samples` simulated paths.
///
/// Path `s` uses its own generator seeded with `seed + s`, so the result
/// depends only on `seed`, not on thread scheduling. Without a seed one is
/// drawn from the OS.
pub(crate) fn sampled_bounds(
    paths: &Paths<'_>,
    n_samples: usize,
    width: f64,
    seed: Option<u64>,
) -> Result<Bounds, ForecastError> {
    let m = paths.t.len();
    if m == 0 || n_samples == 0 {
        return Ok(Bounds::default());
    }

    let base_seed = seed.unwrap_or_else(|| StdRng::from_os_rng().random());
    let t_max = paths.t.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let future_span = (t_max - 1.0).max(0.0);
    let rate = paths.changepoints.len() as f64 * future_span;
    let scale = if paths.deltas.is_empty() {
        0.0
    } else {
        paths.deltas.iter().map(|d| d.abs()).sum::<f64>() / paths.deltas.len() as f64
    } + 1e-8;

    let poisson = if rate > 0.0 {
        Some(Poisson::new(rate).map_err(|e| fit_error("changepoint count", e))?)
    } else {
        None
    };
    let magnitude = Exp::new(1.0 / scale).map_err(|e| fit_error("changepoint magnitude", e))?;
    let noise = Normal::new(0.0, paths.sigma).map_err(|e| fit_error("observation noise", e))?;

    let simulated: Vec<(Vec<f64>, Vec<f64>)> = (0..n_samples)
        .into_par_iter()
        .map(|s| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(s as u64));
            let n_new = poisson
                .as_ref()
                .map_or(0, |p| p.sample(&mut rng) as usize);
            let new_changes: Vec<(f64, f64)> = (0..n_new)
                .map(|_| {
                    let at = 1.0 + rng.random::<f64>() * future_span;
                    let sign = if rng.random::<bool>() { 1.0 } else { -1.0 };
                    (at, sign * magnitude.sample(&mut rng))
                })
                .collect();

            let mut yhat = Vec::with_capacity(m);
            let mut trend = Vec::with_capacity(m);
            for i in 0..m {
                let ti = paths.t[i];
                let extra: f64 = new_changes.iter().map(|&(c, d)| d * hinge(ti, c)).sum();
                let tr = paths.trend[i] + extra;
                trend.push(tr);
                yhat.push(tr + paths.yearly[i] + noise.sample(&mut rng));
            }
            (yhat, trend)
        })
        .collect();

    // Shape (m, n_samples): each column is one simulated path.
    let mut yhat_paths = Array2::<f64>::zeros((m, n_samples));
    let mut trend_paths = Array2::<f64>::zeros((m, n_samples));
    for (s, (yhat, trend)) in simulated.into_iter().enumerate() {
        yhat_paths.column_mut(s).assign(&Array1::from(yhat));
        trend_paths.column_mut(s).assign(&Array1::from(trend));
    }

    let lower_p = (1.0 - width) / 2.0;
    let upper_p = (1.0 + width) / 2.0;
    let row_bounds = |sims: &Array2<f64>| -> Vec<(f64, f64)> {
        (0..m)
            .into_par_iter()
            .map(|i| {
                let mut row = sims.row(i).to_vec();
                row.sort_by(f64::total_cmp);
                (quantile_type7(&row, lower_p), quantile_type7(&row, upper_p))
            })
            .collect()
    };

    let (yhat_lower, yhat_upper): (Vec<f64>, Vec<f64>) =
        row_bounds(&yhat_paths).into_iter().unzip();
    let (trend_lower, trend_upper): (Vec<f64>, Vec<f64>) =
        row_bounds(&trend_paths).into_iter().unzip();
    Ok(Bounds {
        yhat_lower,
        yhat_upper,
        trend_lower,
        trend_upper,
    })
}
