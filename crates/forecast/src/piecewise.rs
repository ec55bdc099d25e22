//! Piecewise-linear trend with additive yearly Fourier seasonality.
//!
//! The history is rescaled so that time runs over `[0, 1]` and values over
//! roughly `[-1, 1]`. The trend is `k·t + m + Σ δⱼ·(t − cⱼ)₊` with
//! changepoints `cⱼ` spread over the leading part of the history. All
//! coefficients get independent Gaussian priors (weak on `k` and `m`, tight
//! on the rate changes `δ` and moderate on the Fourier terms), so the fit
//! is a ridge regression. The noise variance is re-estimated once from the
//! residuals of a first pass and the system solved again.

use std::iter;

use keeling_calendar::CalendarDate;
use ndarray::{Array1, s};
use tracing::debug;

use crate::config::{ModelConfig, SeasonalityMode};
use crate::design::{Design, TimeScale, changepoints, epoch_days, fourier_row, hinge};
use crate::error::ForecastError;
use crate::linalg::solve_spd;
use crate::model::{ForecastPoint, TrendSeasonalModel};
use crate::uncertainty::{Bounds, Paths, analytic_bounds, sampled_bounds};

/// Fewest observations a model can be fitted to.
pub const MIN_OBSERVATIONS: usize = 2;

/// Prior scale of the intercept and base growth rate.
const TREND_PRIOR_SCALE: f64 = 5.0;

/// History span from which yearly seasonality is enabled in `Auto` mode.
const AUTO_YEARLY_MIN_DAYS: f64 = 730.0;

/// Floor on the noise variance in scaled units.
const MIN_SIGMA2: f64 = 1e-10;

/// Ridge-fitted piecewise-linear trend model.
#[derive(Debug, Clone, Default)]
pub struct PiecewiseTrendModel {
    config: ModelConfig,
}

impl PiecewiseTrendModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Fits the model to `values` observed on strictly increasing `dates`.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::InvalidConfig`] if the model configuration is invalid.
    /// - [`ForecastError::LengthMismatch`] if the inputs differ in length.
    /// - [`ForecastError::InsufficientData`] with fewer than two observations.
    /// - [`ForecastError::NonFiniteData`] if any value is NaN or infinite.
    /// - [`ForecastError::ModelFit`] if dates are not strictly increasing or
    ///   the normal equations cannot be solved.
    pub fn fit(
        &self,
        dates: &[CalendarDate],
        values: &[f64],
    ) -> Result<FittedTrend, ForecastError> {
        let cfg = &self.config;
        cfg.validate()?;
        if dates.len() != values.len() {
            return Err(ForecastError::LengthMismatch {
                dates_len: dates.len(),
                values_len: values.len(),
            });
        }
        let n = values.len();
        if n < MIN_OBSERVATIONS {
            return Err(ForecastError::InsufficientData {
                n,
                min: MIN_OBSERVATIONS,
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::NonFiniteData);
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ForecastError::ModelFit {
                reason: "dates must be strictly increasing".to_string(),
            });
        }
        let scale = TimeScale::new(dates[0], dates[n - 1]).ok_or_else(|| {
            ForecastError::ModelFit {
                reason: "history spans zero days".to_string(),
            }
        })?;

        let t: Vec<f64> = dates.iter().map(|&d| scale.scale(d)).collect();
        let days: Vec<f64> = dates.iter().map(|&d| epoch_days(d)).collect();
        let max_abs = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let y_scale = if max_abs > 0.0 { max_abs } else { 1.0 };
        let y: Array1<f64> = values.iter().map(|v| v / y_scale).collect();

        let cps = changepoints(&t, cfg.n_changepoints(), cfg.changepoint_range());
        let yearly_on = match cfg.yearly_seasonality() {
            SeasonalityMode::Auto => scale.span_days() >= AUTO_YEARLY_MIN_DAYS,
            SeasonalityMode::Enabled => true,
            SeasonalityMode::Disabled => false,
        };
        let design = Design {
            changepoints: &cps,
            yearly: yearly_on.then_some((cfg.yearly_period(), cfg.yearly_order())),
        };
        let x = design.matrix(&t, &days);
        let prior_scales: Vec<f64> = iter::repeat_n(TREND_PRIOR_SCALE, 2)
            .chain(iter::repeat_n(cfg.changepoint_prior_scale(), cps.len()))
            .chain(iter::repeat_n(
                cfg.seasonality_prior_scale(),
                design.n_columns() - design.n_trend(),
            ))
            .collect();

        let xtx = x.t().dot(&x);
        let xty = x.t().dot(&y);
        let solve = |sigma2: f64| {
            let mut a = xtx.clone();
            for (j, s) in prior_scales.iter().enumerate() {
                a[[j, j]] += sigma2 / (s * s);
            }
            solve_spd(&a, &xty)
        };
        let rss = |beta: &Array1<f64>| {
            let r = &y - &x.dot(beta);
            r.dot(&r)
        };

        let y_vec = y.to_vec();
        let beta = solve(keeling_stats::variance(&y_vec).max(MIN_SIGMA2))?;
        let sigma2 = (rss(&beta) / n as f64).max(MIN_SIGMA2);
        let beta = solve(sigma2)?;
        let sigma = (rss(&beta) / n as f64).sqrt();
        if !sigma.is_finite() {
            return Err(ForecastError::ModelFit {
                reason: "residual variance is not finite".to_string(),
            });
        }

        let n_trend = design.n_trend();
        let yearly_term = design.yearly;
        let fitted = FittedTrend {
            scale,
            y_scale,
            intercept: beta[0],
            slope: beta[1],
            deltas: beta.slice(s![2..n_trend]).to_vec(),
            changepoints: cps,
            yearly: yearly_term.map(|(period, order)| YearlyTerm {
                period,
                order,
                beta: beta.slice(s![n_trend..]).to_vec(),
            }),
            sigma,
            interval_width: cfg.interval_width(),
            uncertainty_samples: cfg.uncertainty_samples(),
            seed: cfg.seed(),
        };
        debug!(
            n,
            changepoints = fitted.changepoints.len(),
            yearly = yearly_on,
            sigma = fitted.noise_sd(),
            "fitted piecewise trend"
        );
        Ok(fitted)
    }
}

impl TrendSeasonalModel for PiecewiseTrendModel {
    fn fit_predict(
        &self,
        dates: &[CalendarDate],
        values: &[f64],
        targets: &[CalendarDate],
    ) -> Result<Vec<ForecastPoint>, ForecastError> {
        self.fit(dates, values)?.predict(targets)
    }
}

#[derive(Debug, Clone)]
struct YearlyTerm {
    period: f64,
    order: usize,
    beta: Vec<f64>,
}

/// A fitted [`PiecewiseTrendModel`]. Parameters are held in scaled units.
#[derive(Debug, Clone)]
pub struct FittedTrend {
    scale: TimeScale,
    y_scale: f64,
    intercept: f64,
    slope: f64,
    changepoints: Vec<f64>,
    deltas: Vec<f64>,
    yearly: Option<YearlyTerm>,
    sigma: f64,
    interval_width: f64,
    uncertainty_samples: usize,
    seed: Option<u64>,
}

impl FittedTrend {
    /// Changepoint locations in model time (history on `[0, 1]`).
    pub fn changepoints(&self) -> &[f64] {
        &self.changepoints
    }

    pub fn has_yearly(&self) -> bool {
        self.yearly.is_some()
    }

    /// Residual standard deviation in the units of the input series.
    pub fn noise_sd(&self) -> f64 {
        self.sigma * self.y_scale
    }

    fn trend_at(&self, t: f64) -> f64 {
        let bends: f64 = self
            .changepoints
            .iter()
            .zip(&self.deltas)
            .map(|(&c, &d)| d * hinge(t, c))
            .sum();
        self.intercept + self.slope * t + bends
    }

    fn yearly_at(&self, date: CalendarDate) -> f64 {
        let Some(term) = &self.yearly else {
            return 0.0;
        };
        let mut f = vec![0.0; 2 * term.order];
        fourier_row(epoch_days(date), term.period, term.order, &mut f);
        f.iter().zip(&term.beta).map(|(a, b)| a * b).sum()
    }

    /// Predicts at every date in `targets`, in order, with intervals.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::ModelFit`] if a sampling distribution cannot
    /// be constructed from the fitted parameters.
    pub fn predict(&self, targets: &[CalendarDate]) -> Result<Vec<ForecastPoint>, ForecastError> {
        let t: Vec<f64> = targets.iter().map(|&d| self.scale.scale(d)).collect();
        let trend: Vec<f64> = t.iter().map(|&ti| self.trend_at(ti)).collect();
        let yearly: Vec<f64> = targets.iter().map(|&d| self.yearly_at(d)).collect();

        let paths = Paths {
            t: &t,
            trend: &trend,
            yearly: &yearly,
            changepoints: &self.changepoints,
            deltas: &self.deltas,
            sigma: self.sigma,
        };
        let Bounds {
            yhat_lower,
            yhat_upper,
            trend_lower,
            trend_upper,
        } = if self.uncertainty_samples == 0 {
            analytic_bounds(&paths, self.interval_width)?
        } else {
            sampled_bounds(
                &paths,
                self.uncertainty_samples,
                self.interval_width,
                self.seed,
            )?
        };

        let s = self.y_scale;
        Ok(targets
            .iter()
            .enumerate()
            .map(|(i, &date)| {
                let yhat = trend[i] + yearly[i];
                ForecastPoint {
                    date,
                    yhat: yhat * s,
                    // Quantiles of a finite sample can miss the point estimate.
                    yhat_lower: yhat_lower[i].min(yhat) * s,
                    yhat_upper: yhat_upper[i].max(yhat) * s,
                    trend: trend[i] * s,
                    trend_lower: trend_lower[i].min(trend[i]) * s,
                    trend_upper: trend_upper[i].max(trend[i]) * s,
                    yearly: yearly[i] * s,
                }
            })
            .collect())
    }
}
