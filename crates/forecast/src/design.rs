//! Time scaling, changepoint placement and design-matrix construction.

use std::f64::consts::PI;

use keeling_calendar::CalendarDate;
use ndarray::Array2;

/// Days since 1970-01-01.
pub(crate) fn epoch_days(date: CalendarDate) -> f64 {
    f64::from(date.epoch_days())
}

/// Affine map from dates to model time, with the history on `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimeScale {
    start: f64,
    span: f64,
}

impl TimeScale {
    /// Returns `None` when `first` is not strictly before `last`.
    pub(crate) fn new(first: CalendarDate, last: CalendarDate) -> Option<Self> {
        let start = epoch_days(first);
        let span = epoch_days(last) - start;
        (span > 0.0).then_some(Self { start, span })
    }

    /// History length in days.
    pub(crate) fn span_days(&self) -> f64 {
        self.span
    }

    pub(crate) fn scale(&self, date: CalendarDate) -> f64 {
        (epoch_days(date) - self.start) / self.span
    }
}

/// Changepoint locations in model time.
///
/// Candidates are spread evenly by row over the first `range` fraction of
/// `t` (which must be sorted); the first row is never a changepoint. At most
/// one fewer than the number of rows in that range are used.
pub(crate) fn changepoints(t: &[f64], n_changepoints: usize, range: f64) -> Vec<f64> {
    let hist = ((t.len() as f64) * range).floor() as usize;
    let n_cp = n_changepoints.min(hist.saturating_sub(1));
    if n_cp == 0 {
        return Vec::new();
    }
    let last = (hist - 1) as f64;
    (1..=n_cp)
        .map(|i| {
            let idx = (last * i as f64 / n_cp as f64).round_ties_even() as usize;
            t[idx]
        })
        .collect()
}

/// Yearly Fourier features of one date: `sin, cos` pairs for orders `1..=order`.
pub(crate) fn fourier_row(day: f64, period: f64, order: usize, out: &mut [f64]) {
    for k in 0..order {
        let arg = 2.0 * PI * (k + 1) as f64 * day / period;
        out[2 * k] = arg.sin();
        out[2 * k + 1] = arg.cos();
    }
}

/// Hinge value `(t − c)₊`.
pub(crate) fn hinge(t: f64, c: f64) -> f64 {
    (t - c).max(0.0)
}

/// Regression design.
///
/// Column layout: intercept, slope, one hinge per changepoint, then
/// `2 × order` Fourier columns when the yearly term is present.
pub(crate) struct Design<'a> {
    pub(crate) changepoints: &'a [f64],
    /// `(period, order)` of the yearly term.
    pub(crate) yearly: Option<(f64, usize)>,
}

impl Design<'_> {
    pub(crate) fn n_trend(&self) -> usize {
        2 + self.changepoints.len()
    }

    pub(crate) fn n_columns(&self) -> usize {
        self.n_trend() + self.yearly.map_or(0, |(_, order)| 2 * order)
    }

    /// Builds the design matrix for model times `t` and epoch days `days`.
    pub(crate) fn matrix(&self, t: &[f64], days: &[f64]) -> Array2<f64> {
        let n_trend = self.n_trend();
        let mut x = Array2::<f64>::zeros((t.len(), self.n_columns()));
        for (i, (&ti, &day)) in t.iter().zip(days).enumerate() {
            let mut row = x.row_mut(i);
            row[0] = 1.0;
            row[1] = ti;
            for (j, &c) in self.changepoints.iter().enumerate() {
                row[2 + j] = hinge(ti, c);
            }
            if let Some((period, order)) = self.yearly {
                let mut f = vec![0.0; 2 * order];
                fourier_row(day, period, order, &mut f);
                for (j, v) in f.into_iter().enumerate() {
                    row[n_trend + j] = v;
                }
            }
        }
        x
    }
}
