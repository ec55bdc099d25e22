//! Locally weighted linear regression with bisquare robustness iterations.

use keeling_stats::median;

use crate::error::LoessError;

/// Fits `y` against `x` and returns the smoothed value at every `x`.
///
/// Implementations must return a vector aligned with the inputs.
pub trait Smoother {
    /// Smooths `y` over `x`.
    ///
    /// # Errors
    ///
    /// Returns [`LoessError`] on misaligned, empty or non-finite input.
    fn smooth(&self, x: &[f64], y: &[f64]) -> Result<Vec<f64>, LoessError>;
}

/// LOWESS smoother.
///
/// Each point is fitted by a weighted straight line over its `floor(frac·n)`
/// nearest neighbours (clamped to `[2, n]`) with tricube distance weights.
/// After the first pass, `iterations` robustness passes downweight points
/// with large residuals using bisquare weights on `6 × median |residual|`.
///
/// # Example
///
/// ```
/// use keeling_loess::{Lowess, Smoother};
///
/// let x: Vec<f64> = (0..20).map(f64::from).collect();
/// let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
/// let fit = Lowess::new().with_frac(0.5).smooth(&x, &y).unwrap();
/// assert!((fit[10] - 21.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct Lowess {
    frac: f64,
    iterations: usize,
}

impl Default for Lowess {
    fn default() -> Self {
        Self::new()
    }
}

impl Lowess {
    /// Creates a smoother with `frac = 0.2` and 3 robustness iterations.
    pub fn new() -> Self {
        Self {
            frac: 0.2,
            iterations: 3,
        }
    }

    /// Sets the neighbourhood fraction.
    pub fn with_frac(mut self, frac: f64) -> Self {
        self.frac = frac;
        self
    }

    /// Sets the number of robustness iterations (0 disables them).
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Returns the neighbourhood fraction.
    pub fn frac(&self) -> f64 {
        self.frac
    }

    /// Returns the number of robustness iterations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Validates this configuration.
    ///
    /// `frac` must lie in `(0, 1]`.
    pub fn validate(&self) -> Result<(), LoessError> {
        if !(self.frac > 0.0 && self.frac <= 1.0) {
            return Err(LoessError::InvalidConfig {
                reason: format!("frac must be in (0, 1], got {}", self.frac),
            });
        }
        Ok(())
    }

    /// Neighbourhood size for `n` points.
    fn neighbours(&self, n: usize) -> usize {
        ((self.frac * n as f64).floor() as usize).clamp(2, n)
    }
}

impl Smoother for Lowess {
    fn smooth(&self, x: &[f64], y: &[f64]) -> Result<Vec<f64>, LoessError> {
        self.validate()?;
        if x.len() != y.len() {
            return Err(LoessError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        let n = x.len();
        if n == 0 {
            return Err(LoessError::InsufficientData { n, min: 1 });
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(LoessError::NonFiniteInput);
        }
        if n == 1 {
            return Ok(y.to_vec());
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| x[a].total_cmp(&x[b]));
        let xs: Vec<f64> = order.iter().map(|&i| x[i]).collect();
        let ys: Vec<f64> = order.iter().map(|&i| y[i]).collect();

        let k = self.neighbours(n);
        let scale = ys.iter().fold(1.0_f64, |m, v| m.max(v.abs()));
        let mut robust = vec![1.0; n];
        let mut fitted = fit_pass(&xs, &ys, &robust, k);

        for _ in 0..self.iterations {
            let residuals: Vec<f64> = ys.iter().zip(&fitted).map(|(y, f)| y - f).collect();
            let mut abs_res: Vec<f64> = residuals.iter().map(|r| r.abs()).collect();
            abs_res.sort_by(f64::total_cmp);
            let tol = 1e-12 * scale;
            if abs_res[n - 1] <= tol {
                break;
            }
            let m = median(&abs_res);
            if m <= tol {
                // Most points fit exactly: drop every point that does not.
                for (w, r) in robust.iter_mut().zip(&residuals) {
                    *w = if r.abs() > tol { 0.0 } else { 1.0 };
                }
            } else {
                let h = 6.0 * m;
                for (w, r) in robust.iter_mut().zip(&residuals) {
                    let u = r / h;
                    *w = if u.abs() < 1.0 { (1.0 - u * u).powi(2) } else { 0.0 };
                }
            }
            fitted = fit_pass(&xs, &ys, &robust, k);
        }

        let mut out = vec![0.0; n];
        for (pos, &i) in order.iter().enumerate() {
            out[i] = fitted[pos];
        }
        Ok(out)
    }
}

fn tricube(u: f64) -> f64 {
    if u < 1.0 {
        (1.0 - u.powi(3)).powi(3)
    } else {
        0.0
    }
}

/// One weighted local-linear pass over sorted `xs`.
fn fit_pass(xs: &[f64], ys: &[f64], robust: &[f64], k: usize) -> Vec<f64> {
    let n = xs.len();
    let mut left = 0usize;
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let xi = xs[i];
        // Slide the k-wide window right while it brings closer points in.
        while left + k < n && xs[left + k] - xi < xi - xs[left] {
            left += 1;
        }
        let right = left + k - 1;
        let h = (xi - xs[left]).max(xs[right] - xi);

        let mut sw = 0.0;
        let mut swx = 0.0;
        let mut swy = 0.0;
        let mut weights = Vec::with_capacity(k);
        for j in left..=right {
            let dist_w = if h > 0.0 { tricube((xs[j] - xi).abs() / h) } else { 1.0 };
            let w = dist_w * robust[j];
            weights.push(w);
            sw += w;
            swx += w * xs[j];
            swy += w * ys[j];
        }

        if sw <= 0.0 {
            out.push(ys[i]);
            continue;
        }

        let xm = swx / sw;
        let ym = swy / sw;
        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (w, j) in weights.iter().zip(left..=right) {
            let dx = xs[j] - xm;
            sxx += w * dx * dx;
            sxy += w * dx * (ys[j] - ym);
        }

        // Degenerate spread in x: fall back to the weighted mean.
        if (sxx / sw).sqrt() <= 1e-10 * h.max(1.0) {
            out.push(ym);
        } else {
            out.push(ym + sxy / sxx * (xi - xm));
        }
    }

    out
}
