//! Dense symmetric positive-definite solves for the normal equations.

use ndarray::{Array1, Array2};

use crate::error::ForecastError;

/// Solves `a · x = b` for symmetric positive-definite `a` by Cholesky
/// factorisation.
///
/// # Errors
///
/// Returns [`ForecastError::ModelFit`] if a pivot is not positive (the
/// system is singular or indefinite) or the solution is not finite.
pub(crate) fn solve_spd(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, ForecastError> {
    let n = a.nrows();
    debug_assert_eq!(a.ncols(), n);
    debug_assert_eq!(b.len(), n);

    let max_diag = (0..n).fold(0.0_f64, |m, i| m.max(a[[i, i]].abs()));
    let tol = max_diag * f64::EPSILON * n as f64;

    // Lower-triangular factor L with a = L·Lᵀ.
    let mut l = Array2::<f64>::zeros((n, n));
    for j in 0..n {
        let mut d = a[[j, j]];
        for k in 0..j {
            d -= l[[j, k]] * l[[j, k]];
        }
        if d.is_nan() || d <= tol {
            return Err(ForecastError::ModelFit {
                reason: format!("normal equations are not positive definite (pivot {j})"),
            });
        }
        let d = d.sqrt();
        l[[j, j]] = d;
        for i in (j + 1)..n {
            let mut s = a[[i, j]];
            for k in 0..j {
                s -= l[[i, k]] * l[[j, k]];
            }
            l[[i, j]] = s / d;
        }
    }

    // Forward substitution: L·y = b.
    let mut y = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut s = b[i];
        for k in 0..i {
            s -= l[[i, k]] * y[k];
        }
        y[i] = s / l[[i, i]];
    }

    // Back substitution: Lᵀ·x = y.
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut s = y[i];
        for k in (i + 1)..n {
            s -= l[[k, i]] * x[k];
        }
        x[i] = s / l[[i, i]];
    }

    if x.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::ModelFit {
            reason: "solution contains non-finite coefficients".to_string(),
        });
    }
    Ok(x)
}
