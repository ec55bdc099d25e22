//! Applying a smoother to the daily series and the yearly growth series.

use std::collections::BTreeMap;

use keeling_calendar::CalendarDate;
use tracing::debug;

use crate::error::LoessError;
use crate::lowess::Smoother;

/// Smooths each calendar year independently over day of year.
///
/// For every year, `(doy, value)` pairs are fitted and predicted at that
/// year's own observed days; nothing is carried across year boundaries. A
/// year with one observation keeps its value. Output is aligned with the
/// input.
///
/// # Errors
///
/// Returns [`LoessError`] if the slices differ in length or any fit fails.
pub fn smooth_per_year<S: Smoother + ?Sized>(
    dates: &[CalendarDate],
    values: &[f64],
    smoother: &S,
) -> Result<Vec<f64>, LoessError> {
    if dates.len() != values.len() {
        return Err(LoessError::LengthMismatch {
            x_len: dates.len(),
            y_len: values.len(),
        });
    }

    let mut by_year: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, d) in dates.iter().enumerate() {
        by_year.entry(d.year()).or_default().push(i);
    }

    let mut out = vec![0.0; values.len()];
    for (year, rows) in &by_year {
        let x: Vec<f64> = rows.iter().map(|&i| f64::from(dates[i].doy().get())).collect();
        let y: Vec<f64> = rows.iter().map(|&i| values[i]).collect();
        let fitted = smoother.smooth(&x, &y)?;
        for (&i, f) in rows.iter().zip(fitted) {
            out[i] = f;
        }
        debug!(year, n = rows.len(), "smoothed year");
    }

    Ok(out)
}

/// Smooths a series with gaps, fitting only the defined points.
///
/// `None` entries are skipped and stay `None`. If no point is defined the
/// result is all `None`.
///
/// # Errors
///
/// Returns [`LoessError`] if the slices differ in length or the fit fails.
pub fn smooth_series<S: Smoother + ?Sized>(
    x: &[f64],
    y: &[Option<f64>],
    smoother: &S,
) -> Result<Vec<Option<f64>>, LoessError> {
    if x.len() != y.len() {
        return Err(LoessError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }

    let (idx, (xs, ys)): (Vec<usize>, (Vec<f64>, Vec<f64>)) = y
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, (x[i], v))))
        .unzip();

    let mut out = vec![None; y.len()];
    if idx.is_empty() {
        return Ok(out);
    }
    let fitted = smoother.smooth(&xs, &ys)?;
    for (i, f) in idx.into_iter().zip(fitted) {
        out[i] = Some(f);
    }
    Ok(out)
}
