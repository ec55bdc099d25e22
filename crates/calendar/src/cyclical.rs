//! Sine/cosine encoding of the day of year.

use std::f64::consts::PI;

use crate::doy::DayOfYear;

/// Period used for the cyclical encoding.
///
/// Fixed at 365 for every year, so the phase drifts by one day in leap
/// years. Downstream features were calibrated against this divisor.
pub const ENCODING_PERIOD: f64 = 365.0;

/// Returns `(sin(2π·doy/365), cos(2π·doy/365))`.
pub fn cyclical_encoding(doy: DayOfYear) -> (f64, f64) {
    let angle = 2.0 * PI * f64::from(doy.get()) / ENCODING_PERIOD;
    (angle.sin(), angle.cos())
}
