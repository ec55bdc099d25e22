//! Configuration for anomaly detection.

use crate::error::AnomalyError;

/// Configuration for the yearly and rolling z-score signals.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use keeling_anomaly::AnomalyConfig;
///
/// let config = AnomalyConfig::new()
///     .with_threshold(2.5)
///     .with_rolling_window(730)
///     .with_min_periods(365);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct AnomalyConfig {
    threshold: f64,
    rolling_window: usize,
    min_periods: usize,
    min_std: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `threshold = 2.0`, `rolling_window = 3650` observations,
    /// `min_periods = 1000`, `min_std = 1e-9`.
    pub fn new() -> Self {
        Self {
            threshold: 2.0,
            rolling_window: 3650,
            min_periods: 1000,
            min_std: 1e-9,
        }
    }

    /// Sets the |z| threshold a row must strictly exceed to be flagged.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the rolling window length in observations.
    pub fn with_rolling_window(mut self, window: usize) -> Self {
        self.rolling_window = window;
        self
    }

    /// Sets the minimum observations before the rolling window yields a value.
    pub fn with_min_periods(mut self, min_periods: usize) -> Self {
        self.min_periods = min_periods;
        self
    }

    /// Sets the standard deviation at or below which z is undefined.
    pub fn with_min_std(mut self, min_std: f64) -> Self {
        self.min_std = min_std;
        self
    }

    // --- Accessors ---

    /// Returns the |z| threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the rolling window length.
    pub fn rolling_window(&self) -> usize {
        self.rolling_window
    }

    /// Returns the rolling window's minimum population.
    pub fn min_periods(&self) -> usize {
        self.min_periods
    }

    /// Returns the standard deviation floor.
    pub fn min_std(&self) -> f64 {
        self.min_std
    }

    /// Validates this configuration.
    ///
    /// Checks that the threshold is finite and positive, the window is
    /// non-zero, `1 <= min_periods <= rolling_window`, and `min_std` is finite
    /// and non-negative.
    pub fn validate(&self) -> Result<(), AnomalyError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(AnomalyError::InvalidConfig {
                reason: format!("threshold must be finite and positive, got {}", self.threshold),
            });
        }
        if self.rolling_window == 0 {
            return Err(AnomalyError::InvalidConfig {
                reason: "rolling_window must be at least 1".to_string(),
            });
        }
        if self.min_periods == 0 || self.min_periods > self.rolling_window {
            return Err(AnomalyError::InvalidConfig {
                reason: format!(
                    "min_periods must be in 1..={}, got {}",
                    self.rolling_window, self.min_periods
                ),
            });
        }
        if !self.min_std.is_finite() || self.min_std < 0.0 {
            return Err(AnomalyError::InvalidConfig {
                reason: format!("min_std must be finite and non-negative, got {}", self.min_std),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = AnomalyConfig::new();
        assert_eq!(c.threshold(), 2.0);
        assert_eq!(c.rolling_window(), 3650);
        assert_eq!(c.min_periods(), 1000);
        assert_eq!(c.min_std(), 1e-9);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let c = AnomalyConfig::new()
            .with_threshold(3.0)
            .with_rolling_window(10)
            .with_min_periods(5)
            .with_min_std(0.0);
        assert_eq!(c.threshold(), 3.0);
        assert_eq!(c.rolling_window(), 10);
        assert_eq!(c.min_periods(), 5);
        assert_eq!(c.min_std(), 0.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn shorter_window_needs_fewer_min_periods() {
        let c = AnomalyConfig::new().with_rolling_window(730);
        assert!(c.validate().is_err());
        assert!(c.with_min_periods(365).validate().is_ok());
    }

    #[test]
    fn invalid_threshold() {
        assert!(AnomalyConfig::new().with_threshold(0.0).validate().is_err());
        assert!(AnomalyConfig::new().with_threshold(f64::NAN).validate().is_err());
    }

    #[test]
    fn min_periods_above_window() {
        let c = AnomalyConfig::new().with_rolling_window(100).with_min_periods(101);
        assert!(matches!(
            c.validate(),
            Err(AnomalyError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn negative_min_std() {
        assert!(AnomalyConfig::new().with_min_std(-1.0).validate().is_err());
    }
}
