//! Configuration for daily feature derivation.

use crate::error::FeatureError;

/// Configuration for the rolling-mean features.
///
/// Defaults: 30-day short window, 365-day long window, rolling means rounded
/// to 2 decimals.
///
/// # Example
///
/// ```
/// use keeling_features::FeatureConfig;
///
/// let config = FeatureConfig::new().with_long_window_days(730);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct FeatureConfig {
    short_window_days: u32,
    long_window_days: u32,
    round_decimals: u8,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self {
            short_window_days: 30,
            long_window_days: 365,
            round_decimals: 2,
        }
    }

    /// Sets the short rolling window in calendar days.
    pub fn with_short_window_days(mut self, days: u32) -> Self {
        self.short_window_days = days;
        self
    }

    /// Sets the long rolling window in calendar days.
    pub fn with_long_window_days(mut self, days: u32) -> Self {
        self.long_window_days = days;
        self
    }

    /// Sets the number of decimals rolling means are rounded to.
    pub fn with_round_decimals(mut self, decimals: u8) -> Self {
        self.round_decimals = decimals;
        self
    }

    /// Returns the short rolling window in calendar days.
    pub fn short_window_days(&self) -> u32 {
        self.short_window_days
    }

    /// Returns the long rolling window in calendar days.
    pub fn long_window_days(&self) -> u32 {
        self.long_window_days
    }

    /// Returns the rounding precision of rolling means.
    pub fn round_decimals(&self) -> u8 {
        self.round_decimals
    }

    /// Validates this configuration.
    ///
    /// Both windows must be at least one day and the rounding precision at
    /// most 12 decimals.
    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.short_window_days == 0 || self.long_window_days == 0 {
            return Err(FeatureError::InvalidConfig {
                reason: format!(
                    "rolling windows must be at least 1 day, got {} and {}",
                    self.short_window_days, self.long_window_days
                ),
            });
        }
        if self.round_decimals > 12 {
            return Err(FeatureError::InvalidConfig {
                reason: format!(
                    "round_decimals must be at most 12, got {}",
                    self.round_decimals
                ),
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
        let c = FeatureConfig::new();
        assert_eq!(c.short_window_days(), 30);
        assert_eq!(c.long_window_days(), 365);
        assert_eq!(c.round_decimals(), 2);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_window_rejected() {
        let c = FeatureConfig::new().with_short_window_days(0);
        assert!(matches!(
            c.validate(),
            Err(FeatureError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn excessive_decimals_rejected() {
        let c = FeatureConfig::new().with_round_decimals(13);
        assert!(c.validate().is_err());
    }
}
