//! Configuration for the trend/seasonality model and the forecast window.

use std::fmt;
use std::str::FromStr;

use crate::error::ForecastError;

/// Whether the yearly Fourier term is included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeasonalityMode {
    /// Enabled when the history spans at least two years.
    #[default]
    Auto,
    /// Always enabled.
    Enabled,
    /// Never enabled.
    Disabled,
}

impl fmt::Display for SeasonalityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        })
    }
}

impl FromStr for SeasonalityMode {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "enabled" | "on" | "true" => Ok(Self::Enabled),
            "disabled" | "off" | "false" => Ok(Self::Disabled),
            other => Err(ForecastError::InvalidConfig {
                reason: format!(
                    "unknown seasonality mode '{other}' (expected auto, enabled or disabled)"
                ),
            }),
        }
    }
}

/// Parameters of the piecewise-linear trend plus yearly seasonality model.
///
/// # Example
///
/// ```
/// use keeling_forecast::ModelConfig;
///
/// let config = ModelConfig::new()
///     .with_n_changepoints(10)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct ModelConfig {
    n_changepoints: usize,
    changepoint_range: f64,
    changepoint_prior_scale: f64,
    yearly_seasonality: SeasonalityMode,
    yearly_order: usize,
    yearly_period: f64,
    seasonality_prior_scale: f64,
    interval_width: f64,
    uncertainty_samples: usize,
    seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: 25 changepoints over the first 80% of history with prior
    /// scale 0.05, automatic yearly seasonality of order 10 on a 365.25-day
    /// period with prior scale 10, interval width 0.8 from 300 samples, and
    /// no fixed seed.
    pub fn new() -> Self {
        Self {
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            yearly_seasonality: SeasonalityMode::Auto,
            yearly_order: 10,
            yearly_period: 365.25,
            seasonality_prior_scale: 10.0,
            interval_width: 0.8,
            uncertainty_samples: 300,
            seed: None,
        }
    }

    /// Sets the maximum number of trend changepoints.
    pub fn with_n_changepoints(mut self, n: usize) -> Self {
        self.n_changepoints = n;
        self
    }

    /// Sets the leading fraction of history where changepoints are placed.
    pub fn with_changepoint_range(mut self, range: f64) -> Self {
        self.changepoint_range = range;
        self
    }

    /// Sets the prior scale of changepoint rate adjustments.
    pub fn with_changepoint_prior_scale(mut self, scale: f64) -> Self {
        self.changepoint_prior_scale = scale;
        self
    }

    /// Sets the yearly seasonality mode.
    pub fn with_yearly_seasonality(mut self, mode: SeasonalityMode) -> Self {
        self.yearly_seasonality = mode;
        self
    }

    /// Sets the Fourier order of the yearly term.
    pub fn with_yearly_order(mut self, order: usize) -> Self {
        self.yearly_order = order;
        self
    }

    /// Sets the yearly period in days.
    pub fn with_yearly_period(mut self, period: f64) -> Self {
        self.yearly_period = period;
        self
    }

    /// Sets the prior scale of the Fourier coefficients.
    pub fn with_seasonality_prior_scale(mut self, scale: f64) -> Self {
        self.seasonality_prior_scale = scale;
        self
    }

    /// Sets the central probability mass of the prediction interval.
    pub fn with_interval_width(mut self, width: f64) -> Self {
        self.interval_width = width;
        self
    }

    /// Sets the number of simulated paths (0 selects analytic intervals).
    pub fn with_uncertainty_samples(mut self, n: usize) -> Self {
        self.uncertainty_samples = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // --- Accessors ---

    /// Returns the maximum number of changepoints.
    pub fn n_changepoints(&self) -> usize {
        self.n_changepoints
    }

    /// Returns the changepoint range.
    pub fn changepoint_range(&self) -> f64 {
        self.changepoint_range
    }

    /// Returns the changepoint prior scale.
    pub fn changepoint_prior_scale(&self) -> f64 {
        self.changepoint_prior_scale
    }

    /// Returns the yearly seasonality mode.
    pub fn yearly_seasonality(&self) -> SeasonalityMode {
        self.yearly_seasonality
    }

    /// Returns the yearly Fourier order.
    pub fn yearly_order(&self) -> usize {
        self.yearly_order
    }

    /// Returns the yearly period in days.
    pub fn yearly_period(&self) -> f64 {
        self.yearly_period
    }

    /// Returns the seasonality prior scale.
    pub fn seasonality_prior_scale(&self) -> f64 {
        self.seasonality_prior_scale
    }

    /// Returns the interval width.
    pub fn interval_width(&self) -> f64 {
        self.interval_width
    }

    /// Returns the number of uncertainty samples.
    pub fn uncertainty_samples(&self) -> usize {
        self.uncertainty_samples
    }

    /// Returns the random seed, if set.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ForecastError> {
        let invalid = |reason: String| Err(ForecastError::InvalidConfig { reason });

        if !(self.changepoint_range > 0.0 && self.changepoint_range <= 1.0) {
            return invalid(format!(
                "changepoint_range must be in (0, 1], got {}",
                self.changepoint_range
            ));
        }
        for (name, v) in [
            ("changepoint_prior_scale", self.changepoint_prior_scale),
            ("seasonality_prior_scale", self.seasonality_prior_scale),
            ("yearly_period", self.yearly_period),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return invalid(format!("{name} must be finite and positive, got {v}"));
            }
        }
        if self.yearly_seasonality != SeasonalityMode::Disabled && self.yearly_order == 0 {
            return invalid("yearly_order must be at least 1".to_string());
        }
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return invalid(format!(
                "interval_width must be in (0, 1), got {}",
                self.interval_width
            ));
        }
        Ok(())
    }
}

/// Forecast window and model parameters.
///
/// Defaults: a 5475-day horizon after the last observation, and output
/// restricted to dates within 25 calendar years before it.
#[derive(Clone, Debug)]
pub struct ForecastConfig {
    horizon_days: usize,
    history_years: u32,
    model: ModelConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self {
            horizon_days: 5475,
            history_years: 25,
            model: ModelConfig::new(),
        }
    }

    /// Sets the number of days forecast after the last observation.
    pub fn with_horizon_days(mut self, days: usize) -> Self {
        self.horizon_days = days;
        self
    }

    /// Sets how many calendar years of history are kept in the output.
    pub fn with_history_years(mut self, years: u32) -> Self {
        self.history_years = years;
        self
    }

    /// Sets the model parameters.
    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    /// Returns the horizon in days.
    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Returns the retained history in calendar years.
    pub fn history_years(&self) -> u32 {
        self.history_years
    }

    /// Returns the model parameters.
    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// Validates this configuration, including the model parameters.
    pub fn validate(&self) -> Result<(), ForecastError> {
        self.model.validate()
    }
}
