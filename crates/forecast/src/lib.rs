//! Trend and yearly-seasonality forecasting for daily CO2 series.
//!
//! The model is additive: a piecewise-linear trend with automatically placed
//! changepoints plus a yearly Fourier series. Coefficients are the posterior
//! mode under Gaussian priors, found by ridge-regularised least squares.
//! Intervals come from simulating future changepoints and observation noise
//! across samples in parallel.
//!
//! # Quick start
//!
//! ```rust
//! use keeling_calendar::{CalendarDate, daily_sequence};
//! use keeling_forecast::{ForecastConfig, ModelConfig, PiecewiseTrendModel, forecast};
//!
//! let dates = daily_sequence(CalendarDate::new(2020, 1, 1).unwrap(), 100).unwrap();
//! let values: Vec<f64> = (0..100).map(|i| 410.0 + 0.01 * f64::from(i)).collect();
//!
//! let config = ForecastConfig::new()
//!     .with_horizon_days(10)
//!     .with_model(ModelConfig::new().with_seed(7).with_uncertainty_samples(50));
//! let model = PiecewiseTrendModel::new(config.model().clone());
//! let rows = forecast(&model, &dates, &values, &config).unwrap();
//! assert_eq!(rows.len(), 110);
//! ```

pub mod config;
mod design;
pub mod error;
pub mod forecast;
mod linalg;
pub mod model;
pub mod piecewise;
mod uncertainty;

pub use config::{ForecastConfig, ModelConfig, SeasonalityMode};
pub use error::ForecastError;
pub use forecast::{forecast, forecast_targets};
pub use model::{ForecastPoint, TrendSeasonalModel};
pub use piecewise::{FittedTrend, MIN_OBSERVATIONS, PiecewiseTrendModel};
