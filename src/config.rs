use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Keeling configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeelingConfig {
    /// Seed for forecast uncertainty sampling.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Input and output settings.
    #[serde(default)]
    pub io: IoToml,

    /// Rolling window and rounding settings.
    #[serde(default)]
    pub features: FeaturesToml,

    /// Anomaly signal settings.
    #[serde(default)]
    pub anomaly: AnomalyToml,

    /// LOESS settings.
    #[serde(default)]
    pub smoothing: SmoothingToml,

    /// Forecast window and model settings.
    #[serde(default)]
    pub forecast: ForecastToml,
}

impl KeelingConfig {
    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_year_column")]
    pub year_column: String,
    #[serde(default = "default_month_column")]
    pub month_column: String,
    #[serde(default = "default_day_column")]
    pub day_column: String,
    #[serde(default = "default_decimal_column")]
    pub decimal_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: None,
            output_dir: None,
            year_column: default_year_column(),
            month_column: default_month_column(),
            day_column: default_day_column(),
            decimal_column: default_decimal_column(),
            value_column: default_value_column(),
            format: default_format(),
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_year_column() -> String {
    "year".to_string()
}
fn default_month_column() -> String {
    "month".to_string()
}
fn default_day_column() -> String {
    "day".to_string()
}
fn default_decimal_column() -> String {
    "decimal".to_string()
}
fn default_value_column() -> String {
    "value".to_string()
}
fn default_format() -> String {
    "csv".to_string()
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeaturesToml {
    #[serde(default = "default_short_window")]
    pub short_window_days: u32,
    #[serde(default = "default_long_window")]
    pub long_window_days: u32,
    #[serde(default = "default_round_decimals")]
    pub round_decimals: u8,
}

impl Default for FeaturesToml {
    fn default() -> Self {
        Self {
            short_window_days: default_short_window(),
            long_window_days: default_long_window(),
            round_decimals: default_round_decimals(),
        }
    }
}

fn default_short_window() -> u32 {
    30
}
fn default_long_window() -> u32 {
    365
}
fn default_round_decimals() -> u8 {
    2
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnomalyToml {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_rolling_window")]
    pub rolling_window: usize,
    #[serde(default = "default_min_periods")]
    pub min_periods: usize,
    #[serde(default = "default_min_std")]
    pub min_std: f64,
}

impl Default for AnomalyToml {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            rolling_window: default_rolling_window(),
            min_periods: default_min_periods(),
            min_std: default_min_std(),
        }
    }
}

fn default_threshold() -> f64 {
    2.0
}
fn default_rolling_window() -> usize {
    3650
}
fn default_min_periods() -> usize {
    1000
}
fn default_min_std() -> f64 {
    1e-9
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmoothingToml {
    #[serde(default = "default_frac")]
    pub frac: f64,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl Default for SmoothingToml {
    fn default() -> Self {
        Self {
            frac: default_frac(),
            iterations: default_iterations(),
        }
    }
}

fn default_frac() -> f64 {
    0.2
}
fn default_iterations() -> usize {
    3
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: usize,
    #[serde(default = "default_history_years")]
    pub history_years: u32,
    #[serde(default = "default_n_changepoints")]
    pub n_changepoints: usize,
    #[serde(default = "default_changepoint_range")]
    pub changepoint_range: f64,
    #[serde(default = "default_changepoint_prior_scale")]
    pub changepoint_prior_scale: f64,
    /// `auto`, `enabled` or `disabled`.
    #[serde(default = "default_yearly_seasonality")]
    pub yearly_seasonality: String,
    #[serde(default = "default_yearly_order")]
    pub yearly_order: usize,
    #[serde(default = "default_seasonality_prior_scale")]
    pub seasonality_prior_scale: f64,
    #[serde(default = "default_interval_width")]
    pub interval_width: f64,
    #[serde(default = "default_uncertainty_samples")]
    pub uncertainty_samples: usize,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            history_years: default_history_years(),
            n_changepoints: default_n_changepoints(),
            changepoint_range: default_changepoint_range(),
            changepoint_prior_scale: default_changepoint_prior_scale(),
            yearly_seasonality: default_yearly_seasonality(),
            yearly_order: default_yearly_order(),
            seasonality_prior_scale: default_seasonality_prior_scale(),
            interval_width: default_interval_width(),
            uncertainty_samples: default_uncertainty_samples(),
        }
    }
}

fn default_horizon_days() -> usize {
    5475
}
fn default_history_years() -> u32 {
    25
}
fn default_n_changepoints() -> usize {
    25
}
fn default_changepoint_range() -> f64 {
    0.8
}
fn default_changepoint_prior_scale() -> f64 {
    0.05
}
fn default_yearly_seasonality() -> String {
    "auto".to_string()
}
fn default_yearly_order() -> usize {
    10
}
fn default_seasonality_prior_scale() -> f64 {
    10.0
}
fn default_interval_width() -> f64 {
    0.8
}
fn default_uncertainty_samples() -> usize {
    300
}
