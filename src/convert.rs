//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::*;

use keeling_anomaly::AnomalyConfig;
use keeling_features::FeatureConfig;
use keeling_forecast::{ForecastConfig, ModelConfig, SeasonalityMode};
use keeling_io::{Compression, OutputFormat, ReaderConfig, WriterConfig};
use keeling_loess::Lowess;
use keeling_pipeline::PipelineConfig;

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    let cfg = ReaderConfig::default()
        .with_year_column(&io.year_column)
        .with_month_column(&io.month_column)
        .with_day_column(&io.day_column)
        .with_decimal_column(&io.decimal_column)
        .with_value_column(&io.value_column);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let format: OutputFormat = io.format.parse()?;
    let compression = parse_compression(&io.compression)?;
    let cfg = WriterConfig::default()
        .with_format(format)
        .with_compression(compression)
        .with_row_group_size(io.row_group_size);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`FeatureConfig`] from the TOML features configuration.
pub fn build_feature_config(features: &FeaturesToml) -> Result<FeatureConfig> {
    let cfg = FeatureConfig::new()
        .with_short_window_days(features.short_window_days)
        .with_long_window_days(features.long_window_days)
        .with_round_decimals(features.round_decimals);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds an [`AnomalyConfig`] from the TOML anomaly configuration.
pub fn build_anomaly_config(anomaly: &AnomalyToml) -> Result<AnomalyConfig> {
    let cfg = AnomalyConfig::new()
        .with_threshold(anomaly.threshold)
        .with_rolling_window(anomaly.rolling_window)
        .with_min_periods(anomaly.min_periods)
        .with_min_std(anomaly.min_std);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds the [`Lowess`] smoother from the TOML smoothing configuration.
pub fn build_smoother(smoothing: &SmoothingToml) -> Result<Lowess> {
    let lowess = Lowess::new()
        .with_frac(smoothing.frac)
        .with_iterations(smoothing.iterations);
    lowess.validate()?;
    Ok(lowess)
}

/// Builds a [`ForecastConfig`] from the TOML forecast configuration.
///
/// An optional global seed is forwarded to uncertainty sampling.
pub fn build_forecast_config(forecast: &ForecastToml, seed: Option<u64>) -> Result<ForecastConfig> {
    let mode: SeasonalityMode = forecast.yearly_seasonality.parse()?;
    let mut model = ModelConfig::new()
        .with_n_changepoints(forecast.n_changepoints)
        .with_changepoint_range(forecast.changepoint_range)
        .with_changepoint_prior_scale(forecast.changepoint_prior_scale)
        .with_yearly_seasonality(mode)
        .with_yearly_order(forecast.yearly_order)
        .with_seasonality_prior_scale(forecast.seasonality_prior_scale)
        .with_interval_width(forecast.interval_width)
        .with_uncertainty_samples(forecast.uncertainty_samples);
    if let Some(s) = seed {
        model = model.with_seed(s);
    }
    let cfg = ForecastConfig::new()
        .with_horizon_days(forecast.horizon_days)
        .with_history_years(forecast.history_years)
        .with_model(model);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds the full [`PipelineConfig`].
pub fn build_pipeline_config(config: &KeelingConfig) -> Result<PipelineConfig> {
    Ok(PipelineConfig::new()
        .with_features(build_feature_config(&config.features)?)
        .with_anomaly(build_anomaly_config(&config.anomaly)?)
        .with_smoothing(build_smoother(&config.smoothing)?)
        .with_forecast(build_forecast_config(&config.forecast, config.seed)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_convert() {
        let cfg = KeelingConfig::default();
        let pipeline = build_pipeline_config(&cfg).unwrap();
        assert_eq!(pipeline.features().short_window_days(), 30);
        assert_eq!(pipeline.anomaly().min_periods(), 1000);
        assert_eq!(pipeline.smoothing().iterations(), 3);
        assert_eq!(pipeline.forecast().horizon_days(), 5475);
        assert_eq!(pipeline.forecast().model().seed(), None);

        let writer = build_writer_config(&cfg.io).unwrap();
        assert_eq!(writer.format(), OutputFormat::Csv);
        assert!(build_reader_config(&cfg.io).is_ok());
    }

    #[test]
    fn seed_reaches_the_model() {
        let cfg = build_forecast_config(&ForecastToml::default(), Some(9)).unwrap();
        assert_eq!(cfg.model().seed(), Some(9));
    }

    #[test]
    fn seasonality_names() {
        let toml = ForecastToml {
            yearly_seasonality: "off".to_string(),
            ..ForecastToml::default()
        };
        let cfg = build_forecast_config(&toml, None).unwrap();
        assert_eq!(cfg.model().yearly_seasonality(), SeasonalityMode::Disabled);

        let toml = ForecastToml {
            yearly_seasonality: "sometimes".to_string(),
            ..ForecastToml::default()
        };
        assert!(build_forecast_config(&toml, None).is_err());
    }

    #[test]
    fn compression_names() {
        assert_eq!(parse_compression("ZSTD").unwrap(), Compression::Zstd);
        assert_eq!(parse_compression("none").unwrap(), Compression::None);
        assert!(parse_compression("gzip").is_err());
    }

    #[test]
    fn invalid_values_are_reported() {
        let io = IoToml {
            format: "xlsx".to_string(),
            ..IoToml::default()
        };
        assert!(build_writer_config(&io).is_err());

        let io = IoToml {
            value_column: "year".to_string(),
            ..IoToml::default()
        };
        assert!(build_reader_config(&io).is_err());

        let anomaly = AnomalyToml {
            min_periods: 5000,
            ..AnomalyToml::default()
        };
        assert!(build_anomaly_config(&anomaly).is_err());
    }
}
