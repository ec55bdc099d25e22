//! Configuration for a full pipeline run.

use keeling_anomaly::AnomalyConfig;
use keeling_features::FeatureConfig;
use keeling_forecast::ForecastConfig;
use keeling_loess::Lowess;

use crate::error::PipelineError;

/// Per-stage settings for [`run_pipeline`](crate::run_pipeline).
///
/// Each stage keeps its own configuration type; this only bundles them.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    features: FeatureConfig,
    anomaly: AnomalyConfig,
    smoothing: Lowess,
    forecast: ForecastConfig,
}

impl PipelineConfig {
    /// Creates a configuration with every stage at its defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_features(mut self, features: FeatureConfig) -> Self {
        self.features = features;
        self
    }

    pub fn with_anomaly(mut self, anomaly: AnomalyConfig) -> Self {
        self.anomaly = anomaly;
        self
    }

    pub fn with_smoothing(mut self, smoothing: Lowess) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_forecast(mut self, forecast: ForecastConfig) -> Self {
        self.forecast = forecast;
        self
    }

    pub fn features(&self) -> &FeatureConfig {
        &self.features
    }

    pub fn anomaly(&self) -> &AnomalyConfig {
        &self.anomaly
    }

    pub fn smoothing(&self) -> &Lowess {
        &self.smoothing
    }

    pub fn forecast(&self) -> &ForecastConfig {
        &self.forecast
    }

    /// Validates every stage configuration, reporting the first failure.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.features.validate()?;
        self.anomaly.validate()?;
        self.smoothing.validate()?;
        self.forecast.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(PipelineConfig::new().validate().is_ok());
    }

    #[test]
    fn reports_failing_stage() {
        let cfg = PipelineConfig::new().with_smoothing(Lowess::new().with_frac(0.0));
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.stage(), "smoothing");

        let cfg = PipelineConfig::new().with_anomaly(AnomalyConfig::new().with_threshold(-1.0));
        assert_eq!(cfg.validate().unwrap_err().stage(), "anomaly");
    }
}
