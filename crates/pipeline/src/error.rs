//! Pipeline error types.

use keeling_anomaly::AnomalyError;
use keeling_features::FeatureError;
use keeling_forecast::ForecastError;
use keeling_io::IoError;
use keeling_loess::LoessError;

/// A stage failure, tagged with the stage it came from.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Calendar, rolling or aggregate feature derivation failed.
    #[error("feature stage failed")]
    Features(#[from] FeatureError),

    /// Decomposition or anomaly detection failed.
    #[error("anomaly stage failed")]
    Anomaly(#[from] AnomalyError),

    /// LOESS smoothing failed.
    #[error("smoothing stage failed")]
    Smoothing(#[from] LoessError),

    /// Trend/seasonal model fitting or prediction failed.
    #[error("forecast stage failed")]
    Forecast(#[from] ForecastError),

    /// Writing an output table failed.
    #[error("failed to write table '{table}'")]
    Write {
        table: String,
        #[source]
        source: IoError,
    },

    /// The input series has no observations.
    #[error("input series is empty")]
    EmptySeries,
}

impl PipelineError {
    /// Name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Features(_) => "features",
            Self::Anomaly(_) => "anomaly",
            Self::Smoothing(_) => "smoothing",
            Self::Forecast(_) => "forecast",
            Self::Write { .. } => "write",
            Self::EmptySeries => "input",
        }
    }
}
