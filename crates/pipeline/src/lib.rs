//! Orchestration of the daily CO2 pipeline.
//!
//! [`run_pipeline`] takes a normalised [`Series`](keeling_io::Series), runs
//! the feature, smoothing, anomaly and forecast stages, and passes each of
//! the six output tables to a [`TableSink`] as soon as it is complete.
//!
//! ```text
//!  series ──┬── features ──┬── smoothing ──┐
//!           │              └── anomalies ──┴── 5 tables
//!           └── forecast ───────────────────── co2_forecast
//! ```

pub mod config;
pub mod error;
pub mod run;
pub mod sink;
pub mod tables;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use run::{PipelineSummary, TableSummary, run_pipeline};
pub use sink::{DirectorySink, TableSink};
