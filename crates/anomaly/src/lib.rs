//! Seasonal decomposition and z-score anomaly detection for daily CO2.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  decompose    │────▶│  signal        │────▶│    annotate      │
//!  │  (year, doy)  │     │  (yearly, roll)│     │  (event table)   │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! Both signals flag a row when `|z|` strictly exceeds the threshold. An
//! undefined z-score (too few observations, or a standard deviation at or
//! below `min_std`) is never flagged.
//!
//! # Quick start
//!
//! ```rust
//! use keeling_anomaly::{AnomalyConfig, is_anomalous};
//!
//! let config = AnomalyConfig::new();
//! assert!(config.validate().is_ok());
//! assert!(!is_anomalous(Some(2.0), config.threshold()));
//! ```

pub mod annotate;
pub mod config;
pub mod decompose;
pub mod detect;
pub mod error;
pub mod signal;

pub use annotate::{Annotation, EVENT_RULES, EventRule, GENERIC_EXPLANATION, annotate};
pub use config::AnomalyConfig;
pub use decompose::{Decomposition, decompose};
pub use detect::{AnomalyFrame, detect_anomalies};
pub use error::AnomalyError;
pub use signal::{Signal, is_anomalous, rolling_signal, yearly_signal};
