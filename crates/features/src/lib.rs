//! Daily, monthly and yearly features of a daily CO2 series.
//!
//! All functions take the normalised series as aligned `&[CalendarDate]` and
//! `&[f64]` slices and return freshly built column vectors; nothing is
//! updated in place.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  calendar     │────▶│  daily         │     │  aggregate       │
//!  │  (doy, sin)   │     │  (rolling, Δ)  │     │  (month, year)   │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use keeling_calendar::CalendarDate;
//! use keeling_features::{FeatureConfig, derive_daily};
//!
//! let dates = [
//!     CalendarDate::new(2020, 1, 1).unwrap(),
//!     CalendarDate::new(2020, 1, 2).unwrap(),
//! ];
//! let features = derive_daily(&dates, &[410.0, 411.0], &FeatureConfig::new()).unwrap();
//! assert_eq!(features.avg_short[1], 410.5);
//! ```

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod daily;
pub mod diff;
pub mod error;

pub use aggregate::{MonthlyAggregate, YearlyAggregate, monthly_aggregates, yearly_aggregates};
pub use calendar::{CalendarFeatures, calendar_features};
pub use config::FeatureConfig;
pub use daily::{DailyFeatures, derive_daily};
pub use diff::differences;
pub use error::FeatureError;
