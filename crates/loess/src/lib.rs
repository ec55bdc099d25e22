//! LOWESS smoothing for the daily and yearly CO2 tables.
//!
//! [`Lowess`] implements the [`Smoother`] trait; the pipeline only talks to
//! the trait, so another local regression can be dropped in.
//!
//! - [`smooth_per_year`] fits each calendar year on its own over day of year.
//! - [`smooth_series`] fits a series with undefined points, such as the
//!   yearly percentage change whose first entry has no predecessor.

mod apply;
mod error;
mod lowess;

pub use apply::{smooth_per_year, smooth_series};
pub use error::LoessError;
pub use lowess::{Lowess, Smoother};
