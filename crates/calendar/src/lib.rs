//! # keeling-calendar
//!
//! Gregorian date arithmetic for daily CO₂ observations.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["(year, month, day)"] -->|"CalendarDate::new()"| B["CalendarDate"]
//!     B -->|".doy()"| C["DayOfYear (1..=366)"]
//!     B -->|".season()"| D["Season"]
//!     C -->|"cyclical_encoding()"| E["(sin_day, cos_day)"]
//!     B -->|"daily_sequence()"| F["Vec of CalendarDate"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use keeling_calendar::{CalendarDate, Season, cyclical_encoding, daily_sequence};
//!
//! let date = CalendarDate::new(2016, 3, 1).unwrap();
//! assert_eq!(date.doy().get(), 61); // leap year
//! assert_eq!(date.season(), Season::Spring);
//!
//! let (sin_day, cos_day) = cyclical_encoding(date.doy());
//! let horizon = daily_sequence(date.next(), 5475);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype and leap-year helpers |
//! | `date` | Gregorian date with calendar accessors |
//! | `season` | Meteorological season classification |
//! | `cyclical` | Sine/cosine day-of-year encoding |
//! | `sequence` | Consecutive date sequence generation |
//! | `error` | Error types |

mod cyclical;
mod date;
mod doy;
mod error;
mod season;
mod sequence;

pub use cyclical::{ENCODING_PERIOD, cyclical_encoding};
pub use date::CalendarDate;
pub use doy::{DayOfYear, days_in_year, is_leap_year};
pub use error::CalendarError;
pub use season::Season;
pub use sequence::daily_sequence;
