//! Error types for the keeling-calendar crate.

/// Error type for all fallible operations in the keeling-calendar crate.
///
/// Covers validation failures for day-of-year values, month numbers and
/// (year, month, day) triples in the proleptic Gregorian calendar.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=366.
    #[error("invalid day of year: {doy} (must be 1..=366)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a (year, month, day) triple is not a calendar date.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component.
        year: i32,
        /// Month component.
        month: u32,
        /// Day component.
        day: u32,
    },

    /// Returned when date arithmetic leaves the representable range.
    #[error("date out of range: {reason}")]
    OutOfRange {
        /// Description of the overflowing operation.
        reason: String,
    },
}
