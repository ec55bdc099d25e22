//! Raw input rows and normalised observations.

use keeling_calendar::CalendarDate;

/// One data row as read from the input, before date construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based data row number (header excluded).
    pub row: usize,
    /// Calendar year.
    pub year: i32,
    /// Month (1..=12 when well formed).
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Decimal-year value, passed through unchanged.
    pub decimal_year: f64,
    /// Measured concentration in ppm.
    pub value: f64,
}

/// A single dated concentration measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Observation date.
    pub date: CalendarDate,
    /// Decimal-year value from the input.
    pub decimal_year: f64,
    /// Concentration in ppm.
    pub value: f64,
}
