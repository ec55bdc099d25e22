//! Gregorian date with calendar accessors.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::doy::{DayOfYear, days_in_month};
use crate::error::CalendarError;
use crate::season::Season;

/// Days from 0001-01-01 (CE day 1) to the Unix epoch.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

/// A date in the proleptic Gregorian calendar.
///
/// Thin wrapper over [`chrono::NaiveDate`] exposing the calendar fields the
/// pipeline groups and encodes by. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a new `CalendarDate` from year, month and day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the triple does not name a
    /// Gregorian calendar date (e.g. `2019-02-29` or month 13).
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(CalendarError::InvalidDate { year, month, day })
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.0.month() as u8
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u8 {
        self.0.day() as u8
    }

    /// Returns the leap-aware day-of-year.
    pub fn doy(self) -> DayOfYear {
        DayOfYear::from_ordinal(self.0.ordinal())
    }

    /// Returns the meteorological season of this date's month.
    pub fn season(self) -> Season {
        // Safety: chrono months are always 1..=12.
        Season::from_month(self.month()).expect("CalendarDate always holds a valid month")
    }

    /// Returns the last day of this date's month.
    pub fn month_end(self) -> Self {
        let last = days_in_month(self.year(), self.month()).unwrap_or(28);
        Self(self.0.with_day(u32::from(last)).unwrap_or(self.0))
    }

    /// Returns the date `n` days later.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the result is not representable.
    pub fn add_days(self, n: u64) -> Result<Self, CalendarError> {
        self.0
            .checked_add_days(Days::new(n))
            .map(Self)
            .ok_or_else(|| CalendarError::OutOfRange {
                reason: format!("adding {n} days to {self}"),
            })
    }

    /// Returns the following day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] at the end of chrono's range.
    pub fn next(self) -> Result<Self, CalendarError> {
        self.add_days(1)
    }

    /// Returns the same calendar position `years` years earlier.
    ///
    /// February 29 maps to February 28 when the target year is not a leap
    /// year.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the result is not representable.
    pub fn years_before(self, years: u32) -> Result<Self, CalendarError> {
        self.0
            .checked_sub_months(Months::new(years.saturating_mul(12)))
            .map(Self)
            .ok_or_else(|| CalendarError::OutOfRange {
                reason: format!("subtracting {years} years from {self}"),
            })
    }

    /// Returns the day count from 0001-01-01, which is day 1.
    pub fn days_from_ce(self) -> i32 {
        self.0.num_days_from_ce()
    }

    /// Returns the signed number of days since 1970-01-01.
    pub fn epoch_days(self) -> i32 {
        self.0.num_days_from_ce() - UNIX_EPOCH_CE_DAYS
    }

    /// Returns the signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: Self) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        let date = CalendarDate::new(2000, 1, 1).unwrap();
        assert_eq!(date.year(), 2000);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 1);
        assert_eq!(date.doy().get(), 1);
    }

    #[test]
    fn new_invalid_month() {
        assert_eq!(
            CalendarDate::new(2000, 0, 1).unwrap_err(),
            CalendarError::InvalidDate {
                year: 2000,
                month: 0,
                day: 1
            }
        );
    }

    #[test]
    fn feb_29_only_in_leap_years() {
        assert!(CalendarDate::new(2016, 2, 29).is_ok());
        assert_eq!(
            CalendarDate::new(2019, 2, 29).unwrap_err(),
            CalendarError::InvalidDate {
                year: 2019,
                month: 2,
                day: 29
            }
        );
    }

    #[test]
    fn doy_is_leap_aware() {
        assert_eq!(CalendarDate::new(2015, 3, 1).unwrap().doy().get(), 60);
        assert_eq!(CalendarDate::new(2016, 3, 1).unwrap().doy().get(), 61);
        assert_eq!(CalendarDate::new(2016, 12, 31).unwrap().doy().get(), 366);
    }

    #[test]
    fn season_accessor() {
        assert_eq!(CalendarDate::new(2000, 12, 5).unwrap().season(), Season::Winter);
        assert_eq!(CalendarDate::new(2000, 7, 5).unwrap().season(), Season::Summer);
    }

    #[test]
    fn month_end() {
        let d = CalendarDate::new(2016, 2, 10).unwrap();
        assert_eq!(d.month_end(), CalendarDate::new(2016, 2, 29).unwrap());
        let d = CalendarDate::new(2017, 4, 1).unwrap();
        assert_eq!(d.month_end(), CalendarDate::new(2017, 4, 30).unwrap());
    }

    #[test]
    fn next_year_wrap() {
        let d = CalendarDate::new(2000, 12, 31).unwrap();
        assert_eq!(d.next().unwrap(), CalendarDate::new(2001, 1, 1).unwrap());
    }

    #[test]
    fn years_before_clamps_leap_day() {
        let d = CalendarDate::new(2024, 2, 29).unwrap();
        assert_eq!(
            d.years_before(25).unwrap(),
            CalendarDate::new(1999, 2, 28).unwrap()
        );
        let d = CalendarDate::new(2024, 6, 15).unwrap();
        assert_eq!(
            d.years_before(25).unwrap(),
            CalendarDate::new(1999, 6, 15).unwrap()
        );
    }

    #[test]
    fn days_since() {
        let a = CalendarDate::new(2020, 1, 1).unwrap();
        let b = CalendarDate::new(2021, 1, 1).unwrap();
        assert_eq!(b.days_since(a), 366);
        assert_eq!(a.days_since(b), -366);
    }

    #[test]
    fn epoch_days_around_1970() {
        assert_eq!(CalendarDate::new(1970, 1, 1).unwrap().epoch_days(), 0);
        assert_eq!(CalendarDate::new(1970, 2, 1).unwrap().epoch_days(), 31);
        assert_eq!(CalendarDate::new(1969, 12, 31).unwrap().epoch_days(), -1);
        assert_eq!(CalendarDate::new(2000, 1, 1).unwrap().epoch_days(), 10_957);
    }

    #[test]
    fn display_iso() {
        let d = CalendarDate::new(1998, 4, 7).unwrap();
        assert_eq!(d.to_string(), "1998-04-07");
    }

    #[test]
    fn ord_chronological() {
        let dec31 = CalendarDate::new(1999, 12, 31).unwrap();
        let jan1 = CalendarDate::new(2000, 1, 1).unwrap();
        assert!(dec31 < jan1);
    }
}
