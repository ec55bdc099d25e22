//! Date sequence generation.

use crate::date::CalendarDate;
use crate::error::CalendarError;

/// Generates `n_days` consecutive Gregorian dates starting at `start`.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] if the sequence runs past the
/// representable date range.
///
/// # Example
///
/// ```ignore
/// let start = CalendarDate::new(2016, 2, 28).unwrap();
/// let dates = daily_sequence(start, 3)?;
/// // Feb 28, Feb 29, Mar 1
/// ```
pub fn daily_sequence(
    start: CalendarDate,
    n_days: usize,
) -> Result<Vec<CalendarDate>, CalendarError> {
    let mut dates = Vec::with_capacity(n_days);
    if n_days == 0 {
        return Ok(dates);
    }
    dates.push(start);
    let mut current = start;
    for _ in 1..n_days {
        current = current.next()?;
        dates.push(current);
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let start = CalendarDate::new(2000, 1, 1).unwrap();
        assert!(daily_sequence(start, 0).unwrap().is_empty());
    }

    #[test]
    fn single() {
        let start = CalendarDate::new(2000, 6, 15).unwrap();
        let dates = daily_sequence(start, 1).unwrap();
        assert_eq!(dates, vec![start]);
    }

    #[test]
    fn leap_year_length() {
        let start = CalendarDate::new(2016, 1, 1).unwrap();
        let dates = daily_sequence(start, 367).unwrap();
        assert_eq!(dates[365], CalendarDate::new(2016, 12, 31).unwrap());
        assert_eq!(dates[366], CalendarDate::new(2017, 1, 1).unwrap());
    }

    #[test]
    fn strictly_increasing() {
        let start = CalendarDate::new(1999, 12, 30).unwrap();
        let dates = daily_sequence(start, 400).unwrap();
        for pair in dates.windows(2) {
            assert_eq!(pair[1].days_since(pair[0]), 1);
        }
    }
}
