//! Normalised daily concentration series.

use keeling_calendar::CalendarDate;
use tracing::{debug, warn};

use crate::error::IoError;
use crate::observation::{Observation, RawRow};
use crate::validate;

/// Chronologically ordered, duplicate-free daily concentration series.
///
/// Built from raw rows by [`Series::from_rows`]. Dates are strictly
/// increasing; missing calendar days are not filled in. Columns are stored
/// separately so downstream stages can borrow plain slices.
#[derive(Debug, Clone)]
pub struct Series {
    dates: Vec<CalendarDate>,
    decimal_years: Vec<f64>,
    values: Vec<f64>,
}

impl Series {
    /// Normalise raw rows into an ordered series.
    ///
    /// Every row's (year, month, day) must form a valid Gregorian date and
    /// every value must be finite. Rows are stable-sorted by date; two rows
    /// sharing a date are rejected.
    ///
    /// # Errors
    ///
    /// - [`IoError::EmptyInput`] if `rows` is empty.
    /// - [`IoError::MalformedDate`] for the first row whose date is invalid.
    /// - [`IoError::Validation`] listing every non-finite value.
    /// - [`IoError::DuplicateObservation`] for the first repeated date.
    pub fn from_rows(rows: Vec<RawRow>) -> Result<Self, IoError> {
        if rows.is_empty() {
            return Err(IoError::EmptyInput);
        }

        validate::validate_finite(&rows).finish()?;

        let mut dated: Vec<(usize, Observation)> = rows
            .iter()
            .map(|r| {
                let date = CalendarDate::new(r.year, r.month, r.day).map_err(|_| {
                    IoError::MalformedDate {
                        row: r.row,
                        year: r.year,
                        month: r.month,
                        day: r.day,
                    }
                })?;
                Ok((
                    r.row,
                    Observation {
                        date,
                        decimal_year: r.decimal_year,
                        value: r.value,
                    },
                ))
            })
            .collect::<Result<_, IoError>>()?;

        let already_sorted = dated.windows(2).all(|w| w[0].1.date <= w[1].1.date);
        if !already_sorted {
            warn!("input rows are out of chronological order, sorting");
            dated.sort_by_key(|(_, obs)| obs.date);
        }

        if let Some(pair) = dated.windows(2).find(|w| w[0].1.date == w[1].1.date) {
            let (first, second) = (pair[0].0.min(pair[1].0), pair[0].0.max(pair[1].0));
            return Err(IoError::DuplicateObservation {
                date: pair[0].1.date,
                first_row: first,
                second_row: second,
            });
        }

        let n = dated.len();
        let mut dates = Vec::with_capacity(n);
        let mut decimal_years = Vec::with_capacity(n);
        let mut values = Vec::with_capacity(n);
        for (_, obs) in dated {
            dates.push(obs.date);
            decimal_years.push(obs.decimal_year);
            values.push(obs.value);
        }

        debug!(
            n,
            first = %dates[0],
            last = %dates[n - 1],
            "normalised series"
        );

        Ok(Self {
            dates,
            decimal_years,
            values,
        })
    }

    /// Observation dates, strictly increasing.
    pub fn dates(&self) -> &[CalendarDate] {
        &self.dates
    }

    /// Concentrations aligned with [`dates`](Self::dates).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Decimal-year values aligned with [`dates`](Self::dates).
    pub fn decimal_years(&self) -> &[f64] {
        &self.decimal_years
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always `false`; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Earliest observation date.
    pub fn first_date(&self) -> CalendarDate {
        self.dates[0]
    }

    /// Latest observation date.
    pub fn last_date(&self) -> CalendarDate {
        self.dates[self.dates.len() - 1]
    }
}
