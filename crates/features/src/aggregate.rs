//! Monthly and yearly aggregates.
//!
//! Both aggregate by key into a `BTreeMap`, so output rows come out in
//! chronological key order and only keys with at least one observation
//! appear. Changes are computed over the aggregate series itself, against
//! the previous present month or year.

use std::collections::BTreeMap;

use keeling_calendar::CalendarDate;
use keeling_stats::mean;

use crate::diff::differences;
use crate::error::{FeatureError, check_aligned};

/// One calendar month's aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyAggregate {
    /// Last day of the month, used as the row label.
    pub month_end: CalendarDate,
    pub mean: f64,
    pub diff: Option<f64>,
    pub pct_change: Option<f64>,
}

/// One calendar year's aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyAggregate {
    pub year: i32,
    pub mean: f64,
    pub pct_change: Option<f64>,
}

fn group_means<K: Ord + Copy>(
    dates: &[CalendarDate],
    values: &[f64],
    key: impl Fn(CalendarDate) -> K,
) -> (Vec<K>, Vec<f64>) {
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for (&d, &v) in dates.iter().zip(values) {
        groups.entry(key(d)).or_default().push(v);
    }
    groups.into_iter().map(|(k, vs)| (k, mean(&vs))).unzip()
}

/// Mean per calendar month plus month-over-month changes.
///
/// # Errors
///
/// Returns [`FeatureError`] if the slices are empty or misaligned.
pub fn monthly_aggregates(
    dates: &[CalendarDate],
    values: &[f64],
) -> Result<Vec<MonthlyAggregate>, FeatureError> {
    check_aligned(dates, values)?;

    let (month_ends, means) = group_means(dates, values, CalendarDate::month_end);
    let (diffs, pcts) = differences(&means);

    Ok(month_ends
        .into_iter()
        .zip(means)
        .zip(diffs.into_iter().zip(pcts))
        .map(|((month_end, mean), (diff, pct_change))| MonthlyAggregate {
            month_end,
            mean,
            diff,
            pct_change,
        })
        .collect())
}

/// Mean per calendar year plus year-over-year percentage change.
///
/// # Errors
///
/// Returns [`FeatureError`] if the slices are empty or misaligned.
pub fn yearly_aggregates(
    dates: &[CalendarDate],
    values: &[f64],
) -> Result<Vec<YearlyAggregate>, FeatureError> {
    check_aligned(dates, values)?;

    let (years, means) = group_means(dates, values, CalendarDate::year);
    let (_, pcts) = differences(&means);

    Ok(years
        .into_iter()
        .zip(means)
        .zip(pcts)
        .map(|((year, mean), pct_change)| YearlyAggregate {
            year,
            mean,
            pct_change,
        })
        .collect())
}
