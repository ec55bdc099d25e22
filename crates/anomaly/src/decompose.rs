//! Yearly detrending and day-of-year seasonal decomposition.
//!
//! Each step aggregates into a lookup map keyed by group (year, then day of
//! year) and then joins the group value back onto every row by key.

use std::collections::BTreeMap;

use keeling_calendar::CalendarDate;

/// Per-row decomposition columns, aligned with the input series.
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// Mean concentration of the row's calendar year.
    pub yearly_mean: Vec<f64>,
    /// `concentration − yearly_mean`.
    pub detrended: Vec<f64>,
    /// Mean of `detrended` over all rows sharing the row's day of year.
    pub seasonal_component: Vec<f64>,
    /// `concentration − seasonal_component`.
    pub deseasoned: Vec<f64>,
}

/// Group mean of `values` by `key`, as a lookup map.
pub(crate) fn group_means<K: Ord>(
    keys: impl Iterator<Item = K>,
    values: &[f64],
) -> BTreeMap<K, f64> {
    let mut sums: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for (k, &v) in keys.zip(values) {
        let entry = sums.entry(k).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect()
}

/// Joins a group lookup back onto rows.
fn join<K: Ord>(keys: impl Iterator<Item = K>, lookup: &BTreeMap<K, f64>) -> Vec<f64> {
    // Every key was inserted while building the lookup from the same rows.
    keys.map(|k| lookup.get(&k).copied().unwrap_or(f64::NAN))
        .collect()
}

/// Detrends by yearly mean, then removes the day-of-year seasonal profile.
///
/// Callers guarantee `dates` and `values` are aligned.
pub fn decompose(dates: &[CalendarDate], values: &[f64]) -> Decomposition {
    let years = || dates.iter().map(|d| d.year());
    let doys = || dates.iter().map(|d| d.doy().get());

    let year_means = group_means(years(), values);
    let yearly_mean = join(years(), &year_means);
    let detrended: Vec<f64> = values
        .iter()
        .zip(&yearly_mean)
        .map(|(v, m)| v - m)
        .collect();

    let doy_means = group_means(doys(), &detrended);
    let seasonal_component = join(doys(), &doy_means);
    let deseasoned: Vec<f64> = values
        .iter()
        .zip(&seasonal_component)
        .map(|(v, s)| v - s)
        .collect();

    Decomposition {
        yearly_mean,
        detrended,
        seasonal_component,
        deseasoned,
    }
}
