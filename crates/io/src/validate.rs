//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus the input checks applied to
//! raw observation rows.

use crate::error::IoError;
use crate::observation::RawRow;

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Returns `true` when no errors have been recorded.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Check that every concentration and decimal-date value is finite.
///
/// Sentinel placeholders are the cleaning step's concern; this only rejects
/// values no downstream arithmetic can use.
pub(crate) fn validate_finite(rows: &[RawRow]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for row in rows {
        if !row.value.is_finite() {
            c.push(format!(
                "non-finite concentration at row {}: {}",
                row.row, row.value
            ));
        }
        if !row.decimal_year.is_finite() {
            c.push(format!(
                "non-finite decimal date at row {}: {}",
                row.row, row.decimal_year
            ));
        }
    }

    c
}

/// Check that every column of a table has the expected number of rows.
pub(crate) fn validate_column_lengths<'a>(
    expected: usize,
    columns: impl Iterator<Item = (&'a str, usize)>,
) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (name, len) in columns {
        if len != expected {
            c.push(format!("column '{name}' has {len} rows, expected {expected}"));
        }
    }

    c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(row: usize, value: f64) -> RawRow {
        RawRow {
            row,
            year: 2020,
            month: 1,
            day: row as u32,
            decimal_year: 2020.0,
            value,
        }
    }

    #[test]
    fn collector_empty_is_ok() {
        let c = ValidationCollector::new();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.finish().is_ok());
    }

    #[test]
    fn collector_non_empty_is_err_with_correct_count() {
        let mut c = ValidationCollector::new();
        c.push("error one");
        c.push("error two");
        assert_eq!(c.len(), 2);

        match c.finish().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert_eq!(details, "error one; error two");
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn finite_rows_are_valid() {
        let rows = vec![row(1, 400.1), row(2, 400.2)];
        assert!(validate_finite(&rows).finish().is_ok());
    }

    #[test]
    fn non_finite_values_produce_errors() {
        let rows = vec![row(1, f64::NAN), row(2, 400.2), row(3, f64::INFINITY)];
        let c = validate_finite(&rows);
        assert_eq!(c.len(), 2);
        match c.finish().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert!(details.contains("row 1"));
                assert!(details.contains("row 3"));
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn column_length_mismatch() {
        let c = validate_column_lengths(3, [("a", 3), ("b", 2)].into_iter());
        assert_eq!(c.len(), 1);
        let err = c.finish().unwrap_err();
        assert!(err.to_string().contains("column 'b' has 2 rows, expected 3"));
    }
}
