//! Error types for keeling-io.

use std::path::PathBuf;

use keeling_calendar::CalendarDate;

/// Error type for all fallible operations in the keeling-io crate.
///
/// Covers I/O and format failures from CSV and Parquet, structural
/// violations of the input contract (malformed dates, duplicate
/// observations, unparseable fields), and accumulated validation problems.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV library.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Returned when an output file or directory cannot be created or written.
    #[error("cannot write {}: {reason}", path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a configured column is missing from the input header.
    #[error("column '{name}' not found in input header")]
    MissingColumn {
        /// Name of the missing column.
        name: String,
    },

    /// Returned when a field cannot be parsed as the expected type.
    #[error("row {row}: cannot parse column '{column}' value {value:?}")]
    Parse {
        /// 1-based data row number (header excluded).
        row: usize,
        /// Column name.
        column: String,
        /// Raw field text.
        value: String,
    },

    /// Returned when a (year, month, day) triple is not a calendar date.
    #[error("row {row}: malformed date {year:04}-{month:02}-{day:02}")]
    MalformedDate {
        /// 1-based data row number (header excluded).
        row: usize,
        /// Year component.
        year: i32,
        /// Month component.
        month: u32,
        /// Day component.
        day: u32,
    },

    /// Returned when two rows claim the same date.
    #[error("duplicate observation for {date}: rows {first_row} and {second_row}")]
    DuplicateObservation {
        /// The duplicated date.
        date: CalendarDate,
        /// Row number of the first occurrence.
        first_row: usize,
        /// Row number of the second occurrence.
        second_row: usize,
    },

    /// Returned when the input contains no data rows.
    #[error("input contains no observations")]
    EmptyInput,

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn display_missing_column() {
        let err = IoError::MissingColumn {
            name: "value".to_string(),
        };
        assert_eq!(err.to_string(), "column 'value' not found in input header");
    }

    #[test]
    fn display_parse() {
        let err = IoError::Parse {
            row: 12,
            column: "value".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "row 12: cannot parse column 'value' value \"abc\""
        );
    }

    #[test]
    fn display_malformed_date() {
        let err = IoError::MalformedDate {
            row: 3,
            year: 2019,
            month: 2,
            day: 29,
        };
        assert_eq!(err.to_string(), "row 3: malformed date 2019-02-29");
    }

    #[test]
    fn display_duplicate_observation() {
        let err = IoError::DuplicateObservation {
            date: CalendarDate::new(2020, 5, 1).unwrap(),
            first_row: 4,
            second_row: 9,
        };
        assert_eq!(
            err.to_string(),
            "duplicate observation for 2020-05-01: rows 4 and 9"
        );
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "non-finite value at row 1; non-finite value at row 7".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): non-finite value at row 1; non-finite value at row 7"
        );
    }

    #[test]
    fn display_write() {
        let err = IoError::Write {
            path: PathBuf::from("/out/co2_daily_features.csv"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot write /out/co2_daily_features.csv: permission denied"
        );
    }

    #[test]
    fn from_parquet_error() {
        let pq_err = parquet::errors::ParquetError::General("test pq error".to_string());
        let err: IoError = pq_err.into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("test pq error"));
    }

    #[test]
    fn from_arrow_error() {
        let arrow_err = arrow::error::ArrowError::SchemaError("bad schema".to_string());
        let err: IoError = arrow_err.into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("bad schema"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
