//! CSV reader configuration and orchestration.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::IoError;
use crate::observation::RawRow;
use crate::series::Series;

/// Configuration for reading a daily concentration CSV.
///
/// Use the builder methods (`with_*`) to rename the input columns. The
/// [`Default`] implementation expects a header of
/// `year,month,day,decimal,value` and treats lines starting with `#` as
/// comments.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    year_column: String,
    month_column: String,
    day_column: String,
    decimal_column: String,
    value_column: String,
    /// Comment prefix byte, or `None` to disable comment handling.
    comment: Option<u8>,
    delimiter: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            year_column: "year".into(),
            month_column: "month".into(),
            day_column: "day".into(),
            decimal_column: "decimal".into(),
            value_column: "value".into(),
            comment: Some(b'#'),
            delimiter: b',',
        }
    }
}

impl ReaderConfig {
    /// Set the year column name.
    pub fn with_year_column(mut self, name: impl Into<String>) -> Self {
        self.year_column = name.into();
        self
    }

    /// Set the month column name.
    pub fn with_month_column(mut self, name: impl Into<String>) -> Self {
        self.month_column = name.into();
        self
    }

    /// Set the day column name.
    pub fn with_day_column(mut self, name: impl Into<String>) -> Self {
        self.day_column = name.into();
        self
    }

    /// Set the decimal-year column name.
    pub fn with_decimal_column(mut self, name: impl Into<String>) -> Self {
        self.decimal_column = name.into();
        self
    }

    /// Set the concentration column name.
    pub fn with_value_column(mut self, name: impl Into<String>) -> Self {
        self.value_column = name.into();
        self
    }

    /// Set the comment prefix, or `None` to treat every line as data.
    pub fn with_comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn columns(&self) -> [&str; 5] {
        [
            self.year_column.as_str(),
            self.month_column.as_str(),
            self.day_column.as_str(),
            self.decimal_column.as_str(),
            self.value_column.as_str(),
        ]
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if any column name is empty or two
    /// columns share a name.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = crate::validate::ValidationCollector::new();
        let columns = self.columns();
        for (i, name) in columns.iter().enumerate() {
            if name.trim().is_empty() {
                c.push(format!("column name {} must not be empty", i + 1));
            } else if columns[..i].contains(name) {
                c.push(format!("column name '{name}' is used more than once"));
            }
        }
        c.finish()
    }
}

/// Read and normalise a daily concentration series from a CSV file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist, and any error
/// from [`read_series_from_reader`] otherwise.
pub fn read_series(path: &Path, config: &ReaderConfig) -> Result<Series, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), "reading series");
    let file = std::fs::File::open(path).map_err(|e| IoError::Csv {
        reason: format!("{}: {e}", path.display()),
    })?;
    read_series_from_reader(file, config)
}

/// Read and normalise a daily concentration series from any CSV source.
///
/// # Errors
///
/// - [`IoError::Validation`] if `config` is invalid.
/// - [`IoError::MissingColumn`] if a configured column is absent from the header.
/// - [`IoError::Parse`] if a field is not a number of the expected type.
/// - [`IoError::Csv`] on malformed CSV.
/// - Any normalisation error from [`Series::from_rows`].
pub fn read_series_from_reader<R: Read>(source: R, config: &ReaderConfig) -> Result<Series, IoError> {
    config.validate()?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter)
        .comment(config.comment)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let index_of = |name: &str| -> Result<usize, IoError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| IoError::MissingColumn {
                name: name.to_string(),
            })
    };
    let [year_col, month_col, day_col, decimal_col, value_col] = config.columns();
    let year_idx = index_of(year_col)?;
    let month_idx = index_of(month_col)?;
    let day_idx = index_of(day_col)?;
    let decimal_idx = index_of(decimal_col)?;
    let value_idx = index_of(value_col)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let field = |idx: usize| record.get(idx).unwrap_or("");
        rows.push(RawRow {
            row,
            year: parse_field(field(year_idx), row, year_col)?,
            month: parse_field(field(month_idx), row, month_col)?,
            day: parse_field(field(day_idx), row, day_col)?,
            decimal_year: parse_field(field(decimal_idx), row, decimal_col)?,
            value: parse_field(field(value_idx), row, value_col)?,
        });
    }
    debug!(rows = rows.len(), "parsed input rows");

    Series::from_rows(rows)
}

fn parse_field<T: FromStr>(raw: &str, row: usize, column: &str) -> Result<T, IoError> {
    raw.parse().map_err(|_| IoError::Parse {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}
