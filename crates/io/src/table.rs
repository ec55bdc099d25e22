//! Column-oriented output tables.

use keeling_calendar::CalendarDate;

use crate::error::IoError;
use crate::validate;

/// Typed values of one output column.
///
/// Float columns are nullable: `None` marks an undefined feature and is
/// written as an empty cell (CSV) or a null (Parquet).
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Date(Vec<CalendarDate>),
    Int(Vec<i32>),
    Float(Vec<Option<f64>>),
    Text(Vec<String>),
    Bool(Vec<bool>),
}

impl ColumnData {
    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        match self {
            Self::Date(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::Bool(v) => v.len(),
        }
    }

    /// Returns `true` when the column holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render one cell as CSV text.
    pub(crate) fn cell(&self, row: usize) -> String {
        match self {
            Self::Date(v) => v[row].to_string(),
            Self::Int(v) => v[row].to_string(),
            Self::Float(v) => v[row].map(|x| x.to_string()).unwrap_or_default(),
            Self::Text(v) => v[row].clone(),
            Self::Bool(v) => v[row].to_string(),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// A named, rectangular table ready to be written.
///
/// Built with the `with_*` column methods, then checked by
/// [`Table::validate`] before writing.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table whose file stem is `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    fn with_column(mut self, name: impl Into<String>, data: ColumnData) -> Self {
        self.columns.push(Column {
            name: name.into(),
            data,
        });
        self
    }

    /// Append a date column.
    pub fn with_dates(self, name: impl Into<String>, values: Vec<CalendarDate>) -> Self {
        self.with_column(name, ColumnData::Date(values))
    }

    /// Append an integer column.
    pub fn with_ints(self, name: impl Into<String>, values: Vec<i32>) -> Self {
        self.with_column(name, ColumnData::Int(values))
    }

    /// Append a nullable float column.
    pub fn with_floats(self, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.with_column(name, ColumnData::Float(values))
    }

    /// Append a float column with every value present.
    pub fn with_values(self, name: impl Into<String>, values: &[f64]) -> Self {
        self.with_floats(name, values.iter().copied().map(Some).collect())
    }

    /// Append a text column.
    pub fn with_text(self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.with_column(name, ColumnData::Text(values))
    }

    /// Append a boolean column.
    pub fn with_bools(self, name: impl Into<String>, values: Vec<bool>) -> Self {
        self.with_column(name, ColumnData::Bool(values))
    }

    /// File stem of the table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in output order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.data)
    }

    /// Number of rows (length of the first column, 0 when there are none).
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    /// Check that the table is rectangular and has unique column names.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every offending column.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = validate::validate_column_lengths(
            self.num_rows(),
            self.columns.iter().map(|c| (c.name.as_str(), c.data.len())),
        );
        for (i, col) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|prev| prev.name == col.name) {
                c.push(format!("column '{}' appears more than once", col.name));
            }
        }
        c.finish()
    }
}
