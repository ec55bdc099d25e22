//! Low-level CSV table writing.

use std::path::Path;

use crate::error::IoError;
use crate::table::Table;

/// Writes `table` to `path` as a headed CSV file.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file cannot be created, or
/// [`IoError::Csv`] if a record cannot be written.
pub(crate) fn write_csv(path: &Path, table: &Table) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(table.columns().iter().map(|c| c.name.as_str()))?;
    for row in 0..table.num_rows() {
        writer.write_record(table.columns().iter().map(|c| c.data.cell(row)))?;
    }

    writer.flush().map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(())
}
