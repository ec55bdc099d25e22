//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, Int32Array, RecordBatch, StringArray,
};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;
use crate::table::{ColumnData, Table};

/// Arrow type of a table column. Only float columns are nullable.
fn data_type(data: &ColumnData) -> (DataType, bool) {
    match data {
        ColumnData::Date(_) => (DataType::Date32, false),
        ColumnData::Int(_) => (DataType::Int32, false),
        ColumnData::Float(_) => (DataType::Float64, true),
        ColumnData::Text(_) => (DataType::Utf8, false),
        ColumnData::Bool(_) => (DataType::Boolean, false),
    }
}

/// Builds the Arrow schema for `table`.
pub(crate) fn build_schema(table: &Table) -> Schema {
    let fields: Vec<Field> = table
        .columns()
        .iter()
        .map(|c| {
            let (dt, nullable) = data_type(&c.data);
            Field::new(c.name.as_str(), dt, nullable)
        })
        .collect();
    Schema::new(fields)
}

/// Converts `table` into a single Arrow [`RecordBatch`].
///
/// The batch schema must match the one returned by [`build_schema`] for the
/// same table; otherwise the call will fail.
pub(crate) fn table_to_record_batch(table: &Table, schema: &Schema) -> Result<RecordBatch, IoError> {
    let columns: Vec<ArrayRef> = table
        .columns()
        .iter()
        .map(|c| -> ArrayRef {
            match &c.data {
                ColumnData::Date(v) => {
                    Arc::new(Date32Array::from(v.iter().map(|d| d.epoch_days()).collect::<Vec<_>>()))
                }
                ColumnData::Int(v) => Arc::new(Int32Array::from(v.clone())),
                ColumnData::Float(v) => Arc::new(Float64Array::from(v.clone())),
                ColumnData::Text(v) => Arc::new(StringArray::from(v.clone())),
                ColumnData::Bool(v) => Arc::new(BooleanArray::from(v.clone())),
            }
        })
        .collect();

    RecordBatch::try_new(Arc::new(schema.clone()), columns).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file cannot be created, or
/// [`IoError::Parquet`] if batch writing or file finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}
