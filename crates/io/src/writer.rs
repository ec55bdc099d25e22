//! High-level table writer configuration and orchestration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use parquet::file::properties::WriterProperties;
use tracing::{debug, info};

use crate::csv_write;
use crate::error::IoError;
use crate::parquet_write;
use crate::table::Table;

/// On-disk format of written tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Headed CSV, nulls as empty cells.
    #[default]
    Csv,
    /// Apache Parquet, nulls as nulls.
    Parquet,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" => Ok(Self::Parquet),
            other => Err(IoError::Validation {
                count: 1,
                details: format!("unknown output format '{other}' (expected csv or parquet)"),
            }),
        }
    }
}

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for writing output tables.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    format: OutputFormat,
    /// Parquet only.
    compression: Compression,
    /// Maximum number of rows per Parquet row group.
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the Parquet compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per Parquet row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Returns the output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Write `table` into `dir` as `<table name>.<extension>`.
///
/// Creates `dir` if it does not exist. Returns the path written.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration or the table is
/// invalid, [`IoError::Write`] if the directory or file cannot be created,
/// and [`IoError::Csv`] or [`IoError::Parquet`] on encoding failures.
pub fn write_table(dir: &Path, table: &Table, config: &WriterConfig) -> Result<PathBuf, IoError> {
    config.validate()?;
    table.validate()?;

    std::fs::create_dir_all(dir).map_err(|e| IoError::Write {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    let path = dir.join(format!("{}.{}", table.name(), config.format.extension()));

    match config.format {
        OutputFormat::Csv => csv_write::write_csv(&path, table)?,
        OutputFormat::Parquet => {
            let schema = parquet_write::build_schema(table);
            let props = WriterProperties::builder()
                .set_compression(config.compression.to_parquet()?)
                .set_max_row_group_size(config.row_group_size)
                .build();
            let batch = parquet_write::table_to_record_batch(table, &schema)?;
            parquet_write::write_batches(&path, &[batch], &schema, props)?;
        }
    }

    debug!(columns = table.columns().len(), "table columns");
    info!(path = %path.display(), rows = table.num_rows(), "wrote table");
    Ok(path)
}
