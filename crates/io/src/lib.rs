//! # keeling-io
//!
//! Read daily CO2 observations from CSV and write derived tables to CSV or
//! Parquet. Bridges external file formats into the `&[f64]` and
//! `&[CalendarDate]` slices the analysis crates work on.
//!
//! Reading goes through [`ReaderConfig`] and [`read_series`], which parse,
//! validate and normalise the rows into a [`Series`]. Writing goes through
//! [`Table`] and [`write_table`].

mod csv_write;
mod error;
mod observation;
mod parquet_write;
mod reader;
mod series;
mod table;
mod validate;
mod writer;

pub use error::IoError;
pub use observation::{Observation, RawRow};
pub use reader::{ReaderConfig, read_series, read_series_from_reader};
pub use series::Series;
pub use table::{Column, ColumnData, Table};
pub use writer::{Compression, OutputFormat, WriterConfig, write_table};
