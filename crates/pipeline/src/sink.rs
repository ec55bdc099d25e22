//! Destinations for finished output tables.

use std::path::PathBuf;

use keeling_io::{IoError, Table, WriterConfig, write_table};
use tracing::debug;

/// Receives each output table as soon as its stage completes.
///
/// Sinks are shared across the parallel stages, so they must be `Sync`.
pub trait TableSink: Sync {
    /// Persists one table.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`] if the table cannot be written.
    fn write(&self, table: &Table) -> Result<(), IoError>;
}

/// Writes every table as a file in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    config: WriterConfig,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, config: WriterConfig) -> Self {
        Self {
            dir: dir.into(),
            config,
        }
    }
}

impl TableSink for DirectorySink {
    fn write(&self, table: &Table) -> Result<(), IoError> {
        let path = write_table(&self.dir, table, &self.config)?;
        debug!(path = %path.display(), rows = table.num_rows(), "table written");
        Ok(())
    }
}
