//! Dataset Writer Module
//! Persists the cleaned table as a plain CSV, header included, no index column.

use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Failed to create output file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Handles the single-shot CSV write of the cleaned table.
pub struct DatasetWriter;

impl DatasetWriter {
    /// Write `df` to `path`, overwriting any existing file.
    /// The file handle lives only for the duration of the write.
    pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), WriterError> {
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).include_header(true).finish(df)?;
        log::info!("Wrote {} rows to {}", df.height(), path.display());
        Ok(())
    }
}
