//! Dataset Loader Module
//! Fetches the passenger CSV over HTTP and parses it with Polars.

use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;

/// Default source of the Titanic passenger dataset.
pub const TITANIC_CSV_URL: &str =
    "https://raw.githubusercontent.com/datasciencedojo/datasets/master/titanic.csv";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to fetch dataset: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Dataset contains no rows")]
    EmptyDataset,
}

/// Handles the single-shot fetch + parse of the source dataset.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Fetch the CSV from `url` and parse it into a DataFrame.
    pub fn fetch(url: &str) -> Result<DataFrame, LoaderError> {
        log::info!("Fetching dataset from {url}");
        let body = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
        Self::parse(body.to_vec())
    }

    /// Parse raw CSV bytes into a DataFrame.
    pub fn parse(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10_000))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        if df.height() == 0 {
            return Err(LoaderError::EmptyDataset);
        }
        log::info!("Loaded {} rows x {} columns", df.height(), df.width());
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_infers_types_and_preserves_nulls() {
        let csv = b"PassengerId,Survived,Age,Embarked\n1,0,22.0,S\n2,1,,C\n3,1,26.0,\n".to_vec();
        let df = DatasetLoader::parse(csv).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.column("Age").unwrap().null_count(), 1);
        assert_eq!(df.column("Embarked").unwrap().null_count(), 1);
        assert!(df.column("Age").unwrap().dtype().is_float());
    }

    #[test]
    fn parse_rejects_empty_input() {
        let csv = b"PassengerId,Survived\n".to_vec();
        assert!(matches!(
            DatasetLoader::parse(csv),
            Err(LoaderError::EmptyDataset) | Err(LoaderError::Csv(_))
        ));
    }
}
