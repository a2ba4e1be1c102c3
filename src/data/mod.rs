//! Data module - loading, cleaning and persisting the passenger table

mod cleaner;
mod loader;
mod writer;

pub use cleaner::{CleanSummary, CleanerError, DataCleaner};
pub use loader::{DatasetLoader, LoaderError, TITANIC_CSV_URL};
pub use writer::{DatasetWriter, WriterError};
