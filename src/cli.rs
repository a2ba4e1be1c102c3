//! Command line options.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::data::TITANIC_CSV_URL;

/// One-shot exploratory analysis of the Titanic passenger dataset.
#[derive(Parser, Debug)]
#[command(name = "titanic-eda", version, about)]
pub struct Args {
    /// Source CSV URL
    #[arg(long, default_value = TITANIC_CSV_URL)]
    pub url: String,

    /// Directory the chart PNGs are written into
    #[arg(long, default_value = "charts")]
    pub chart_dir: PathBuf,

    /// Save charts only, or also open each one with the system viewer
    #[arg(long, value_enum, default_value = "save")]
    pub charts: ChartMode,

    /// Path of the cleaned output CSV
    #[arg(long, default_value = "cleaned_titanic_dataset.csv")]
    pub output: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartMode {
    Save,
    Show,
}
