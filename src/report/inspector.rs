//! Inspector Module
//! Read-only views of the table, printed to stdout. Never mutates data.

use polars::prelude::*;

use crate::stats::StatsCalculator;

pub struct Inspector;

impl Inspector {
    /// Print the first five records.
    pub fn print_head(df: &DataFrame) {
        println!("First few rows of the dataset:");
        println!("{}", df.head(Some(5)));
    }

    /// Print per-column dtype and non-null count, plus overall shape.
    pub fn print_info(df: &DataFrame) {
        println!("\nDataset Information:");
        println!("{} rows x {} columns", df.height(), df.width());
        for (i, column) in df.get_columns().iter().enumerate() {
            let non_null = column.len() - column.null_count();
            println!(
                " {:>2}  {:<14} {:>5} non-null  {}",
                i,
                column.name(),
                non_null,
                column.dtype()
            );
        }
    }

    /// Print count/mean/std/min/quartiles/max for every numeric column.
    pub fn print_summary(df: &DataFrame) -> PolarsResult<()> {
        println!("\nSummary Statistics:");
        println!("{}", StatsCalculator::describe(df)?);
        Ok(())
    }

    /// Print per-column null counts under the given heading.
    pub fn print_missing(df: &DataFrame, heading: &str) {
        println!("\n{heading}:");
        println!("{}", df.null_count());
    }
}
