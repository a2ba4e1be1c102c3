//! Titanic EDA - one-shot dataset cleaning, summary statistics & static charts
//!
//! Fetches the passenger CSV, prints an inspection pass, imputes missing
//! values, prints a second inspection pass, renders five charts, prints the
//! carried-over insight text and persists the cleaned table.

mod charts;
mod cli;
mod data;
mod report;
mod stats;

use anyhow::Context;
use clap::Parser;

use charts::ChartRenderer;
use cli::{Args, ChartMode};
use data::{DataCleaner, DatasetLoader, DatasetWriter};
use report::{Inspector, Reporter};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let df = DatasetLoader::fetch(&args.url).context("failed to load the dataset")?;

    Inspector::print_head(&df);
    Inspector::print_info(&df);
    Inspector::print_summary(&df).context("failed to summarize the dataset")?;
    Inspector::print_missing(&df, "Missing Values in Each Column");

    let (mut df, summary) = DataCleaner::clean(df).context("failed to clean the dataset")?;
    log::info!(
        "Cleaned: Age median = {:?}, Embarked mode = {:?}, Cabin dropped = {}",
        summary.age_median,
        summary.embarked_mode,
        summary.dropped_cabin
    );

    Inspector::print_missing(&df, "Missing Values After Cleaning");

    let renderer =
        ChartRenderer::new(&args.chart_dir).context("failed to prepare the chart directory")?;
    let rendered = renderer.render_all(&df).context("failed to render charts")?;
    if args.charts == ChartMode::Show {
        for chart in &rendered {
            open::that(chart)
                .with_context(|| format!("failed to open chart {}", chart.display()))?;
        }
    }

    Reporter::print_insights();

    DatasetWriter::write_csv(&mut df, &args.output)
        .context("failed to write the cleaned dataset")?;
    println!("\nCleaned dataset saved as '{}'.", args.output.display());

    Ok(())
}
