//! Static Chart Renderer
//! Renders the five analysis figures as PNG files with plotters.
//!
//! Fixed order:
//! 1. Age histogram (30 bins) with a Gaussian-KDE overlay
//! 2. Mean age per survival outcome
//! 3. Record counts per passenger class, split by outcome
//! 4. Survival rate per gender
//! 5. Annotated Pearson correlation heatmap

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::prelude::*;
use statrs::distribution::{Continuous, Normal};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::stats::StatsCalculator;

const CHART_SIZE: (u32, u32) = (1000, 700);
const HEATMAP_SIZE: (u32, u32) = (950, 850);
const AGE_BINS: usize = 30;

const HIST_ORANGE: RGBColor = RGBColor(255, 165, 0);
// Two-tone palettes loosely matching viridis / coolwarm / pastel
const SURVIVAL_BAR_COLORS: [RGBColor; 2] = [RGBColor(68, 1, 84), RGBColor(53, 183, 121)];
const CLASS_COUNT_COLORS: [RGBColor; 2] = [RGBColor(59, 76, 192), RGBColor(180, 4, 38)];
const GENDER_BAR_COLORS: [RGBColor; 2] = [RGBColor(161, 201, 244), RGBColor(255, 180, 130)];
// Heatmap gradient endpoints (blue, light grey, red)
const HEAT_COOL: (u8, u8, u8) = (59, 76, 192);
const HEAT_NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const HEAT_WARM: (u8, u8, u8) = (180, 4, 38);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Column '{0}' is required for this chart")]
    MissingColumn(String),
    #[error("No data to plot: {0}")]
    EmptyData(&'static str),
    #[error("Failed to render chart: {0}")]
    Render(String),
}

impl ChartError {
    fn draw<E: std::fmt::Display>(e: E) -> Self {
        ChartError::Render(e.to_string())
    }
}

/// Renders each figure into a PNG under `output_dir`.
pub struct ChartRenderer {
    output_dir: PathBuf,
}

impl ChartRenderer {
    pub fn new(output_dir: &Path) -> Result<Self, ChartError> {
        std::fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Render all five charts in their fixed order.
    pub fn render_all(&self, df: &DataFrame) -> Result<Vec<PathBuf>, ChartError> {
        Ok(vec![
            self.age_distribution(df)?,
            self.mean_age_by_survival(df)?,
            self.class_survival_counts(df)?,
            self.survival_rate_by_sex(df)?,
            self.correlation_heatmap(df)?,
        ])
    }

    /// Histogram of `Age` with a smoothed density overlay scaled to the count axis.
    pub fn age_distribution(&self, df: &DataFrame) -> Result<PathBuf, ChartError> {
        Self::require_column(df, "Age")?;
        let ages = StatsCalculator::column_values(df, "Age")?;
        if ages.is_empty() {
            return Err(ChartError::EmptyData("Age has no non-null values"));
        }

        let low = ages.iter().copied().fold(f64::INFINITY, f64::min).floor();
        let mut high = ages
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
            .ceil();
        if high <= low {
            high = low + 1.0;
        }
        let bin_width = (high - low) / AGE_BINS as f64;

        let mut counts = vec![0usize; AGE_BINS];
        for &age in &ages {
            let idx = (((age - low) / bin_width) as usize).min(AGE_BINS - 1);
            counts[idx] += 1;
        }

        let density_curve = Self::kde_curve(&ages, low, high, bin_width);
        let peak = counts.iter().copied().max().unwrap_or(0) as f64;
        let curve_peak = density_curve
            .iter()
            .map(|&(_, y)| y)
            .fold(0.0f64, f64::max);
        let y_max = peak.max(curve_peak) * 1.1;

        let path = self.output_dir.join("age_distribution.png");
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::draw)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Distribution of Age", ("sans-serif", 30))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(low..high, 0f64..y_max)
            .map_err(ChartError::draw)?;

        chart
            .configure_mesh()
            .x_desc("Age")
            .y_desc("Frequency")
            .draw()
            .map_err(ChartError::draw)?;

        chart
            .draw_series(counts.iter().enumerate().map(|(i, &count)| {
                let x0 = low + i as f64 * bin_width;
                Rectangle::new(
                    [(x0, 0.0), (x0 + bin_width, count as f64)],
                    HIST_ORANGE.mix(0.6).filled(),
                )
            }))
            .map_err(ChartError::draw)?;

        if !density_curve.is_empty() {
            chart
                .draw_series(LineSeries::new(density_curve, HIST_ORANGE.stroke_width(3)))
                .map_err(ChartError::draw)?;
        }

        root.present().map_err(ChartError::draw)?;
        drop(chart);
        drop(root);
        log::info!("Rendered {}", path.display());
        Ok(path)
    }

    /// Bar chart of mean `Age` per `Survived` value, no error bars.
    pub fn mean_age_by_survival(&self, df: &DataFrame) -> Result<PathBuf, ChartError> {
        Self::require_column(df, "Age")?;
        Self::require_column(df, "Survived")?;

        let mut bars = StatsCalculator::mean_by_group(df, "Age", "Survived")?;
        bars.sort_by(|a, b| a.0.cmp(&b.0));
        if bars.is_empty() {
            return Err(ChartError::EmptyData("no survival groups"));
        }

        let path = self.output_dir.join("mean_age_by_survival.png");
        Self::render_bar_chart(
            &path,
            "Survival Rate by Age",
            "Survived (0 = No, 1 = Yes)",
            "Age",
            &bars,
            &SURVIVAL_BAR_COLORS,
        )?;
        log::info!("Rendered {}", path.display());
        Ok(path)
    }

    /// Grouped bar chart: record count per `Pclass`, split by `Survived`.
    pub fn class_survival_counts(&self, df: &DataFrame) -> Result<PathBuf, ChartError> {
        Self::require_column(df, "Pclass")?;
        Self::require_column(df, "Survived")?;

        let counts = StatsCalculator::counts_by_groups(df, "Pclass", "Survived")?;
        let mut classes: Vec<i64> = counts.keys().map(|&(class, _)| class).collect();
        classes.sort_unstable();
        classes.dedup();
        let mut outcomes: Vec<i64> = counts.keys().map(|&(_, outcome)| outcome).collect();
        outcomes.sort_unstable();
        outcomes.dedup();
        if classes.is_empty() {
            return Err(ChartError::EmptyData("no class groups"));
        }

        let y_max = counts.values().copied().max().unwrap_or(0) as f64 * 1.15;
        let x_min = *classes.first().unwrap() as f64 - 0.5;
        let x_max = *classes.last().unwrap() as f64 + 0.5;

        let path = self.output_dir.join("class_survival_counts.png");
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::draw)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Survival Count by Passenger Class", ("sans-serif", 30))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(ChartError::draw)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(classes.len() * 2 + 1)
            .x_label_formatter(&|v: &f64| {
                if (v - v.round()).abs() < 1e-6 {
                    format!("{:.0}", v.round())
                } else {
                    String::new()
                }
            })
            .x_desc("Passenger Class")
            .y_desc("Count")
            .draw()
            .map_err(ChartError::draw)?;

        let sub_width = 0.8 / outcomes.len() as f64;
        for (k, &outcome) in outcomes.iter().enumerate() {
            let color = CLASS_COUNT_COLORS[k % CLASS_COUNT_COLORS.len()];
            let series: Vec<Rectangle<(f64, f64)>> = classes
                .iter()
                .map(|&class| {
                    let count = counts.get(&(class, outcome)).copied().unwrap_or(0) as f64;
                    let x0 = class as f64 - 0.4 + k as f64 * sub_width;
                    Rectangle::new(
                        [(x0 + 0.02, 0.0), (x0 + sub_width - 0.02, count)],
                        color.filled(),
                    )
                })
                .collect();

            chart
                .draw_series(series)
                .map_err(ChartError::draw)?
                .label(format!("Survived = {outcome}"))
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 16))
            .draw()
            .map_err(ChartError::draw)?;

        root.present().map_err(ChartError::draw)?;
        drop(chart);
        drop(root);
        log::info!("Rendered {}", path.display());
        Ok(path)
    }

    /// Bar chart of the survival rate per `Sex`, categories in first-encounter order.
    pub fn survival_rate_by_sex(&self, df: &DataFrame) -> Result<PathBuf, ChartError> {
        Self::require_column(df, "Sex")?;
        Self::require_column(df, "Survived")?;

        let bars = StatsCalculator::mean_by_group(df, "Survived", "Sex")?;
        if bars.is_empty() {
            return Err(ChartError::EmptyData("no gender groups"));
        }

        let path = self.output_dir.join("survival_rate_by_sex.png");
        Self::render_bar_chart(
            &path,
            "Survival Rate by Gender",
            "Gender",
            "Survival Rate",
            &bars,
            &GENDER_BAR_COLORS,
        )?;
        log::info!("Rendered {}", path.display());
        Ok(path)
    }

    /// Heatmap of the Pearson correlation matrix, 2-decimal annotations.
    pub fn correlation_heatmap(&self, df: &DataFrame) -> Result<PathBuf, ChartError> {
        let matrix = StatsCalculator::correlation_matrix(df)?;
        let n = matrix.len();
        if n == 0 {
            return Err(ChartError::EmptyData("no numeric columns"));
        }

        let path = self.output_dir.join("correlation_heatmap.png");
        let root = BitMapBackend::new(&path, HEATMAP_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::draw)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Correlation Heatmap", ("sans-serif", 30))
            .margin(15)
            .x_label_area_size(80)
            .y_label_area_size(110)
            .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())
            .map_err(ChartError::draw)?;

        let columns = &matrix.columns;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(n)
            .y_labels(n)
            .x_label_formatter(&|seg: &SegmentValue<usize>| match seg {
                SegmentValue::CenterOf(i) => columns.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|seg: &SegmentValue<usize>| match seg {
                SegmentValue::CenterOf(j) if *j < n => columns[n - 1 - j].clone(),
                _ => String::new(),
            })
            .draw()
            .map_err(ChartError::draw)?;

        // Row 0 is drawn at the top, matching the conventional orientation.
        chart
            .draw_series((0..n).flat_map(|i| (0..n).map(move |j| (i, j))).map(
                |(row, col)| {
                    let y = n - 1 - row;
                    Rectangle::new(
                        [
                            (SegmentValue::Exact(col), SegmentValue::Exact(y)),
                            (SegmentValue::Exact(col + 1), SegmentValue::Exact(y + 1)),
                        ],
                        Self::heat_color(matrix.get(row, col)).filled(),
                    )
                },
            ))
            .map_err(ChartError::draw)?;

        for row in 0..n {
            for col in 0..n {
                let r = matrix.get(row, col);
                let text_color = if r.abs() > 0.6 { &WHITE } else { &BLACK };
                let style = TextStyle::from(("sans-serif", 16).into_font())
                    .color(text_color)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                chart
                    .draw_series(std::iter::once(Text::new(
                        format!("{r:.2}"),
                        (
                            SegmentValue::CenterOf(col),
                            SegmentValue::CenterOf(n - 1 - row),
                        ),
                        style,
                    )))
                    .map_err(ChartError::draw)?;
            }
        }

        root.present().map_err(ChartError::draw)?;
        drop(chart);
        drop(root);
        log::info!("Rendered {}", path.display());
        Ok(path)
    }

    /// Gaussian KDE (Scott bandwidth) scaled to histogram counts.
    fn kde_curve(values: &[f64], low: f64, high: f64, bin_width: f64) -> Vec<(f64, f64)> {
        let n = values.len();
        let std = StatsCalculator::summarize(values).std;
        let bandwidth = std * (n as f64).powf(-0.2);
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Vec::new();
        }

        let Ok(kernel) = Normal::new(0.0, 1.0) else {
            return Vec::new();
        };

        let steps = 200;
        (0..=steps)
            .map(|s| {
                let x = low + (high - low) * s as f64 / steps as f64;
                let density = values
                    .iter()
                    .map(|v| kernel.pdf((x - v) / bandwidth))
                    .sum::<f64>()
                    / (n as f64 * bandwidth);
                (x, density * n as f64 * bin_width)
            })
            .collect()
    }

    /// Single-category bar chart with centered category labels.
    fn render_bar_chart(
        path: &Path,
        title: &str,
        x_desc: &str,
        y_desc: &str,
        bars: &[(String, f64)],
        palette: &[RGBColor],
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::draw)?;

        let peak = bars.iter().map(|&(_, v)| v).fold(0.0f64, f64::max);
        let y_max = if peak > 0.0 { peak * 1.15 } else { 1.0 };
        let labels: Vec<String> = bars.iter().map(|(label, _)| label.clone()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0..bars.len()).into_segmented(), 0f64..y_max)
            .map_err(ChartError::draw)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .x_label_formatter(&|seg: &SegmentValue<usize>| match seg {
                SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(ChartError::draw)?;

        chart
            .draw_series(bars.iter().enumerate().map(|(i, &(_, value))| {
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0.0),
                        (SegmentValue::Exact(i + 1), value),
                    ],
                    palette[i % palette.len()].filled(),
                );
                bar.set_margin(0, 0, 25, 25);
                bar
            }))
            .map_err(ChartError::draw)?;

        root.present().map_err(ChartError::draw)?;
        Ok(())
    }

    /// Map a correlation in [-1, 1] onto a blue-grey-red gradient.
    fn heat_color(r: f64) -> RGBColor {
        let r = if r.is_nan() { 0.0 } else { r.clamp(-1.0, 1.0) };
        let (from, to, t) = if r < 0.0 {
            (HEAT_COOL, HEAT_NEUTRAL, r + 1.0)
        } else {
            (HEAT_NEUTRAL, HEAT_WARM, r)
        };
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
    }

    fn require_column(df: &DataFrame, name: &str) -> Result<(), ChartError> {
        if df.column(name).is_err() {
            return Err(ChartError::MissingColumn(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_color_hits_gradient_endpoints() {
        assert_eq!(ChartRenderer::heat_color(-1.0), RGBColor(59, 76, 192));
        assert_eq!(ChartRenderer::heat_color(0.0), RGBColor(221, 221, 221));
        assert_eq!(ChartRenderer::heat_color(1.0), RGBColor(180, 4, 38));
    }

    #[test]
    fn kde_curve_is_empty_for_constant_data() {
        let curve = ChartRenderer::kde_curve(&[5.0, 5.0, 5.0], 0.0, 10.0, 1.0);
        assert!(curve.is_empty());
    }

    #[test]
    fn kde_curve_integrates_to_roughly_the_sample_count() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 / 10.0).collect();
        let bin_width = 10.0 / 30.0;
        let curve = ChartRenderer::kde_curve(&values, -5.0, 15.0, bin_width);
        assert_eq!(curve.len(), 201);

        // Riemann sum of (density * n * bin_width) over the step grid.
        let step = 20.0 / 200.0;
        let area: f64 = curve.iter().map(|&(_, y)| y * step).sum();
        let expected = values.len() as f64 * bin_width;
        assert!((area - expected).abs() / expected < 0.05);
    }

    #[test]
    #[ignore = "renders real PNGs; needs a system font for captions"]
    fn charts_render_for_a_small_cleaned_frame() {
        let df = df!(
            "PassengerId" => [1i64, 2, 3, 4, 5, 6],
            "Survived" => [0i64, 1, 1, 0, 1, 0],
            "Pclass" => [3i64, 1, 3, 2, 1, 2],
            "Sex" => ["male", "female", "female", "male", "female", "male"],
            "Age" => [22.0, 38.0, 26.0, 35.0, 27.0, 54.0],
            "Fare" => [7.25, 71.28, 7.92, 53.1, 11.13, 51.86],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path()).unwrap();
        let paths = renderer.render_all(&df).unwrap();

        assert_eq!(paths.len(), 5);
        for path in paths {
            assert!(path.exists());
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test]
    fn missing_column_is_reported() {
        let df = df!("Age" => [22.0, 30.0]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path()).unwrap();

        assert!(matches!(
            renderer.mean_age_by_survival(&df),
            Err(ChartError::MissingColumn(name)) if name == "Survived"
        ));
    }
}
