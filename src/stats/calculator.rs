//! Statistics Calculator Module
//! Descriptive statistics, imputation helpers and the Pearson correlation matrix.

use polars::prelude::*;
use std::collections::HashMap;

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Pairwise Pearson correlations among the numeric columns of a frame.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Handles statistical calculations over the passenger table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Numeric column names, in frame order.
    pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Non-null values of a column, cast to f64.
    pub fn column_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
        let casted = df.column(name)?.cast(&DataType::Float64)?;
        Ok(casted.f64()?.into_iter().flatten().collect())
    }

    /// Values of a column cast to f64, nulls preserved.
    pub fn column_values_nullable(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        let casted = df.column(name)?.cast(&DataType::Float64)?;
        Ok(casted.f64()?.into_iter().collect())
    }

    /// Standard median: mean of the two middle values for even counts.
    pub fn median(values: &[f64]) -> f64 {
        let n = values.len();
        if n == 0 {
            return f64::NAN;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        }
    }

    /// Most frequent value; ties broken by the value encountered first in row order.
    pub fn mode<'a, I>(values: I) -> Option<String>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();

        for value in values.into_iter().flatten() {
            let entry = counts.entry(value).or_insert(0);
            if *entry == 0 {
                order.push(value);
            }
            *entry += 1;
        }

        let mut best: Option<(&str, usize)> = None;
        for value in order {
            let count = counts[value];
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }

        best.map(|(value, _)| value.to_string())
    }

    /// Compute descriptive statistics for an array of values.
    pub fn summarize(values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        ColumnSummary {
            count: n,
            mean,
            std: variance.sqrt(),
            min: sorted[0],
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Build a pandas-style describe table over the numeric columns.
    pub fn describe(df: &DataFrame) -> PolarsResult<DataFrame> {
        let labels = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
        let mut columns: Vec<Column> = vec![Column::new(
            "statistic".into(),
            labels.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )];

        for name in Self::numeric_columns(df) {
            let values = Self::column_values(df, &name)?;
            let summary = Self::summarize(&values);
            columns.push(Column::new(
                name.as_str().into(),
                vec![
                    summary.count as f64,
                    summary.mean,
                    summary.std,
                    summary.min,
                    summary.q25,
                    summary.median,
                    summary.q75,
                    summary.max,
                ],
            ));
        }

        DataFrame::new(columns)
    }

    /// Mean of `value_col` per distinct value of `group_col`.
    /// Groups keep the order in which they first appear in the table.
    pub fn mean_by_group(
        df: &DataFrame,
        value_col: &str,
        group_col: &str,
    ) -> PolarsResult<Vec<(String, f64)>> {
        let groups = df.column(group_col)?;
        let values = Self::column_values_nullable(df, value_col)?;

        let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for (i, value) in values.iter().enumerate() {
            let group = groups.get(i)?;
            if group.is_null() {
                continue;
            }
            let key = group.to_string().trim_matches('"').to_string();
            if !sums.contains_key(&key) {
                order.push(key.clone());
            }
            let entry = sums.entry(key).or_insert((0.0, 0));
            if let Some(v) = value {
                entry.0 += v;
                entry.1 += 1;
            }
        }

        Ok(order
            .into_iter()
            .map(|key| {
                let (sum, count) = sums[&key];
                let mean = if count > 0 {
                    sum / count as f64
                } else {
                    f64::NAN
                };
                (key, mean)
            })
            .collect())
    }

    /// Record counts per `(outer, inner)` integer group pair.
    pub fn counts_by_groups(
        df: &DataFrame,
        outer: &str,
        inner: &str,
    ) -> PolarsResult<HashMap<(i64, i64), usize>> {
        let outer_casted = df.column(outer)?.cast(&DataType::Int64)?;
        let inner_casted = df.column(inner)?.cast(&DataType::Int64)?;
        let outer_ca = outer_casted.i64()?;
        let inner_ca = inner_casted.i64()?;

        let mut counts: HashMap<(i64, i64), usize> = HashMap::new();
        for (o, i) in outer_ca.into_iter().zip(inner_ca.into_iter()) {
            if let (Some(o), Some(i)) = (o, i) {
                *counts.entry((o, i)).or_insert(0) += 1;
            }
        }

        Ok(counts)
    }

    /// Pearson correlation over pairwise-complete observations.
    pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
        let pairs: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys.iter())
            .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
            .collect();

        let n = pairs.len();
        if n < 2 {
            return f64::NAN;
        }

        let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
        let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for (x, y) in &pairs {
            let dx = x - mean_x;
            let dy = y - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        let denom = (var_x * var_y).sqrt();
        if denom == 0.0 {
            return f64::NAN;
        }
        cov / denom
    }

    /// Correlation matrix restricted to numeric columns, diagonal fixed at 1.
    pub fn correlation_matrix(df: &DataFrame) -> PolarsResult<CorrelationMatrix> {
        let columns = Self::numeric_columns(df);
        let series: Vec<Vec<Option<f64>>> = columns
            .iter()
            .map(|name| Self::column_values_nullable(df, name))
            .collect::<PolarsResult<_>>()?;

        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in 0..n {
                values[i][j] = if i == j {
                    1.0
                } else {
                    Self::pearson(&series[i], &series[j])
                };
            }
        }

        Ok(CorrelationMatrix { columns, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn median_of_odd_count_is_middle_value() {
        assert!(approx(StatsCalculator::median(&[22.0, 38.0, 26.0]), 26.0));
    }

    #[test]
    fn median_of_even_count_averages_middle_values() {
        assert!(approx(StatsCalculator::median(&[1.0, 2.0, 3.0, 4.0]), 2.5));
        assert!(StatsCalculator::median(&[]).is_nan());
    }

    #[test]
    fn mode_picks_most_frequent_value() {
        let values = [Some("S"), Some("C"), Some("S"), None, Some("Q")];
        assert_eq!(StatsCalculator::mode(values).as_deref(), Some("S"));
    }

    #[test]
    fn mode_breaks_ties_by_first_encounter() {
        let values = [Some("C"), Some("S"), Some("C"), Some("S")];
        assert_eq!(StatsCalculator::mode(values).as_deref(), Some("C"));
        assert_eq!(StatsCalculator::mode([None, None]), None);
    }

    #[test]
    fn summarize_matches_known_values() {
        let summary = StatsCalculator::summarize(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(summary.count, 4);
        assert!(approx(summary.mean, 2.5));
        assert!(approx(summary.min, 1.0));
        assert!(approx(summary.q25, 1.75));
        assert!(approx(summary.median, 2.5));
        assert!(approx(summary.q75, 3.25));
        assert!(approx(summary.max, 4.0));
        assert!((summary.std - 1.2909944487358056).abs() < 1e-12);
    }

    #[test]
    fn pearson_of_linear_data_is_one() {
        let xs = vec![Some(1.0), Some(2.0), Some(3.0)];
        let ys = vec![Some(2.0), Some(4.0), Some(6.0)];
        assert!(approx(StatsCalculator::pearson(&xs, &ys), 1.0));
    }

    #[test]
    fn pearson_uses_pairwise_complete_observations() {
        let xs = vec![Some(1.0), None, Some(2.0), Some(3.0)];
        let ys = vec![Some(2.0), Some(9.0), None, Some(6.0)];
        // Only rows 0 and 3 are complete; two points always lie on a line.
        assert!(approx(StatsCalculator::pearson(&xs, &ys), 1.0));
    }

    #[test]
    fn mean_by_group_computes_exact_survival_rates() {
        let mut sex: Vec<&str> = Vec::new();
        let mut survived: Vec<i64> = Vec::new();
        for i in 0..50 {
            sex.push("female");
            survived.push(i64::from(i < 37));
        }
        for i in 0..100 {
            sex.push("male");
            survived.push(i64::from(i < 19));
        }
        let df = df!("Sex" => sex, "Survived" => survived).unwrap();

        let rates = StatsCalculator::mean_by_group(&df, "Survived", "Sex").unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].0, "female");
        assert!(approx(rates[0].1, 0.74));
        assert_eq!(rates[1].0, "male");
        assert!(approx(rates[1].1, 0.19));
    }

    #[test]
    fn correlation_matrix_covers_numeric_columns_only() {
        let df = df!(
            "a" => [1.0, 2.0, 3.0],
            "label" => ["x", "y", "z"],
            "b" => [2.0, 4.0, 6.0],
        )
        .unwrap();

        let matrix = StatsCalculator::correlation_matrix(&df).unwrap();
        assert_eq!(matrix.columns, vec!["a".to_string(), "b".to_string()]);
        assert!(approx(matrix.get(0, 0), 1.0));
        assert!(approx(matrix.get(0, 1), 1.0));
        assert!(approx(matrix.get(1, 0), 1.0));
        assert_eq!(matrix.len(), 2);
        assert!(!matrix.is_empty());
    }
}
