//! Data Cleaner Module
//! Fixed imputation policy: median-fill `Age`, mode-fill `Embarked`, drop `Cabin`.

use polars::prelude::*;
use thiserror::Error;

use crate::stats::StatsCalculator;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Expected column '{0}' is missing")]
    MissingColumn(&'static str),
}

/// What the cleaning pass actually did, for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanSummary {
    pub age_median: Option<f64>,
    pub embarked_mode: Option<String>,
    pub dropped_cabin: bool,
}

/// Applies the imputation policy exactly once, in a fixed order.
pub struct DataCleaner;

impl DataCleaner {
    pub fn clean(df: DataFrame) -> Result<(DataFrame, CleanSummary), CleanerError> {
        let (df, age_median) = Self::fill_age_with_median(df)?;
        let (df, embarked_mode) = Self::fill_embarked_with_mode(df)?;
        let (df, dropped_cabin) = Self::drop_cabin(df)?;

        Ok((
            df,
            CleanSummary {
                age_median,
                embarked_mode,
                dropped_cabin,
            },
        ))
    }

    /// Fill null `Age` cells with the median of the non-null values.
    fn fill_age_with_median(df: DataFrame) -> Result<(DataFrame, Option<f64>), CleanerError> {
        if df.column("Age").is_err() {
            return Err(CleanerError::MissingColumn("Age"));
        }

        let ages = StatsCalculator::column_values(&df, "Age")?;
        if ages.is_empty() {
            // Nothing to derive a median from; leave the column untouched.
            return Ok((df, None));
        }

        let median = StatsCalculator::median(&ages);
        let df = df
            .lazy()
            .with_column(col("Age").fill_null(lit(median)))
            .collect()?;
        Ok((df, Some(median)))
    }

    /// Fill null `Embarked` cells with the most frequent value.
    fn fill_embarked_with_mode(df: DataFrame) -> Result<(DataFrame, Option<String>), CleanerError> {
        let mode = {
            let column = df
                .column("Embarked")
                .map_err(|_| CleanerError::MissingColumn("Embarked"))?;
            StatsCalculator::mode(column.str()?.into_iter())
        };
        let Some(mode) = mode else {
            return Ok((df, None));
        };

        let df = df
            .lazy()
            .with_column(col("Embarked").fill_null(lit(mode.as_str())))
            .collect()?;
        Ok((df, Some(mode)))
    }

    /// Drop the `Cabin` column; a no-op when it is already absent.
    fn drop_cabin(df: DataFrame) -> Result<(DataFrame, bool), CleanerError> {
        let has_cabin = df.get_column_names().iter().any(|name| *name == "Cabin");
        if !has_cabin {
            return Ok((df, false));
        }
        Ok((df.drop("Cabin")?, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            "PassengerId" => [1i64, 2, 3, 4, 5],
            "Survived" => [0i64, 1, 1, 0, 1],
            "Age" => [Some(22.0), None, Some(38.0), None, Some(26.0)],
            "Embarked" => [Some("S"), Some("C"), Some("S"), None, Some("Q")],
            "Cabin" => [Some("C85"), None, None, Some("E46"), None],
        )
        .unwrap()
    }

    #[test]
    fn fills_missing_ages_with_median() {
        let (cleaned, summary) = DataCleaner::clean(sample_frame()).unwrap();

        assert_eq!(summary.age_median, Some(26.0));
        let ages = StatsCalculator::column_values(&cleaned, "Age").unwrap();
        assert_eq!(ages, vec![22.0, 26.0, 38.0, 26.0, 26.0]);
        assert_eq!(cleaned.column("Age").unwrap().null_count(), 0);
    }

    #[test]
    fn fills_missing_embarked_with_mode() {
        let (cleaned, summary) = DataCleaner::clean(sample_frame()).unwrap();

        assert_eq!(summary.embarked_mode.as_deref(), Some("S"));
        let embarked: Vec<Option<&str>> = cleaned
            .column("Embarked")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            embarked,
            vec![Some("S"), Some("C"), Some("S"), Some("S"), Some("Q")]
        );
    }

    #[test]
    fn drops_cabin_and_keeps_column_order() {
        let (cleaned, summary) = DataCleaner::clean(sample_frame()).unwrap();

        assert!(summary.dropped_cabin);
        let names: Vec<String> = cleaned
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["PassengerId", "Survived", "Age", "Embarked"]);
    }

    #[test]
    fn cleaning_twice_changes_nothing() {
        let (cleaned, _) = DataCleaner::clean(sample_frame()).unwrap();
        let (recleaned, summary) = DataCleaner::clean(cleaned.clone()).unwrap();

        assert!(cleaned.equals_missing(&recleaned));
        assert!(!summary.dropped_cabin);
    }

    #[test]
    fn missing_cabin_is_a_no_op() {
        let df = sample_frame().drop("Cabin").unwrap();
        let (cleaned, summary) = DataCleaner::clean(df).unwrap();

        assert!(!summary.dropped_cabin);
        assert_eq!(cleaned.width(), 4);
    }

    #[test]
    fn missing_age_column_is_fatal() {
        let df = sample_frame().drop("Age").unwrap();
        assert!(matches!(
            DataCleaner::clean(df),
            Err(CleanerError::MissingColumn("Age"))
        ));
    }

    #[test]
    fn fills_are_no_ops_without_missing_values() {
        let df = df!(
            "PassengerId" => [1i64, 2],
            "Age" => [22.0, 38.0],
            "Embarked" => ["S", "C"],
        )
        .unwrap();

        let (cleaned, summary) = DataCleaner::clean(df.clone()).unwrap();
        assert!(df.equals(&cleaned));
        assert_eq!(summary.age_median, Some(30.0));
        assert_eq!(summary.embarked_mode.as_deref(), Some("S"));
        assert!(!summary.dropped_cabin);
    }

    #[test]
    fn all_null_embarked_is_left_untouched() {
        let df = df!(
            "Age" => [22.0, 38.0],
            "Embarked" => [None::<&str>, None],
        )
        .unwrap();

        let (cleaned, summary) = DataCleaner::clean(df).unwrap();
        assert_eq!(summary.embarked_mode, None);
        assert_eq!(cleaned.column("Embarked").unwrap().null_count(), 2);
    }
}
