//! Descriptive statistics for numeric columns.
//!
//! One pass computes mean, min, max, population standard deviation, and the
//! 2-sigma outlier count. Zero-row inputs produce all-zero statistics rather
//! than NaN, so downstream rendering never sees a poisoned value.

use serde::Serialize;

use crate::dataset::Dataset;

/// A value is an outlier when it deviates from the mean by more than this
/// many population standard deviations.
pub const OUTLIER_SIGMA: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStat {
    pub column: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub outlier_count: usize,
}

impl ColumnStat {
    fn zeroed(column: &str) -> Self {
        Self {
            column: column.to_string(),
            mean: 0.0,
            min: 0.0,
            max: 0.0,
            std_dev: 0.0,
            outlier_count: 0,
        }
    }
}

/// Profiles a slice of values. Empty input yields zeroed statistics.
pub fn describe_values(column: &str, values: &[f64]) -> ColumnStat {
    if values.is_empty() {
        return ColumnStat::zeroed(column);
    }
    let count = values.len() as f64;
    let sum: f64 = values.iter().sum();
    let mean = sum / count;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    let std_dev = variance.max(0.0).sqrt();
    let outlier_count = values
        .iter()
        .filter(|&&v| (v - mean).abs() > OUTLIER_SIGMA * std_dev)
        .count();
    ColumnStat {
        column: column.to_string(),
        mean,
        min,
        max,
        std_dev,
        outlier_count,
    }
}

/// Profiles one numeric column of the dataset. Returns `None` when the
/// column does not exist or was classified categorical.
pub fn describe(dataset: &Dataset, column: &str) -> Option<ColumnStat> {
    if !dataset.is_numeric(column) {
        return None;
    }
    let index = dataset.column_index(column)?;
    Some(describe_values(column, &dataset.numeric_values(index)))
}

/// Profiles every numeric column in header order.
pub fn describe_numeric_columns(dataset: &Dataset) -> Vec<ColumnStat> {
    dataset
        .numeric_columns
        .iter()
        .filter_map(|column| describe(dataset, column))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn describe_values_matches_known_quantities() {
        let stat = describe_values("v", &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(stat.mean, 3.0);
        assert_eq!(stat.min, 1.0);
        assert_eq!(stat.max, 5.0);
        // Population standard deviation of 1..5.
        assert!((stat.std_dev - 1.4142135623730951).abs() < 1e-12);
        assert_eq!(stat.outlier_count, 0);
    }

    #[test]
    fn outlier_rule_is_strictly_greater_than_two_sigma() {
        // |100 - 22| = 78 sits just inside 2 sigma (~78.026), so this set
        // has no outlier under the strict rule.
        let stat = describe_values("v", &[1.0, 2.0, 3.0, 4.0, 100.0]);
        assert_eq!(stat.mean, 22.0);
        assert_eq!(stat.outlier_count, 0);
    }

    #[test]
    fn single_extreme_value_counts_as_the_only_outlier() {
        // Here 2 sigma is ~72.3 and 100 deviates by ~80.8; 1..5 stay inside.
        let stat = describe_values("v", &[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);
        assert_eq!(stat.outlier_count, 1);
        let band = OUTLIER_SIGMA * stat.std_dev;
        assert!((100.0 - stat.mean).abs() > band);
        assert!((5.0f64 - stat.mean).abs() <= band);
    }

    #[test]
    fn empty_input_yields_zeroed_statistics() {
        let stat = describe_values("v", &[]);
        assert_eq!(stat, ColumnStat::zeroed("v"));
    }

    #[test]
    fn identical_values_produce_no_outliers() {
        let stat = describe_values("v", &[7.0; 40]);
        assert_eq!(stat.std_dev, 0.0);
        assert_eq!(stat.outlier_count, 0);
    }

    #[test]
    fn describe_refuses_categorical_columns() {
        let dataset = Dataset::from_raw(
            vec!["region".to_string(), "revenue".to_string()],
            vec![
                vec!["East".to_string(), "100".to_string()],
                vec!["West".to_string(), "200".to_string()],
            ],
        )
        .expect("dataset");
        assert!(describe(&dataset, "region").is_none());
        assert!(describe(&dataset, "missing").is_none());
        let stat = describe(&dataset, "revenue").expect("stat");
        assert_eq!(stat.mean, 150.0);
    }
}
