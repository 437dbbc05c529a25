//! Insight synthesis: the ordered list of short findings the dashboard's
//! insight cards render.
//!
//! The list is deterministic and order-fixed: completeness, numeric summary,
//! categorical summary, tip. An insight whose prerequisite is missing (no
//! cells, no numeric column, no categorical column) is omitted outright;
//! nothing here can fail the whole synthesis.

use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::{dataset::Dataset, stats};

/// Completeness below this percentage downgrades the quality insight to a
/// warning.
pub const COMPLETENESS_TARGET: f64 = 95.0;
/// Row count beyond which the tip suggests segmenting instead of comparing.
pub const LARGE_DATASET_ROWS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKind {
    Quality,
    NumericSummary,
    CategoricalSummary,
    Tip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Success => "success",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

/// Produces the ordered findings for a dataset.
pub fn synthesize(dataset: &Dataset) -> Vec<Insight> {
    let mut insights = Vec::new();
    if let Some(insight) = completeness_insight(dataset) {
        insights.push(insight);
    }
    if let Some(insight) = numeric_insight(dataset) {
        insights.push(insight);
    }
    if let Some(insight) = categorical_insight(dataset) {
        insights.push(insight);
    }
    insights.push(tip_insight(dataset));
    insights
}

fn completeness_insight(dataset: &Dataset) -> Option<Insight> {
    let total_cells = dataset.row_count() * dataset.headers.len();
    if total_cells == 0 {
        return None;
    }
    let empty_cells = dataset
        .rows
        .iter()
        .flat_map(|row| row.iter())
        .filter(|cell| cell.is_empty())
        .count();
    let completeness = 100.0 * (total_cells - empty_cells) as f64 / total_cells as f64;

    let insight = if completeness < COMPLETENESS_TARGET {
        Insight {
            kind: InsightKind::Quality,
            severity: Severity::Warning,
            title: "Data Completeness".to_string(),
            message: format!(
                "Dataset is {completeness:.1}% complete. Consider filling {empty_cells} \
                 missing values for better accuracy."
            ),
        }
    } else {
        Insight {
            kind: InsightKind::Quality,
            severity: Severity::Success,
            title: "Excellent Data Quality".to_string(),
            message: format!(
                "Your dataset is {completeness:.1}% complete with minimal gaps. \
                 Ready for comprehensive analysis."
            ),
        }
    };
    Some(insight)
}

fn numeric_insight(dataset: &Dataset) -> Option<Insight> {
    let column = dataset.numeric_columns.first()?;
    let stat = stats::describe(dataset, column)?;
    Some(Insight {
        kind: InsightKind::NumericSummary,
        severity: Severity::Info,
        title: format!("{column} Analysis"),
        message: format!(
            "Range: {:.1} - {:.1} | Avg: {:.2} | Std Dev: {:.2} | {} outliers detected",
            stat.min, stat.max, stat.mean, stat.std_dev, stat.outlier_count
        ),
    })
}

fn categorical_insight(dataset: &Dataset) -> Option<Insight> {
    let column = dataset.categorical_columns.first()?;
    let index = dataset.column_index(column)?;
    let total = dataset.row_count();
    if total == 0 {
        return None;
    }

    // First-seen order doubles as the tie-break for the top-3 ranking.
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in &dataset.rows {
        let label = row
            .get(index)
            .map(|cell| cell.as_display())
            .unwrap_or_default();
        match counts.get_mut(&label) {
            Some(count) => *count += 1,
            None => {
                order.push(label.clone());
                counts.insert(label, 1);
            }
        }
    }
    let distinct = order.len();
    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|label| {
            let count = counts[&label];
            (label, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let top = ranked
        .iter()
        .take(3)
        .map(|(label, count)| {
            format!("{label} ({:.1}%)", 100.0 * *count as f64 / total as f64)
        })
        .join(", ");

    Some(Insight {
        kind: InsightKind::CategoricalSummary,
        severity: Severity::Info,
        title: format!("Top {column} Distribution"),
        message: format!("{distinct} unique values. Top: {top}"),
    })
}

fn tip_insight(dataset: &Dataset) -> Insight {
    let message = if dataset.row_count() > LARGE_DATASET_ROWS {
        "Large dataset detected. Use filters to focus on specific segments for faster insights."
    } else {
        "Try comparing multiple metrics in the trend view to discover correlations."
    };
    Insight {
        kind: InsightKind::Tip,
        severity: Severity::Info,
        title: "Pro Tip".to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn dataset_from(headers: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::from_raw(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
        .expect("dataset")
    }

    #[test]
    fn findings_follow_the_fixed_order() {
        let dataset = dataset_from(
            &["id", "region", "revenue"],
            &[
                &["1", "East", "100"],
                &["2", "West", "200"],
                &["3", "East", "50"],
            ],
        );
        let insights = synthesize(&dataset);
        let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::Quality,
                InsightKind::NumericSummary,
                InsightKind::CategoricalSummary,
                InsightKind::Tip,
            ]
        );
    }

    #[test]
    fn complete_dataset_earns_a_success_quality_insight() {
        let dataset = dataset_from(&["a", "b"], &[&["1", "x"], &["2", "y"]]);
        let quality = &synthesize(&dataset)[0];
        assert_eq!(quality.severity, Severity::Success);
        assert!(quality.message.contains("100.0% complete"));
    }

    #[test]
    fn gaps_below_target_earn_a_warning() {
        // 4 of 20 categorical cells empty: 80% completeness.
        let rows: Vec<Vec<String>> = (0..10)
            .map(|i| {
                let label = if i < 4 { String::new() } else { format!("c{i}") };
                vec![i.to_string(), label]
            })
            .collect();
        let dataset =
            Dataset::from_raw(vec!["id".to_string(), "label".to_string()], rows).expect("dataset");
        let quality = &synthesize(&dataset)[0];
        assert_eq!(quality.severity, Severity::Warning);
        assert!(quality.message.contains("80.0% complete"));
        assert!(quality.message.contains("4 missing values"));
    }

    #[test]
    fn numeric_only_dataset_omits_the_categorical_summary() {
        let dataset = dataset_from(&["a"], &[&["1"], &["2"]]);
        let kinds: Vec<InsightKind> = synthesize(&dataset).iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![InsightKind::Quality, InsightKind::NumericSummary, InsightKind::Tip]
        );
    }

    #[test]
    fn categorical_summary_ranks_top_values_with_shares() {
        let dataset = dataset_from(
            &["region"],
            &[&["East"], &["West"], &["East"], &["North"], &["East"], &["West"]],
        );
        let insights = synthesize(&dataset);
        let summary = insights
            .iter()
            .find(|i| i.kind == InsightKind::CategoricalSummary)
            .expect("categorical summary");
        assert!(summary.message.starts_with("3 unique values."));
        assert!(summary.message.contains("East (50.0%)"));
        assert!(summary.message.contains("West (33.3%)"));
        assert!(summary.message.contains("North (16.7%)"));
    }

    #[test]
    fn zero_row_dataset_skips_the_completeness_insight() {
        let dataset = Dataset {
            headers: vec!["a".to_string()],
            rows: Vec::new(),
            numeric_columns: vec!["a".to_string()],
            categorical_columns: Vec::new(),
        };
        let insights = synthesize(&dataset);
        assert!(insights.iter().all(|i| i.kind != InsightKind::Quality));
        // The numeric summary still appears, zeroed rather than NaN.
        let summary = insights
            .iter()
            .find(|i| i.kind == InsightKind::NumericSummary)
            .expect("numeric summary");
        assert!(summary.message.contains("Avg: 0.00"));
    }

    #[test]
    fn tip_switches_on_row_count() {
        let small = dataset_from(&["a"], &[&["1"]]);
        let tip = synthesize(&small).pop().expect("tip");
        assert!(tip.message.contains("comparing multiple metrics"));

        let rows: Vec<Vec<String>> = (0..1001).map(|i| vec![i.to_string()]).collect();
        let large = Dataset::from_raw(vec!["a".to_string()], rows).expect("dataset");
        let tip = synthesize(&large).pop().expect("tip");
        assert!(tip.message.contains("Large dataset detected"));
    }
}
