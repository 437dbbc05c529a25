//! Group-by aggregation for chart series.
//!
//! One primitive serves every chart variant: partition rows by a categorical
//! key, reduce an associated numeric column, rank descending, truncate to a
//! caller-chosen size. Every formerly chart-specific variant (bar, pie,
//! horizontal bar) is a parameterization of this module, not its own copy of
//! the grouping loop.
//!
//! Grouping, sorting, and ranking always operate on the untruncated
//! `raw_key`; the display `key` truncation is purely cosmetic. Group order
//! is first-seen and the ranking sort is stable, so repeated runs over the
//! same input produce byte-identical output even under ties.

use std::collections::HashMap;

use serde::Serialize;

use crate::{cli::Reduction, data::Value, dataset::Dataset};

/// Group label used for missing or empty grouping values.
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub reduction: Reduction,
    /// Keep only the first `limit` ranked groups (0 = all).
    pub limit: usize,
    /// Display-truncate keys to this many characters (0 = no truncation).
    pub key_width: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedGroup {
    /// Display label, possibly truncated with an ellipsis marker.
    pub key: String,
    /// The untruncated label grouping and sorting operate on.
    pub raw_key: String,
    /// The requested reduction of the value column.
    pub value: f64,
    pub count: usize,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionGroup {
    pub key: String,
    pub raw_key: String,
    pub count: usize,
    /// Share of total rows, rounded to one decimal.
    pub percentage: f64,
}

/// Groups rows by `group_by` (a column index) and reduces the numeric
/// column at `value` per group.
pub fn aggregate(
    dataset: &Dataset,
    group_by: usize,
    value: usize,
    options: &AggregateOptions,
) -> Vec<AggregatedGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();

    for row in &dataset.rows {
        let label = group_label(row.get(group_by));
        let amount = row.get(value).map(Value::as_number).unwrap_or(0.0);
        match groups.get_mut(&label) {
            Some(values) => values.push(amount),
            None => {
                order.push(label.clone());
                groups.insert(label, vec![amount]);
            }
        }
    }

    let mut aggregated: Vec<AggregatedGroup> = order
        .into_iter()
        .map(|raw_key| {
            let values = &groups[&raw_key];
            let count = values.len();
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let sum: f64 = values.iter().sum();
            let value = match options.reduction {
                Reduction::Sum => sum,
                Reduction::Average => sum / count as f64,
                Reduction::Count => count as f64,
                Reduction::Min => min,
                Reduction::Max => max,
            };
            AggregatedGroup {
                key: raw_key.clone(),
                raw_key,
                value,
                count,
                min,
                max,
            }
        })
        .collect();

    // Stable sort: ties retain first-seen partition order.
    aggregated.sort_by(|a, b| b.value.total_cmp(&a.value));
    if options.limit > 0 {
        aggregated.truncate(options.limit);
    }
    for group in &mut aggregated {
        group.key = truncate_key(&group.raw_key, options.key_width);
    }
    aggregated
}

/// Categorical-only breakdown: the grouping step of [`aggregate`] with the
/// reduction fixed to count, plus each group's share of total rows.
pub fn distribution(
    dataset: &Dataset,
    group_by: usize,
    limit: usize,
    key_width: usize,
) -> Vec<DistributionGroup> {
    let total = dataset.row_count();
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for row in &dataset.rows {
        let label = group_label(row.get(group_by));
        match counts.get_mut(&label) {
            Some(count) => *count += 1,
            None => {
                order.push(label.clone());
                counts.insert(label, 1);
            }
        }
    }

    let mut groups: Vec<DistributionGroup> = order
        .into_iter()
        .map(|raw_key| {
            let count = counts[&raw_key];
            let percentage = round_one_decimal(100.0 * count as f64 / total as f64);
            DistributionGroup {
                key: truncate_key(&raw_key, key_width),
                raw_key,
                count,
                percentage,
            }
        })
        .collect();

    groups.sort_by(|a, b| b.count.cmp(&a.count));
    if limit > 0 {
        groups.truncate(limit);
    }
    groups
}

fn group_label(cell: Option<&Value>) -> String {
    match cell {
        None => UNKNOWN_LABEL.to_string(),
        Some(value) if value.is_empty() => UNKNOWN_LABEL.to_string(),
        Some(value) => value.as_display(),
    }
}

fn truncate_key(raw: &str, width: usize) -> String {
    if width == 0 || raw.chars().count() <= width {
        return raw.to_string();
    }
    let mut truncated: String = raw.chars().take(width).collect();
    truncated.push_str("...");
    truncated
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
