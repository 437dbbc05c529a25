//! Column type inference.
//!
//! Classifies each column as numeric or categorical from its raw string
//! values: a column is numeric when strictly more than 70% of its non-empty
//! values parse as finite numbers. Empty fields are excluded from both sides
//! of the ratio, and a column with no non-empty values at all defaults to
//! categorical.

use serde::Serialize;

use crate::data::parse_finite;

/// Fraction of non-empty values that must parse as numbers before a column
/// is treated as numeric. Exactly this fraction is still categorical.
pub const NUMERIC_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Per-column classification evidence, surfaced by the `probe` command.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    /// Values considered during classification (empty fields excluded).
    pub non_empty: usize,
    /// How many of those parsed as finite numbers.
    pub numeric: usize,
}

impl ColumnProfile {
    pub fn numeric_fraction(&self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.numeric as f64 / self.non_empty as f64
        }
    }
}

/// Classifies a single column from its raw values.
pub fn classify_column<'a, I>(values: I) -> ColumnKind
where
    I: IntoIterator<Item = &'a str>,
{
    let mut non_empty = 0usize;
    let mut numeric = 0usize;
    for value in values {
        if value.trim().is_empty() {
            continue;
        }
        non_empty += 1;
        if parse_finite(value).is_some() {
            numeric += 1;
        }
    }
    kind_for_counts(non_empty, numeric)
}

/// Profiles every column of a raw table in header order.
pub fn profile_columns(headers: &[String], rows: &[Vec<String>]) -> Vec<ColumnProfile> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let mut non_empty = 0usize;
            let mut numeric = 0usize;
            for row in rows {
                let raw = row.get(idx).map(String::as_str).unwrap_or("");
                if raw.trim().is_empty() {
                    continue;
                }
                non_empty += 1;
                if parse_finite(raw).is_some() {
                    numeric += 1;
                }
            }
            ColumnProfile {
                name: name.clone(),
                kind: kind_for_counts(non_empty, numeric),
                non_empty,
                numeric,
            }
        })
        .collect()
}

fn kind_for_counts(non_empty: usize, numeric: usize) -> ColumnKind {
    if non_empty > 0 && numeric as f64 > non_empty as f64 * NUMERIC_THRESHOLD {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}
