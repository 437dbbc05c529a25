//! Chat-context generation.
//!
//! Produces the plain-text block that grounds the external language-model
//! call: row/column counts, the column partition, avg/min/max for the first
//! three numeric columns, and a JSON preview of the leading rows. This text
//! is the only information the chat collaborator ever receives about the
//! dataset, and it is regenerated fresh for every question.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use itertools::Itertools;
use serde_json::{Map, json};

use crate::{dataset::Dataset, stats};

/// Numeric columns summarized with avg/min/max in the overview.
const SUMMARIZED_NUMERIC_COLUMNS: usize = 3;

/// Renders the grounding text for a dataset. `preview_rows` bounds the row
/// preview (call sites use 3-5).
pub fn chat_context(dataset: &Dataset, preview_rows: usize) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "Dataset Overview:");
    let _ = writeln!(out, "- Total Records: {}", dataset.row_count());
    let _ = writeln!(out, "- Total Fields: {}", dataset.headers.len());
    let _ = writeln!(
        out,
        "- Numeric Fields: {}",
        dataset.numeric_columns.iter().join(", ")
    );
    let _ = writeln!(
        out,
        "- Categorical Fields: {}",
        dataset.categorical_columns.iter().join(", ")
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Numeric Statistics:");
    for column in dataset.numeric_columns.iter().take(SUMMARIZED_NUMERIC_COLUMNS) {
        if let Some(stat) = stats::describe(dataset, column) {
            let _ = writeln!(
                out,
                "- {column}: avg={:.2}, min={:.2}, max={:.2}",
                stat.mean, stat.min, stat.max
            );
        }
    }

    let shown = preview_rows.min(dataset.row_count());
    let _ = writeln!(out);
    let _ = writeln!(out, "Sample Data (first {shown} rows):");
    let preview: Vec<Map<String, serde_json::Value>> = dataset
        .rows
        .iter()
        .take(shown)
        .map(|row| {
            dataset
                .headers
                .iter()
                .zip(row)
                .map(|(header, cell)| (header.clone(), json!(cell)))
                .collect()
        })
        .collect();
    let rendered =
        serde_json::to_string_pretty(&preview).context("Serializing sample rows")?;
    let _ = writeln!(out, "{rendered}");

    Ok(out)
}
