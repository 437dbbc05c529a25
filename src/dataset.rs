//! Dataset ingestion: raw CSV records in, one immutable typed table out.
//!
//! A [`Dataset`] is built exactly once per upload. Ingestion classifies every
//! column (see [`crate::infer`]), then runs the coercion pass that turns raw
//! fields into typed [`Value`] cells: numeric columns hold finite numbers
//! (failed parses become `0.0`), categorical columns hold strings (missing
//! fields become `""`). Derived views never mutate the table in place.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use thiserror::Error;

use crate::{
    data::{Value, coerce_number},
    infer::{self, ColumnKind},
    io_utils,
};

/// Ingestion failures. No partial dataset is ever returned.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("input contains no columns")]
    NoHeaders,
    #[error("duplicate column name '{0}' in header row")]
    DuplicateHeader(String),
    #[error("input contains a header row but no data rows")]
    NoRows,
}

/// The parsed, typed table every downstream component consumes.
///
/// `numeric_columns` and `categorical_columns` partition `headers`: they are
/// disjoint, ordered as the headers are, and together cover every column.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
}

impl Dataset {
    /// Builds a dataset from decoded raw records. Rows whose fields are all
    /// blank are dropped before classification, matching the parser
    /// collaborator's skip-empty-lines behaviour.
    pub fn from_raw(
        headers: Vec<String>,
        raw_rows: Vec<Vec<String>>,
    ) -> Result<Self, DatasetError> {
        Self::from_raw_with_profiles(headers, raw_rows).map(|(dataset, _)| dataset)
    }

    /// Like [`Dataset::from_raw`], but also returns the per-column
    /// classification evidence gathered during inference.
    pub fn from_raw_with_profiles(
        headers: Vec<String>,
        raw_rows: Vec<Vec<String>>,
    ) -> Result<(Self, Vec<infer::ColumnProfile>), DatasetError> {
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(DatasetError::NoHeaders);
        }
        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(DatasetError::DuplicateHeader(header.clone()));
            }
        }

        let raw_rows: Vec<Vec<String>> = raw_rows
            .into_iter()
            .filter(|row| row.iter().any(|field| !field.trim().is_empty()))
            .collect();
        if raw_rows.is_empty() {
            return Err(DatasetError::NoRows);
        }

        let profiles = infer::profile_columns(&headers, &raw_rows);
        let kinds: Vec<ColumnKind> = profiles.iter().map(|p| p.kind).collect();

        let rows = raw_rows
            .into_iter()
            .map(|raw| {
                kinds
                    .iter()
                    .enumerate()
                    .map(|(idx, kind)| {
                        let field = raw.get(idx).map(String::as_str).unwrap_or("");
                        match kind {
                            ColumnKind::Numeric => Value::Number(coerce_number(field)),
                            ColumnKind::Categorical => Value::Text(field.to_string()),
                        }
                    })
                    .collect()
            })
            .collect();

        let mut numeric_columns = Vec::new();
        let mut categorical_columns = Vec::new();
        for (header, kind) in headers.iter().zip(&kinds) {
            match kind {
                ColumnKind::Numeric => numeric_columns.push(header.clone()),
                ColumnKind::Categorical => categorical_columns.push(header.clone()),
            }
        }

        let dataset = Self {
            headers,
            rows,
            numeric_columns,
            categorical_columns,
        };
        Ok((dataset, profiles))
    }

    /// Reads and ingests a CSV file (or stdin with `-`).
    pub fn load(
        path: &Path,
        delimiter: u8,
        encoding: &'static Encoding,
        limit: usize,
    ) -> Result<Self> {
        let (headers, raw_rows) = read_raw(path, delimiter, encoding, limit)?;
        let dataset = Self::from_raw(headers, raw_rows)
            .with_context(|| format!("Ingesting {path:?}"))?;
        Ok(dataset)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        self.numeric_columns.iter().any(|c| c == name)
    }

    /// Numeric view of a column, one entry per row, with the coercion policy
    /// applied to any stray text cells.
    pub fn numeric_values(&self, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(Value::as_number).unwrap_or(0.0))
            .collect()
    }

    /// Rows ordered descending by a numeric column, truncated to `limit`.
    /// The sort is stable, so equal values keep their original row order.
    pub fn top_rows(&self, index: usize, limit: usize) -> Vec<&Vec<Value>> {
        let mut ordered: Vec<&Vec<Value>> = self.rows.iter().collect();
        ordered.sort_by(|a, b| {
            let left = a.get(index).map(Value::as_number).unwrap_or(0.0);
            let right = b.get(index).map(Value::as_number).unwrap_or(0.0);
            right.total_cmp(&left)
        });
        ordered.truncate(limit);
        ordered
    }
}

/// Reads headers and decoded raw records without typing them. `limit`
/// bounds the number of data rows ingested (0 means all).
pub fn read_raw(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
    limit: usize,
) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .with_context(|| format!("Reading header row from {path:?}"))?;
    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        if limit > 0 && row_idx >= limit {
            break;
        }
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        rows.push(io_utils::decode_record(&record, encoding)?);
    }
    Ok((headers, rows))
}
