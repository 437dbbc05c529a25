use std::fmt;

use serde::Serialize;

/// Canonical typed cell produced by the coercion pass.
///
/// Every downstream component (statistics, aggregation, insights, chat
/// context) operates on [`Value`] rows exclusively; raw string records never
/// escape the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
        }
    }

    /// Numeric view of the cell. Text cells fall back to the coercion
    /// policy: parse if possible, otherwise `0.0`.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Text(s) => coerce_number(s),
        }
    }

    /// True for the empty-string cell, the only representation of a missing
    /// value after coercion.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Parses a raw field as a finite number. NaN and infinities do not count.
pub fn parse_finite(raw: &str) -> Option<f64> {
    let parsed: f64 = raw.trim().parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// The silent coercion policy: failed parses become `0.0`, never NaN and
/// never an error, so charts stay renderable on dirty data.
pub fn coerce_number(raw: &str) -> f64 {
    parse_finite(raw).unwrap_or(0.0)
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
