//! Raw cell values and the coercion rules applied to them.
//!
//! Cells arrive from the parser as loosely typed scalars. Every engine works on
//! these directly and decides per call how a cell that does not look like a
//! number should be treated: dropped (statistics, correlation) or counted as
//! zero (group aggregation, chart values).

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::temporal;

/// A single scalar cell as produced by the parser.
///
/// A cell that is absent from a row behaves exactly like [`RawValue::Null`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Whether the cell carries no information for type inference:
    /// null, or text that is empty.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Best-effort numeric reading of the cell.
    ///
    /// Numbers qualify when finite; text qualifies when, once trimmed, the whole
    /// string is a finite float literal. Null and booleans never qualify.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(*n),
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// Calendar-date reading of the cell's string form.
    pub fn to_date(&self) -> Option<NaiveDateTime> {
        match self {
            RawValue::Null => None,
            other => temporal::parse_date(&other.to_label()),
        }
    }

    /// Default string form used for labels, group keys and filtering.
    pub fn to_label(&self) -> String {
        match self {
            RawValue::Null => String::new(),
            RawValue::Bool(b) => b.to_string(),
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_label())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(RawValue::Null)
    }
}

/// Numeric reading of a possibly missing cell.
pub fn to_number(value: Option<&RawValue>) -> Option<f64> {
    value.and_then(RawValue::to_number)
}

/// Coerces a series with the drop policy: cells that are not numeric are removed.
pub fn coerce_drop<'a, I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = Option<&'a RawValue>>,
{
    values.into_iter().filter_map(to_number).collect()
}

/// Coerces a series with the zero policy: cells that are not numeric become `0.0`.
pub fn coerce_zero<'a, I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = Option<&'a RawValue>>,
{
    values
        .into_iter()
        .map(|v| to_number(v).unwrap_or(0.0))
        .collect()
}
