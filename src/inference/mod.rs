//! Column type inference
//!
//! A column is classified from a bounded sample of its leading rows. Blank
//! cells neither confirm nor deny a type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_INFERENCE_SAMPLE_SIZE;
use crate::dataset::Dataset;
use crate::value::RawValue;

/// Semantic classification of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Date,
    Categorical,
    Unknown,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Date => "date",
            ColumnType::Categorical => "categorical",
            ColumnType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schema column together with its inferred type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

/// Axis columns proposed for a freshly loaded dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelection {
    pub x: Option<String>,
    pub y: Option<String>,
}

/// Infers a column type from at most the first 100 rows.
pub fn infer_column_type(dataset: &Dataset, column: &str) -> ColumnType {
    infer_column_type_with(dataset, column, DEFAULT_INFERENCE_SAMPLE_SIZE)
}

/// Infers a column type from at most `sample_size` leading rows.
///
/// Numeric wins over date, date over categorical. `Unknown` is returned for
/// an empty dataset, a blank or absent column name, or a sample in which every
/// cell is blank.
pub fn infer_column_type_with(dataset: &Dataset, column: &str, sample_size: usize) -> ColumnType {
    if dataset.is_empty() || column.is_empty() || !dataset.has_column(column) {
        return ColumnType::Unknown;
    }

    let mut numeric = true;
    let mut date = true;
    let mut seen = false;

    for value in dataset.column_values(column).take(sample_size).flatten() {
        if value.is_blank() {
            continue;
        }
        seen = true;

        if numeric && value.to_number().is_none() {
            numeric = false;
        }
        if date && !qualifies_as_date(value) {
            date = false;
        }
        if !numeric && !date {
            break;
        }
    }

    if !seen {
        ColumnType::Unknown
    } else if numeric {
        ColumnType::Numeric
    } else if date {
        ColumnType::Date
    } else {
        ColumnType::Categorical
    }
}

fn qualifies_as_date(value: &RawValue) -> bool {
    match value {
        RawValue::Bool(_) => false,
        other => other.to_date().is_some(),
    }
}

/// Describes every schema column, in schema order.
pub fn describe_columns(dataset: &Dataset) -> Vec<ColumnDescriptor> {
    describe_columns_with(dataset, DEFAULT_INFERENCE_SAMPLE_SIZE)
}

pub fn describe_columns_with(dataset: &Dataset, sample_size: usize) -> Vec<ColumnDescriptor> {
    dataset
        .columns()
        .iter()
        .map(|name| ColumnDescriptor {
            name: name.clone(),
            column_type: infer_column_type_with(dataset, name, sample_size),
        })
        .collect()
}

/// Looks up the inferred type of a described column.
pub fn type_of(columns: &[ColumnDescriptor], name: &str) -> ColumnType {
    columns
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.column_type)
        .unwrap_or(ColumnType::Unknown)
}

/// Proposes initial axes: x prefers a date column, then a categorical one,
/// then the first column; y prefers the first numeric column, then the second
/// column.
pub fn suggest_axes(columns: &[ColumnDescriptor]) -> AxisSelection {
    let first_of = |wanted: ColumnType| {
        columns
            .iter()
            .find(|c| c.column_type == wanted)
            .map(|c| c.name.clone())
    };

    let x = first_of(ColumnType::Date)
        .or_else(|| first_of(ColumnType::Categorical))
        .or_else(|| columns.first().map(|c| c.name.clone()));
    let y = first_of(ColumnType::Numeric).or_else(|| columns.get(1).map(|c| c.name.clone()));

    AxisSelection { x, y }
}

/// Columns offered for the x axis: the non-numeric ones, or all of them when
/// every column is numeric.
pub fn x_axis_candidates(columns: &[ColumnDescriptor]) -> Vec<&ColumnDescriptor> {
    let non_numeric: Vec<&ColumnDescriptor> = columns
        .iter()
        .filter(|c| c.column_type != ColumnType::Numeric)
        .collect();
    if non_numeric.is_empty() {
        columns.iter().collect()
    } else {
        non_numeric
    }
}

/// Columns offered for the y axis: the numeric ones.
pub fn y_axis_candidates(columns: &[ColumnDescriptor]) -> Vec<&ColumnDescriptor> {
    columns
        .iter()
        .filter(|c| c.column_type == ColumnType::Numeric)
        .collect()
}
