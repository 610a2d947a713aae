// Dataset implementations module
pub mod filter;

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::RawValue;

pub use filter::RowFilter;

/// One record: column name to raw cell, in the order the parser produced them.
///
/// Column names are unique within a row; inserting an existing name replaces
/// the cell in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, RawValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell, keeping the position of an existing column.
    pub fn insert<K: Into<String>, V: Into<RawValue>>(&mut self, column: K, value: V) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, cell)) => *cell = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Builder-style [`Row::insert`].
    pub fn with<K: Into<String>, V: Into<RawValue>>(mut self, column: K, value: V) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping column names to scalar values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
        let mut row = Row::new();
        while let Some((name, value)) = access.next_entry::<String, RawValue>()? {
            row.insert(name, value);
        }
        Ok(row)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
}

/// An ordered sequence of rows sharing the schema of the first row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset whose schema is the key set of the first row.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.columns().map(str::to_string).collect())
            .unwrap_or_default();
        Dataset { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Schema column names, in first-row order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Cells of one column, `None` where a row lacks the column.
    pub fn column_values<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = Option<&'a RawValue>> + Clone + 'a {
        self.rows.iter().map(move |row| row.get(column))
    }

    /// Rows accepted by the filter, keeping this dataset's schema.
    pub fn filter(&self, filter: &RowFilter) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| filter.matches(row))
                .cloned()
                .collect(),
        }
    }

    /// Size of the JSON encoding of the rows, in bytes.
    pub fn encoded_size(&self) -> usize {
        serde_json::to_vec(&self.rows).map(|v| v.len()).unwrap_or(0)
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Dataset::from_rows(rows)
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Row>::deserialize(deserializer).map(Dataset::from_rows)
    }
}
