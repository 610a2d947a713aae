use serde::{Deserialize, Serialize};

use super::Row;

/// Case-insensitive substring filter on one column.
///
/// A blank column or blank query accepts every row. Otherwise a row without
/// the column never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFilter {
    pub column: String,
    pub query: String,
}

impl RowFilter {
    pub fn new<C: Into<String>, Q: Into<String>>(column: C, query: Q) -> Self {
        RowFilter {
            column: column.into(),
            query: query.into(),
        }
    }

    /// Whether the filter lets every row through.
    pub fn is_pass_through(&self) -> bool {
        self.column.trim().is_empty() || self.query.trim().is_empty()
    }

    pub fn matches(&self, row: &Row) -> bool {
        if self.is_pass_through() {
            return true;
        }
        let needle = self.query.to_lowercase();
        row.get(&self.column)
            .map(|value| value.to_label().to_lowercase().contains(&needle))
            .unwrap_or(false)
    }
}
