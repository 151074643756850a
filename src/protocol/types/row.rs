//! Row type for query results.

use std::sync::Arc;

use super::column::{ColumnInfo, ColumnSpec};
use super::value::CqlValue;

/// A row of query results.
///
/// Values appear in metadata order; every row in a result set shares the
/// same column information.
#[derive(Debug, Clone)]
pub struct Row {
    /// Column values.
    values: Vec<CqlValue>,
    /// Shared column information (reference counted).
    column_info: Arc<ColumnInfo>,
}

impl Row {
    /// Create a new row with values and shared column info.
    pub fn new(values: Vec<CqlValue>, column_info: Arc<ColumnInfo>) -> Self {
        Self {
            values,
            column_info,
        }
    }

    /// Get value by column index (0-based).
    pub fn get(&self, index: usize) -> Option<&CqlValue> {
        self.values.get(index)
    }

    /// Get value by column name (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<&CqlValue> {
        self.column_info
            .find_by_name(name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get all values.
    pub fn values(&self) -> &[CqlValue] {
        &self.values
    }

    /// Get column specifications.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.column_info.columns
    }

    /// Get column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.column_info.column_names()
    }

    /// Iterate over values.
    pub fn iter(&self) -> impl Iterator<Item = &CqlValue> {
        self.values.iter()
    }
}

impl IntoIterator for Row {
    type Item = CqlValue;
    type IntoIter = std::vec::IntoIter<CqlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a CqlValue;
    type IntoIter = std::slice::Iter<'a, CqlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
