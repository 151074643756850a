//! Column specifications and rows metadata.

use super::cql_type::CqlType;

/// A single column specification from rows metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Keyspace the column belongs to.
    pub keyspace: String,
    /// Table the column belongs to.
    pub table: String,
    /// Column name.
    pub name: String,
    /// Column data type.
    pub data_type: CqlType,
}

/// Shared column information for all rows in a result set.
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    /// Column definitions in metadata order.
    pub columns: Vec<ColumnSpec>,
}

impl ColumnInfo {
    /// Create new column info from specs.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    /// Get column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get column by index.
    pub fn get(&self, index: usize) -> Option<&ColumnSpec> {
        self.columns.get(index)
    }

    /// Find column index by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Rows metadata as returned with Rows and Prepared results.
#[derive(Debug, Clone)]
pub struct RowsMetadata {
    /// Raw metadata flag bits.
    pub flags: i32,
    /// Ordered column specifications.
    pub columns: Vec<ColumnSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec {
                keyspace: "demo".to_string(),
                table: "users".to_string(),
                name: "id".to_string(),
                data_type: CqlType::Uuid,
            },
            ColumnSpec {
                keyspace: "demo".to_string(),
                table: "users".to_string(),
                name: "name".to_string(),
                data_type: CqlType::Text,
            },
        ]
    }

    #[test]
    fn test_column_info_access() {
        let info = ColumnInfo::new(make_columns());
        assert_eq!(info.len(), 2);
        assert_eq!(info.column_names(), vec!["id", "name"]);
        assert_eq!(info.get(1).unwrap().data_type, CqlType::Text);
    }

    #[test]
    fn test_find_by_name_case_insensitive() {
        let info = ColumnInfo::new(make_columns());
        assert_eq!(info.find_by_name("NAME"), Some(1));
        assert_eq!(info.find_by_name("id"), Some(0));
        assert_eq!(info.find_by_name("missing"), None);
    }
}
