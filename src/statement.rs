//! Prepared statement handle.

use crate::protocol::types::ColumnSpec;
use bytes::Bytes;

/// A statement prepared on the server, referenced by an opaque id.
///
/// The id and the bind column specifications are fixed at prepare time;
/// the statement is an immutable value owned by the caller and can be
/// executed any number of times.
#[derive(Debug, Clone)]
pub struct PreparedStatement {
    id: Bytes,
    columns: Vec<ColumnSpec>,
}

impl PreparedStatement {
    /// Create a prepared statement from a Prepared result.
    pub(crate) fn new(id: Bytes, columns: Vec<ColumnSpec>) -> Self {
        Self { id, columns }
    }

    /// The server-assigned statement id.
    pub fn id(&self) -> &[u8] {
        &self.id
    }

    /// Bind column specifications in declared order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Number of bind columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
