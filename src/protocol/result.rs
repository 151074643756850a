//! RESULT body parsing.
//!
//! The body starts with a 4-byte `kind`, followed by a kind-specific
//! payload. Rows and Prepared carry rows metadata; rows decode each
//! value as `[bytes]` through the typed codec.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::protocol::buffer::ReadBuffer;
use crate::protocol::codec::decode_value;
use crate::protocol::constants::*;
use crate::protocol::types::{ColumnInfo, ColumnSpec, CqlType, Row, RowsMetadata};
use crate::statement::PreparedStatement;
use bytes::Bytes;
use tracing::trace;

/// Outcome of a QUERY or EXECUTE request.
#[derive(Debug)]
pub enum QueryOutcome {
    /// Void result: the statement succeeded without a payload.
    Void,
    /// Rows result.
    Rows(QueryResult),
    /// The keyspace was switched.
    SetKeyspace(String),
    /// A statement was prepared.
    Prepared(PreparedStatement),
    /// A schema change was applied.
    SchemaChange {
        change: String,
        keyspace: String,
        table: String,
    },
}

impl QueryOutcome {
    /// Get the rows of a Rows outcome, if any.
    pub fn rows(&self) -> Option<&QueryResult> {
        match self {
            QueryOutcome::Rows(result) => Some(result),
            _ => None,
        }
    }

    /// Consume the outcome, returning the rows of a Rows outcome.
    pub fn into_rows(self) -> Option<QueryResult> {
        match self {
            QueryOutcome::Rows(result) => Some(result),
            _ => None,
        }
    }
}

/// Rows returned by a query.
#[derive(Debug)]
pub struct QueryResult {
    /// Shared column information.
    columns: Arc<ColumnInfo>,
    /// Decoded rows in arrival order.
    rows: Vec<Row>,
}

impl QueryResult {
    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column specifications in metadata order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns.columns
    }

    /// Get column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.column_names()
    }

    /// Get a row by index.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Iterate over rows.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

impl IntoIterator for QueryResult {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Parse a RESULT frame body.
pub fn parse_result(body: Bytes) -> Result<QueryOutcome> {
    let mut buf = ReadBuffer::new(body);
    let kind = buf.read_int()?;
    trace!(kind, "parsing RESULT body");

    match kind {
        RESULT_KIND_VOID => Ok(QueryOutcome::Void),
        RESULT_KIND_ROWS => parse_rows(&mut buf),
        RESULT_KIND_SET_KEYSPACE => {
            let keyspace = buf
                .read_string()?
                .ok_or_else(|| Error::protocol("SetKeyspace result without a keyspace name"))?;
            Ok(QueryOutcome::SetKeyspace(keyspace))
        }
        RESULT_KIND_PREPARED => {
            let id = buf
                .read_string_bytes()?
                .ok_or_else(|| Error::protocol("Prepared result without a statement id"))?;
            let metadata = parse_rows_metadata(&mut buf)?;
            Ok(QueryOutcome::Prepared(PreparedStatement::new(
                id,
                metadata.columns,
            )))
        }
        RESULT_KIND_SCHEMA_CHANGE => {
            let change = buf.read_string()?.unwrap_or_default();
            let keyspace = buf.read_string()?.unwrap_or_default();
            let table = buf.read_string()?.unwrap_or_default();
            Ok(QueryOutcome::SchemaChange {
                change,
                keyspace,
                table,
            })
        }
        kind => Err(Error::UnknownResultKind { kind }),
    }
}

/// Parse rows metadata: flags, column count, optional global table spec,
/// then per-column specs with recursive type parsing.
pub fn parse_rows_metadata(buf: &mut ReadBuffer) -> Result<RowsMetadata> {
    let flags = buf.read_int()?;
    let columns_count = buf.read_int()?;
    if columns_count < 0 {
        return Err(Error::protocol(format!(
            "Negative column count: {}",
            columns_count
        )));
    }

    let global = if flags & ROWS_FLAG_GLOBAL_TABLES_SPEC != 0 {
        let keyspace = buf.read_string()?.unwrap_or_default();
        let table = buf.read_string()?.unwrap_or_default();
        Some((keyspace, table))
    } else {
        None
    };

    let mut columns = Vec::with_capacity(columns_count as usize);
    for _ in 0..columns_count {
        let (keyspace, table) = match &global {
            Some((keyspace, table)) => (keyspace.clone(), table.clone()),
            None => {
                let keyspace = buf.read_string()?.unwrap_or_default();
                let table = buf.read_string()?.unwrap_or_default();
                (keyspace, table)
            }
        };
        let name = buf.read_string()?.unwrap_or_default();
        let data_type = CqlType::parse(buf)?;
        columns.push(ColumnSpec {
            keyspace,
            table,
            name,
            data_type,
        });
    }

    Ok(RowsMetadata { flags, columns })
}

fn parse_rows(buf: &mut ReadBuffer) -> Result<QueryOutcome> {
    let metadata = parse_rows_metadata(buf)?;
    let column_info = Arc::new(ColumnInfo::new(metadata.columns));

    let row_count = buf.read_int()?;
    if row_count < 0 {
        return Err(Error::protocol(format!("Negative row count: {}", row_count)));
    }

    let mut rows = Vec::with_capacity(row_count as usize);
    for _ in 0..row_count {
        let mut values = Vec::with_capacity(column_info.len());
        for spec in &column_info.columns {
            let content = buf.read_bytes()?;
            values.push(decode_value(content.as_deref(), &spec.data_type)?);
        }
        rows.push(Row::new(values, Arc::clone(&column_info)));
    }
    trace!(rows = rows.len(), columns = column_info.len(), "parsed rows");

    Ok(QueryOutcome::Rows(QueryResult {
        columns: column_info,
        rows,
    }))
}
