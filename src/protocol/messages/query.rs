//! QUERY and PREPARE request bodies.

use crate::error::Result;
use crate::protocol::message::{long_string_wire_size, Message, WriteExt};

/// QUERY request body: `[long string]` CQL text + `[short]` consistency.
pub struct QueryMessage<'a> {
    /// CQL statement text.
    pub cql: &'a str,
    /// Consistency level for the request.
    pub consistency: u16,
}

impl Message for QueryMessage<'_> {
    fn wire_size(&self) -> usize {
        long_string_wire_size(self.cql.len()) + 2
    }

    fn write_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.write_long_string(self.cql.as_bytes());
        buf.write_short(self.consistency);
        Ok(())
    }
}

/// PREPARE request body: `[long string]` CQL text.
pub struct PrepareMessage<'a> {
    /// CQL statement text with bind markers.
    pub cql: &'a str,
}

impl Message for PrepareMessage<'_> {
    fn wire_size(&self) -> usize {
        long_string_wire_size(self.cql.len())
    }

    fn write_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.write_long_string(self.cql.as_bytes());
        Ok(())
    }
}
