//! EXECUTE request body for prepared statement execution.

use crate::error::Result;
use crate::protocol::message::{bytes_wire_size, string_wire_size, Message, WriteExt};

/// EXECUTE request body.
///
/// Layout: `[string]` statement id, `[short]` value count, then per bind
/// column (in the order declared by the prepared statement) the encoded
/// value framed with a 4-byte length (-1 for null), then `[short]`
/// consistency.
///
/// Values are encoded by the caller before this message is built, so
/// serialization itself cannot fail on a bad bind.
pub struct ExecuteMessage<'a> {
    /// Server-assigned statement id.
    pub id: &'a [u8],
    /// Encoded bind values in declared column order; `None` is null.
    pub values: &'a [Option<Vec<u8>>],
    /// Consistency level for the request.
    pub consistency: u16,
}

impl Message for ExecuteMessage<'_> {
    fn wire_size(&self) -> usize {
        string_wire_size(self.id.len())
            + 2
            + self
                .values
                .iter()
                .map(|v| bytes_wire_size(v.as_ref()))
                .sum::<usize>()
            + 2
    }

    fn write_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.write_string(self.id);
        buf.write_short(self.values.len() as u16);
        for value in self.values {
            buf.write_bytes_opt(value.as_deref());
        }
        buf.write_short(self.consistency);
        Ok(())
    }
}
