//! Message trait and write helpers for request body serialization.
//!
//! Request bodies implement the `Message` trait, which allows calculating
//! the wire size before allocation so a frame can be serialized with a
//! single buffer allocation:
//! 1. Call `wire_size()` to determine the body size for the frame header
//! 2. Allocate header + body in one buffer
//! 3. Call `write_to()` to serialize directly into it

use crate::error::Result;
use crate::protocol::constants::BYTES_NULL_LENGTH;

/// A request body that can calculate its wire size and serialize to bytes.
pub trait Message {
    /// Calculate the serialized body size in bytes (excluding frame header).
    fn wire_size(&self) -> usize;

    /// Write the body to the buffer.
    ///
    /// The caller guarantees the buffer has sufficient capacity (from
    /// `wire_size()`).
    fn write_to(&self, buf: &mut Vec<u8>) -> Result<()>;
}

/// Wire size of a `[string]`: 2-byte length + payload.
#[inline]
pub const fn string_wire_size(len: usize) -> usize {
    2 + len
}

/// Wire size of a `[long string]`: 4-byte length + payload.
#[inline]
pub const fn long_string_wire_size(len: usize) -> usize {
    4 + len
}

/// Wire size of a `[bytes]` value; null is a bare 4-byte length.
#[inline]
pub fn bytes_wire_size(value: Option<&Vec<u8>>) -> usize {
    match value {
        Some(b) => 4 + b.len(),
        None => 4,
    }
}

/// Extension trait for writing CQL protocol notations to `Vec<u8>`.
pub trait WriteExt {
    /// Write a single byte.
    fn write_u8(&mut self, val: u8);

    /// Write a `[short]` (u16 BE).
    fn write_short(&mut self, val: u16);

    /// Write an `[int]` (i32 BE).
    fn write_int(&mut self, val: i32);

    /// Write a `[long]` (i64 BE).
    fn write_long(&mut self, val: i64);

    /// Write raw bytes.
    fn write_raw(&mut self, bytes: &[u8]);

    /// Write a `[string]`: 2-byte length + payload.
    fn write_string(&mut self, bytes: &[u8]);

    /// Write a `[long string]`: 4-byte length + payload.
    fn write_long_string(&mut self, bytes: &[u8]);

    /// Write a `[bytes]` value; `None` becomes length -1.
    fn write_bytes_opt(&mut self, bytes: Option<&[u8]>);

    /// Write a `[string map]` in the order given.
    fn write_string_map(&mut self, pairs: &[(&str, &str)]);
}

impl WriteExt for Vec<u8> {
    #[inline]
    fn write_u8(&mut self, val: u8) {
        self.push(val);
    }

    #[inline]
    fn write_short(&mut self, val: u16) {
        self.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    fn write_int(&mut self, val: i32) {
        self.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    fn write_long(&mut self, val: i64) {
        self.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    fn write_raw(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn write_string(&mut self, bytes: &[u8]) {
        self.write_short(bytes.len() as u16);
        self.extend_from_slice(bytes);
    }

    fn write_long_string(&mut self, bytes: &[u8]) {
        self.write_int(bytes.len() as i32);
        self.extend_from_slice(bytes);
    }

    fn write_bytes_opt(&mut self, bytes: Option<&[u8]>) {
        match bytes {
            Some(b) => {
                self.write_int(b.len() as i32);
                self.extend_from_slice(b);
            }
            None => self.write_int(BYTES_NULL_LENGTH),
        }
    }

    fn write_string_map(&mut self, pairs: &[(&str, &str)]) {
        self.write_short(pairs.len() as u16);
        for (key, value) in pairs {
            self.write_string(key.as_bytes());
            self.write_string(value.as_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_string() {
        let mut buf = Vec::new();
        buf.write_string(b"demo");
        assert_eq!(buf, vec![0x00, 0x04, b'd', b'e', b'm', b'o']);
        assert_eq!(buf.len(), string_wire_size(4));
    }

    #[test]
    fn test_write_long_string() {
        let mut buf = Vec::new();
        buf.write_long_string(b"USE demo");
        assert_eq!(
            buf,
            vec![0x00, 0x00, 0x00, 0x08, b'U', b'S', b'E', b' ', b'd', b'e', b'm', b'o']
        );
        assert_eq!(buf.len(), long_string_wire_size(8));
    }

    #[test]
    fn test_write_bytes_opt_null() {
        let mut buf = Vec::new();
        buf.write_bytes_opt(None);
        assert_eq!(buf, vec![0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(buf.len(), bytes_wire_size(None));
    }

    #[test]
    fn test_write_string_map_order() {
        let mut buf = Vec::new();
        buf.write_string_map(&[("k2", "v2"), ("k1", "v1")]);
        let mut expected = vec![0x00, 0x02];
        expected.extend_from_slice(&[0x00, 0x02, b'k', b'2', 0x00, 0x02, b'v', b'2']);
        expected.extend_from_slice(&[0x00, 0x02, b'k', b'1', 0x00, 0x02, b'v', b'1']);
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_write_short_int_long() {
        let mut buf = Vec::new();
        buf.write_short(0x0102);
        buf.write_int(-1);
        buf.write_long(1);
        assert_eq!(
            buf,
            vec![0x01, 0x02, 0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0, 0, 0, 0, 1]
        );
    }
}
