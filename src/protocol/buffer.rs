//! Buffer utilities for reading and writing CQL protocol notations.
//!
//! The protocol is big-endian throughout. `[string]` is a 2-byte length
//! prefix followed by the payload, `[long string]` a 4-byte length prefix,
//! and `[bytes]` a 4-byte signed length where -1 denotes null.

use crate::error::{Error, Result};
use crate::protocol::constants::*;
use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

/// A cursor for reading CQL protocol data.
pub struct ReadBuffer {
    data: Bytes,
    pos: usize,
}

impl ReadBuffer {
    /// Create a new read buffer from bytes.
    pub fn new(data: Bytes) -> Self {
        Self { data, pos: 0 }
    }

    /// Get the current position in the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the remaining bytes in the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Check if the buffer has at least `n` bytes remaining.
    pub fn has_remaining(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    #[track_caller]
    fn require(&self, n: usize) -> Result<()> {
        if !self.has_remaining(n) {
            return Err(Error::BufferTooSmall {
                needed: n,
                available: self.remaining(),
                location: std::panic::Location::caller(),
            });
        }
        Ok(())
    }

    /// Read a single byte.
    #[track_caller]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.require(1)?;
        let val = self.data[self.pos];
        self.pos += 1;
        Ok(val)
    }

    /// Read a `[short]`: unsigned 2-byte big-endian integer.
    #[track_caller]
    pub fn read_short(&mut self) -> Result<u16> {
        self.require(2)?;
        let val = u16::from_be_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Ok(val)
    }

    /// Read an `[int]`: signed 4-byte big-endian integer.
    #[track_caller]
    pub fn read_int(&mut self) -> Result<i32> {
        self.require(4)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[self.pos..self.pos + 4]);
        self.pos += 4;
        Ok(i32::from_be_bytes(bytes))
    }

    /// Read a `[long]`: signed 8-byte big-endian integer.
    #[track_caller]
    pub fn read_long(&mut self) -> Result<i64> {
        self.require(8)?;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.data[self.pos..self.pos + 8]);
        self.pos += 8;
        Ok(i64::from_be_bytes(bytes))
    }

    /// Read `n` raw bytes.
    #[track_caller]
    pub fn read_raw(&mut self, n: usize) -> Result<Bytes> {
        self.require(n)?;
        let bytes = self.data.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(bytes)
    }

    /// Read a `[string]` payload as raw bytes.
    ///
    /// A length of 0xFFFF denotes null; the offset still advances past the
    /// length prefix.
    #[track_caller]
    pub fn read_string_bytes(&mut self) -> Result<Option<Bytes>> {
        let len = self.read_short()?;
        if len == STRING_NULL_LENGTH {
            return Ok(None);
        }
        Ok(Some(self.read_raw(len as usize)?))
    }

    /// Read a `[string]` as UTF-8 text (lossy for non-UTF-8 payloads).
    #[track_caller]
    pub fn read_string(&mut self) -> Result<Option<String>> {
        match self.read_string_bytes()? {
            Some(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).to_string())),
            None => Ok(None),
        }
    }

    /// Read a `[long string]` payload: 4-byte signed length, -1 for null.
    #[track_caller]
    pub fn read_long_string(&mut self) -> Result<Option<Bytes>> {
        let len = self.read_int()?;
        if len == BYTES_NULL_LENGTH {
            return Ok(None);
        }
        if len < 0 {
            return Err(Error::protocol(format!("Invalid long string length: {}", len)));
        }
        Ok(Some(self.read_raw(len as usize)?))
    }

    /// Read a `[bytes]` value: 4-byte signed length, -1 for null.
    #[track_caller]
    pub fn read_bytes(&mut self) -> Result<Option<Bytes>> {
        let len = self.read_int()?;
        if len == BYTES_NULL_LENGTH {
            return Ok(None);
        }
        if len < 0 {
            return Err(Error::protocol(format!("Invalid bytes length: {}", len)));
        }
        Ok(Some(self.read_raw(len as usize)?))
    }

    /// Read a `[string list]`: 2-byte count, then that many `[string]`s.
    #[track_caller]
    pub fn read_string_list(&mut self) -> Result<Vec<String>> {
        let count = self.read_short()? as usize;
        let mut list = Vec::with_capacity(count);
        for _ in 0..count {
            list.push(self.read_string()?.unwrap_or_default());
        }
        Ok(list)
    }

    /// Read a `[string multimap]`: 2-byte count, then (string, string list) pairs.
    #[track_caller]
    pub fn read_string_multimap(&mut self) -> Result<Vec<(String, Vec<String>)>> {
        let count = self.read_short()? as usize;
        let mut map = Vec::with_capacity(count);
        for _ in 0..count {
            let key = self.read_string()?.unwrap_or_default();
            let values = self.read_string_list()?;
            map.push((key, values));
        }
        Ok(map)
    }

    /// Read a `[uuid]`: 16 raw bytes.
    #[track_caller]
    pub fn read_uuid(&mut self) -> Result<Uuid> {
        let raw = self.read_raw(16)?;
        Uuid::from_slice(&raw).map_err(|e| Error::type_conversion(e.to_string()))
    }
}

/// A buffer for writing CQL protocol data.
pub struct WriteBuffer {
    data: BytesMut,
}

impl WriteBuffer {
    /// Create a new write buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Create a new write buffer with specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(capacity),
        }
    }

    /// Get the current length of the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the buffer contents as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Freeze the buffer into immutable bytes.
    pub fn freeze(self) -> Bytes {
        self.data.freeze()
    }

    /// Write a single byte.
    pub fn put_u8(&mut self, val: u8) {
        self.data.put_u8(val);
    }

    /// Write a `[short]`.
    pub fn put_short(&mut self, val: u16) {
        self.data.put_u16(val);
    }

    /// Write an `[int]`.
    pub fn put_int(&mut self, val: i32) {
        self.data.put_i32(val);
    }

    /// Write a `[long]`.
    pub fn put_long(&mut self, val: i64) {
        self.data.put_i64(val);
    }

    /// Write raw bytes without a length prefix.
    pub fn put_raw(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Write a `[string]`: 2-byte length + payload.
    pub fn put_string(&mut self, bytes: &[u8]) {
        self.put_short(bytes.len() as u16);
        self.put_raw(bytes);
    }

    /// Write a `[long string]`: 4-byte length + payload.
    pub fn put_long_string(&mut self, bytes: &[u8]) {
        self.put_int(bytes.len() as i32);
        self.put_raw(bytes);
    }

    /// Write a `[bytes]` value; `None` is encoded as length -1.
    pub fn put_bytes(&mut self, bytes: Option<&[u8]>) {
        match bytes {
            Some(b) => {
                self.put_int(b.len() as i32);
                self.put_raw(b);
            }
            None => self.put_int(BYTES_NULL_LENGTH),
        }
    }

    /// Write a `[string map]`: 2-byte pair count, then (string, string)
    /// pairs in the order given.
    pub fn put_string_map(&mut self, pairs: &[(&str, &str)]) {
        self.put_short(pairs.len() as u16);
        for (key, value) in pairs {
            self.put_string(key.as_bytes());
            self.put_string(value.as_bytes());
        }
    }

    /// Write a `[uuid]`: 16 raw bytes.
    pub fn put_uuid(&mut self, uuid: &Uuid) {
        self.put_raw(uuid.as_bytes());
    }
}

impl Default for WriteBuffer {
    fn default() -> Self {
        Self::new()
    }
}
