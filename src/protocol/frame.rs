//! CQL frame structure and blocking I/O.
//!
//! Every frame is an 8-byte header (`version`, `flags`, `stream`,
//! `opcode`, 4-byte big-endian body length) followed by the body. The
//! client always sends version 0x01, flags 0, stream 0; responses carry
//! the direction bit (0x80) which is treated as advisory.

use crate::error::{Error, Result};
use crate::protocol::buffer::ReadBuffer;
use crate::protocol::constants::*;
use crate::protocol::message::{Message, WriteExt};
use bytes::Bytes;
use std::io::{Read, Write};
use std::net::TcpStream;
use tracing::{debug, trace};

/// Frame header size in bytes.
pub const HEADER_SIZE: usize = 8;

/// A single protocol frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame opcode.
    pub opcode: u8,
    /// Frame body (excluding header).
    pub body: Bytes,
}

/// Write a frame header for an outgoing request.
pub fn write_frame_header(buf: &mut Vec<u8>, opcode: u8, body_len: usize) {
    buf.write_u8(CQL_VERSION_REQUEST);
    buf.write_u8(0); // flags
    buf.write_u8(0); // stream id
    buf.write_u8(opcode);
    buf.write_int(body_len as i32);
}

/// Frame reader/writer over a blocking TCP stream.
pub struct FrameStream {
    stream: TcpStream,
}

impl FrameStream {
    /// Create a new frame stream.
    pub fn new(stream: TcpStream) -> Self {
        Self { stream }
    }

    /// Send a request frame, serializing header and body in one buffer.
    pub fn send_message<M: Message>(&mut self, opcode: u8, msg: &M) -> Result<()> {
        let body_size = msg.wire_size();
        let mut buf = Vec::with_capacity(HEADER_SIZE + body_size);
        write_frame_header(&mut buf, opcode, body_size);
        msg.write_to(&mut buf)?;

        trace!(opcode, body_size, "sending frame");
        self.stream.write_all(&buf).map_err(map_closed)?;
        self.stream.flush().map_err(map_closed)?;
        Ok(())
    }

    /// Read one response frame.
    ///
    /// An ERROR frame is parsed here and surfaced as `Error::Server`; it
    /// is never returned as a frame.
    pub fn read_frame(&mut self) -> Result<Frame> {
        let mut header = [0u8; HEADER_SIZE];
        self.stream.read_exact(&mut header).map_err(map_closed)?;

        let version = header[0];
        let opcode = header[3];
        let length = u32::from_be_bytes([header[4], header[5], header[6], header[7]]) as usize;
        trace!(version, opcode, length, "received frame header");

        if version & CQL_DIRECTION_MASK == 0 {
            // Advisory only: the server must set the direction bit.
            debug!(version, "response frame without direction bit");
        }

        let mut body = vec![0u8; length];
        self.stream.read_exact(&mut body).map_err(map_closed)?;
        let body = Bytes::from(body);

        if opcode == OPCODE_ERROR {
            let mut buf = ReadBuffer::new(body);
            let code = buf.read_int()?;
            let message = buf.read_string()?.unwrap_or_default();
            debug!(code, %message, "server error frame");
            return Err(Error::server(code, message));
        }

        Ok(Frame { opcode, body })
    }

    /// Shut down the underlying socket. Errors are ignored; the peer may
    /// already have closed.
    pub fn shutdown(&mut self) {
        let _ = self.stream.shutdown(std::net::Shutdown::Both);
    }
}

fn map_closed(err: std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        Error::ConnectionClosed
    } else {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::StartupMessage;

    #[test]
    fn test_frame_header_layout() {
        let mut buf = Vec::new();
        write_frame_header(&mut buf, OPCODE_QUERY, 0x0102);
        assert_eq!(buf, vec![0x01, 0x00, 0x00, 0x07, 0x00, 0x00, 0x01, 0x02]);
    }

    #[test]
    fn test_startup_frame_bytes() {
        let msg = StartupMessage::new();
        let mut buf = Vec::with_capacity(HEADER_SIZE + msg.wire_size());
        write_frame_header(&mut buf, OPCODE_STARTUP, msg.wire_size());
        msg.write_to(&mut buf).unwrap();

        let expected: &[u8] = &[
            0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x16, // header
            0x00, 0x01, // one option
            0x00, 0x0B, b'C', b'Q', b'L', b'_', b'V', b'E', b'R', b'S', b'I', b'O', b'N',
            0x00, 0x05, b'3', b'.', b'0', b'.', b'0',
        ];
        assert_eq!(buf, expected);
    }
}
