//! Session startup: STARTUP → READY / AUTHENTICATE → CREDENTIALS exchange.

use crate::error::{Error, Result};
use crate::protocol::buffer::ReadBuffer;
use crate::protocol::constants::*;
use crate::protocol::frame::FrameStream;
use crate::protocol::messages::{CredentialsMessage, StartupMessage};
use tracing::debug;

/// Drive the startup exchange on a freshly opened stream.
///
/// Sends STARTUP and, when the server requests authentication, answers
/// with CREDENTIALS. The stream is Ready on return.
pub fn establish(stream: &mut FrameStream, username: &str, password: &str) -> Result<()> {
    stream.send_message(OPCODE_STARTUP, &StartupMessage::new())?;
    let frame = stream.read_frame()?;

    match frame.opcode {
        OPCODE_READY => {
            debug!("session ready");
            Ok(())
        }
        OPCODE_AUTHENTICATE => {
            let mut buf = ReadBuffer::new(frame.body);
            let authenticator = buf.read_string()?.unwrap_or_default();
            debug!(%authenticator, "server requested authentication");
            authenticate(stream, username, password)
        }
        other => Err(Error::UnexpectedOpcode {
            expected: OPCODE_READY,
            actual: other,
        }),
    }
}

/// Send CREDENTIALS and expect READY.
///
/// The credentials body is a string map with the `username` entry first,
/// then `password`. A rejection from the server surfaces as an
/// authentication failure.
fn authenticate(stream: &mut FrameStream, username: &str, password: &str) -> Result<()> {
    if username.is_empty() && password.is_empty() {
        return Err(Error::AuthenticationRequired);
    }

    stream.send_message(
        OPCODE_CREDENTIALS,
        &CredentialsMessage { username, password },
    )?;

    match stream.read_frame() {
        Ok(frame) if frame.opcode == OPCODE_READY => {
            debug!("authentication accepted");
            Ok(())
        }
        Ok(frame) => Err(Error::UnexpectedOpcode {
            expected: OPCODE_READY,
            actual: frame.opcode,
        }),
        Err(Error::Server { code, message }) => Err(Error::AuthenticationFailed {
            message: format!("{:#06x}: {}", code, message),
        }),
        Err(e) => Err(e),
    }
}
